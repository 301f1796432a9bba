//! Benchmark suite for gradle-pins.
//!
//! This module provides performance benchmarks for:
//! - Catalog building (projecting build descriptions)
//! - Pinned view projection (resolving pins against the catalog)
//! - Pin store writes (persisting on every mutation)
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//!
//! # Save baseline for comparison
//! cargo bench -- --save-baseline main
//!
//! # Compare against baseline
//! cargo bench -- --baseline main
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;

use gradle_pins::pins::{PinnedTasksStore, DEFAULT_PINNED_TASKS_KEY};
use gradle_pins::tasks::{GradleBuild, GradleProject, GradleTask, TaskCatalog};
use gradle_pins::testing::{MemoryStateStore, MockBuildClient};
use gradle_pins::views::{Icons, PinnedTasksProvider};
use gradle_pins::workspace::{RootProject, RootProjectsStore, WorkspaceFolder};
use gradle_pins::GradleTaskProvider;

// ============================================================================
// Helpers
// ============================================================================

/// A root build with `tasks` tasks spread over ten groups.
fn build_with_tasks(tasks: usize) -> GradleBuild {
    let tasks = (0..tasks)
        .map(|i| GradleTask {
            name: format!("task{}", i),
            path: format!(":task{}", i),
            group: Some(format!("group{}", i % 10)),
            description: Some(format!("Task number {}", i)),
            build_file: None,
            project: String::new(),
            root_project: String::new(),
        })
        .collect();

    GradleBuild::new(GradleProject {
        name: "bench".to_string(),
        is_root: true,
        project_folder: None,
        tasks,
        projects: Vec::new(),
    })
}

fn root_projects(roots: usize) -> RootProjectsStore {
    let mut store = RootProjectsStore::new();
    store.populate((0..roots).map(|i| {
        WorkspaceFolder::new(i, format!("folder{}", i), format!("/bench/folder{}", i))
    }));
    store
}

// ============================================================================
// Catalog Benchmarks
// ============================================================================

fn bench_catalog_from_builds(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog_from_builds");

    for size in [100, 1_000, 5_000] {
        let build = build_with_tasks(size);
        let root = RootProject::new(WorkspaceFolder::new(0, "folder0", "/bench/folder0"));

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &build, |b, build| {
            b.iter(|| {
                let catalog = TaskCatalog::from_builds([(root.clone(), build.clone())]);
                black_box(catalog.task_count())
            });
        });
    }

    group.finish();
}

// ============================================================================
// Projection Benchmarks
// ============================================================================

/// Measures recomputing the pinned tree with many pins across several roots.
fn bench_pinned_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("pinned_projection");
    let runtime = tokio::runtime::Runtime::new().expect("Failed to start runtime");

    for pins in [10, 100, 1_000] {
        let roots = Arc::new(root_projects(4));
        let client = Arc::new(MockBuildClient::new().with_build(build_with_tasks(1_000)));
        let task_provider = Arc::new(GradleTaskProvider::new(client));
        let catalog = runtime
            .block_on(task_provider.load_tasks(&roots))
            .expect("Failed to load tasks");

        let state = Arc::new(MemoryStateStore::new());
        let store = Arc::new(
            PinnedTasksStore::load(state, DEFAULT_PINNED_TASKS_KEY).expect("Failed to load pins"),
        );
        for (i, task) in catalog.tasks().step_by(3).take(pins).enumerate() {
            let args = (i % 2 == 0).then_some("--info");
            store.add(task.id.clone(), args).expect("Failed to pin");
        }

        let provider =
            PinnedTasksProvider::new(store, roots, task_provider, Icons::default());

        group.throughput(Throughput::Elements(pins as u64));
        group.bench_with_input(BenchmarkId::from_parameter(pins), &provider, |b, provider| {
            b.iter(|| black_box(provider.get_children(None)));
        });
    }

    group.finish();
}

// ============================================================================
// Store Benchmarks
// ============================================================================

fn bench_store_add_remove(c: &mut Criterion) {
    let state = Arc::new(MemoryStateStore::new());
    let store = PinnedTasksStore::load(state, DEFAULT_PINNED_TASKS_KEY).expect("Failed to load");
    let catalog = TaskCatalog::from_builds([(
        RootProject::new(WorkspaceFolder::new(0, "folder0", "/bench/folder0")),
        build_with_tasks(200),
    )]);
    for task in catalog.tasks() {
        store.add(task.id.clone(), None).expect("Failed to pin");
    }
    let Some(task) = catalog.tasks().next() else {
        return;
    };

    c.bench_function("store_add_remove", |b| {
        b.iter(|| {
            store
                .add(black_box(task.id.clone()), Some("--info"))
                .expect("Failed to pin");
            store
                .remove(black_box(&task.id), Some("--info"))
                .expect("Failed to unpin");
        });
    });
}

criterion_group!(
    benches,
    bench_catalog_from_builds,
    bench_pinned_projection,
    bench_store_add_remove
);
criterion_main!(benches);
