//! In-memory catalog of discovered tasks.
//!
//! The catalog is a projection of every root build's description into
//! `root project -> project -> group -> task`. It is built in one pass per
//! discovery cycle and never mutated afterwards; rediscovery builds a new
//! catalog.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::build::{GradleBuild, GradleProject};
use super::definition::{TaskDefinition, TaskId, DEFAULT_GROUP};
use crate::workspace::RootProject;

/// A group of tasks inside a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogGroup {
    pub name: String,
    pub tasks: Vec<TaskDefinition>,
}

/// A project of a build with its task groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogProject {
    pub name: String,
    pub project_folder: PathBuf,
    pub groups: Vec<CatalogGroup>,
}

/// All projects discovered for one root project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRootProject {
    pub root_project: RootProject,
    pub projects: Vec<CatalogProject>,
}

#[derive(Debug, Clone, Copy)]
struct TaskLocation {
    root: usize,
    project: usize,
    group: usize,
    task: usize,
}

/// Discovered tasks for every root project.
#[derive(Debug, Clone, Default)]
pub struct TaskCatalog {
    roots: Vec<CatalogRootProject>,
    index: HashMap<TaskId, TaskLocation>,
}

impl TaskCatalog {
    /// An empty catalog (nothing discovered yet, or discovery failed).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Project each root's build description into the catalog.
    ///
    /// Roots are kept in the given order. Projects are visited root first,
    /// then subprojects depth-first; projects without tasks are skipped.
    #[must_use]
    pub fn from_builds(builds: impl IntoIterator<Item = (RootProject, GradleBuild)>) -> Self {
        let mut catalog = Self::default();

        for (root_project, build) in builds {
            let mut projects = Vec::new();
            if let Some(project) = &build.project {
                collect_projects(
                    &root_project,
                    project,
                    root_project.project_path(),
                    &root_name(project, &root_project),
                    &mut projects,
                );
            }
            catalog.roots.push(CatalogRootProject {
                root_project,
                projects,
            });
        }

        catalog.rebuild_index();
        catalog
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        for (r, root) in self.roots.iter().enumerate() {
            for (p, project) in root.projects.iter().enumerate() {
                for (g, group) in project.groups.iter().enumerate() {
                    for (t, task) in group.tasks.iter().enumerate() {
                        let location = TaskLocation {
                            root: r,
                            project: p,
                            group: g,
                            task: t,
                        };
                        if self.index.insert(task.id.clone(), location).is_some() {
                            debug!(id = %task.id, "Duplicate task id in build description");
                        }
                    }
                }
            }
        }
    }

    /// Look up a task by id across all root projects.
    ///
    /// Returns `None` when the task no longer exists.
    #[must_use]
    pub fn resolve(&self, id: &TaskId) -> Option<&TaskDefinition> {
        let loc = self.index.get(id)?;
        self.roots
            .get(loc.root)?
            .projects
            .get(loc.project)?
            .groups
            .get(loc.group)?
            .tasks
            .get(loc.task)
    }

    /// All root projects in discovery order.
    #[must_use]
    pub fn root_projects(&self) -> &[CatalogRootProject] {
        &self.roots
    }

    /// The catalog entry of one root project.
    #[must_use]
    pub fn root_project(&self, key: &Path) -> Option<&CatalogRootProject> {
        self.roots.iter().find(|r| r.root_project.key() == key)
    }

    /// Every task, in tree order.
    pub fn tasks(&self) -> impl Iterator<Item = &TaskDefinition> {
        self.roots
            .iter()
            .flat_map(|r| &r.projects)
            .flat_map(|p| &p.groups)
            .flat_map(|g| &g.tasks)
    }

    /// Tasks whose script matches exactly.
    #[must_use]
    pub fn find_by_script(&self, script: &str) -> Vec<&TaskDefinition> {
        self.tasks().filter(|t| t.script == script).collect()
    }

    #[must_use]
    pub fn task_count(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

fn root_name(project: &GradleProject, root_project: &RootProject) -> String {
    if project.name.is_empty() {
        root_project.display_name().to_string()
    } else {
        project.name.clone()
    }
}

fn resolve_folder(parent: &Path, folder: Option<&Path>, fallback: &str) -> PathBuf {
    match folder {
        Some(f) if f.is_absolute() => f.to_path_buf(),
        Some(f) if f.as_os_str().is_empty() => parent.to_path_buf(),
        Some(f) => parent.join(f),
        None if fallback.is_empty() => parent.to_path_buf(),
        None => parent.join(fallback),
    }
}

fn collect_projects(
    root_project: &RootProject,
    project: &GradleProject,
    parent_folder: &Path,
    root_name: &str,
    out: &mut Vec<CatalogProject>,
) {
    let project_folder = if project.is_root {
        resolve_folder(parent_folder, project.project_folder.as_deref(), "")
    } else {
        resolve_folder(parent_folder, project.project_folder.as_deref(), &project.name)
    };

    let mut groups: Vec<CatalogGroup> = Vec::new();
    for task in &project.tasks {
        let group_name = task
            .group
            .as_deref()
            .filter(|g| !g.is_empty())
            .unwrap_or(DEFAULT_GROUP);

        let project_name = if task.project.is_empty() {
            project.name.as_str()
        } else {
            task.project.as_str()
        };
        let task_root = if task.root_project.is_empty() {
            root_name
        } else {
            task.root_project.as_str()
        };

        let mut definition =
            TaskDefinition::new(root_project.project_path(), &project_folder, task.script())
                .with_description(task.description.clone().unwrap_or_default())
                .with_group(group_name)
                .with_project(project_name)
                .with_root_project(task_root);
        if let Some(build_file) = &task.build_file {
            definition = definition.with_build_file(resolve_folder(
                &project_folder,
                Some(build_file.as_path()),
                "",
            ));
        }

        match groups.iter_mut().find(|g| g.name == group_name) {
            Some(group) => group.tasks.push(definition),
            None => groups.push(CatalogGroup {
                name: group_name.to_string(),
                tasks: vec![definition],
            }),
        }
    }

    if !groups.is_empty() {
        out.push(CatalogProject {
            name: project.name.clone(),
            project_folder: project_folder.clone(),
            groups,
        });
    }

    for subproject in &project.projects {
        collect_projects(root_project, subproject, &project_folder, root_name, out);
    }
}
