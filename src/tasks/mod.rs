//! Discovered build tasks.
//!
//! - [`definition`] - task identity and definitions
//! - [`build`] - the build description returned by the backend
//! - [`catalog`] - the per-discovery catalog of tasks
//! - [`provider`] - discovery and the current catalog
//! - [`client`] - build backend reading descriptions from disk

pub mod build;
pub mod catalog;
pub mod client;
pub mod definition;
pub mod provider;

pub use build::{GradleBuild, GradleProject, GradleTask};
pub use catalog::{CatalogGroup, CatalogProject, CatalogRootProject, TaskCatalog};
pub use client::FileBuildClient;
pub use definition::{normalize_args, TaskDefinition, TaskId, DEFAULT_GROUP};
pub use provider::GradleTaskProvider;
