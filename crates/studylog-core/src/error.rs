//! Store error types.
//!
//! These represent rejected operations on the study log. File-level
//! failures (reading, writing, parsing) are reported through `anyhow`
//! with path context instead.

use thiserror::Error;

use crate::model::Semester;

/// Errors returned by [`crate::store::Store`] operations.
#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    /// No module with this name exists.
    #[error("module not found: {0}")]
    ModuleNotFound(String),

    /// A module with this name already exists.
    #[error("module already exists: {0}")]
    DuplicateModule(String),

    /// Grades can only be recorded for modules placed in a semester.
    #[error("module {0} is not planned in any semester")]
    ModuleUnplanned(String),

    /// A dependency id refers to no known module.
    #[error("module {module} depends on unknown module id {dependency}")]
    DependencyMissing { module: String, dependency: u32 },

    /// A dependency is scheduled after the requested semester, or not at all.
    #[error("module {module} cannot move to semester {target}: complete {dependency_name} (id {dependency}) first")]
    DependencyNotMet {
        module: String,
        target: Semester,
        dependency: u32,
        dependency_name: String,
    },
}

impl StoreError {
    /// The dependency id that blocked the operation, if any.
    ///
    /// The CLI offers to retry with this id ignored.
    pub fn blocking_dependency(&self) -> Option<u32> {
        match self {
            StoreError::DependencyMissing { dependency, .. }
            | StoreError::DependencyNotMet { dependency, .. } => Some(*dependency),
            _ => None,
        }
    }
}
