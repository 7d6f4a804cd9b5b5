//! Error types for planner operations

use thiserror::Error;

/// Errors surfaced by plan mutations and session setup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    /// The course code does not exist in the catalog.
    #[error("course {0:?} not found in the catalog")]
    CourseNotFound(String),

    /// The major template name does not exist.
    #[error("major template {0:?} not found")]
    TemplateNotFound(String),

    /// The course code is already planned.
    #[error("course {0:?} is already in the plan")]
    DuplicateCourse(String),

    /// A destructive operation on a non-empty plan was not confirmed.
    #[error("{0} would replace a non-empty plan and needs confirmation")]
    ConfirmationRequired(&'static str),

    /// The term/year or semester token could not be understood.
    #[error("invalid semester: {0}")]
    InvalidSemester(String),

    /// No user is signed in, so there is no plan to work on.
    #[error("no user is signed in")]
    NotSignedIn,
}

/// Errors that can occur while loading catalog files.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        /// Path that failed to load
        path: String,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The catalog file is not valid catalog JSON.
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}
