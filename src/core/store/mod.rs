//! Plan persistence: remote plan store, local fallback cache and the sync worker
//!
//! The planner writes in two tiers. Every change is first written to the
//! local cache on the caller's thread, then handed to a background
//! [`SyncWorker`] that saves it to the [`PlanStore`] and reports the outcome
//! as a [`SyncNotice`]. A failed remote save leaves the in-memory plan and the
//! local cache untouched.

pub mod file;
pub mod memory;
pub mod sync;

use crate::core::identity::UserId;
use crate::core::models::Course;
use std::fmt::Write as _;
use thiserror::Error;

pub use file::{FileCache, JsonFileStore};
pub use memory::{MemoryCache, MemoryStore};
pub use sync::{SyncNotice, SyncOutcome, SyncWorker};

/// Errors raised by plan stores and local caches.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing a backing file failed.
    #[error("store I/O error at {path}: {source}")]
    Io {
        /// File that failed
        path: String,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// A stored plan document could not be encoded or decoded.
    #[error("invalid plan document: {0}")]
    Json(#[from] serde_json::Error),

    /// The backend refused or could not serve the request.
    #[error("plan store unavailable: {0}")]
    Unavailable(String),
}

/// Durable storage of one plan per user
pub trait PlanStore: Send + Sync {
    /// Load the user's saved courses, `None` if nothing was saved
    ///
    /// # Errors
    /// Returns an error if the backend cannot be read
    fn load_plan(&self, user: &UserId) -> Result<Option<Vec<Course>>, StoreError>;

    /// Replace the user's saved courses
    ///
    /// # Errors
    /// Returns an error if the backend cannot be written
    fn save_plan(&self, user: &UserId, courses: &[Course]) -> Result<(), StoreError>;
}

/// String-keyed local slot holding the JSON-encoded course list
pub trait LocalCache: Send + Sync {
    /// Read a slot
    ///
    /// # Errors
    /// Returns an error if the slot exists but cannot be read
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite a slot
    ///
    /// # Errors
    /// Returns an error if the slot cannot be written
    fn write(&self, key: &str, payload: &str) -> Result<(), StoreError>;

    /// Delete a slot; deleting a missing slot succeeds
    ///
    /// # Errors
    /// Returns an error if the slot exists but cannot be removed
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Cache slot holding a user's plan
#[must_use]
pub fn cache_key(user: &UserId) -> String {
    format!("coursePlan-{user}")
}

/// File-name-safe form of a key
///
/// ASCII alphanumerics and `-` are kept. Every other byte of the UTF-8
/// encoding, `_` included, becomes `_XX` in uppercase hex, so distinct keys
/// always map to distinct stems.
#[must_use]
pub fn file_stem(key: &str) -> String {
    let mut stem = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' {
            stem.push(char::from(byte));
        } else {
            // Writing to a String cannot fail
            let _ = write!(stem, "_{byte:02X}");
        }
    }
    stem
}
