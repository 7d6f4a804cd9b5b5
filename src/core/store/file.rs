//! File-backed plan store and local cache

use super::{file_stem, LocalCache, PlanStore, StoreError};
use crate::core::identity::UserId;
use crate::core::models::Course;
use crate::warn;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// On-disk document for one user's plan
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlanDocument {
    user_id: UserId,
    saved_at: DateTime<Utc>,
    courses: Vec<Course>,
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Write through a sibling temp file so readers never see a half-written file
fn write_replace(path: &Path, contents: &str) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
    }
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, contents).map_err(|e| io_error(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| io_error(path, e))
}

fn read_optional(path: &Path) -> Result<Option<String>, StoreError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(io_error(path, e)),
    }
}

/// Plan store keeping one JSON document per user in a directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Store rooted at `dir` (created on first save)
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the document for `user`
    #[must_use]
    pub fn path_for(&self, user: &UserId) -> PathBuf {
        self.dir.join(format!("{}.json", file_stem(user.as_str())))
    }
}

impl PlanStore for JsonFileStore {
    fn load_plan(&self, user: &UserId) -> Result<Option<Vec<Course>>, StoreError> {
        let Some(content) = read_optional(&self.path_for(user))? else {
            return Ok(None);
        };
        let document: PlanDocument = serde_json::from_str(&content)?;
        if document.user_id != *user {
            warn!(
                "Plan file for {user} belongs to {}, ignoring it",
                document.user_id
            );
            return Ok(None);
        }
        Ok(Some(document.courses))
    }

    fn save_plan(&self, user: &UserId, courses: &[Course]) -> Result<(), StoreError> {
        let document = PlanDocument {
            user_id: user.clone(),
            saved_at: Utc::now(),
            courses: courses.to_vec(),
        };
        let json = serde_json::to_string_pretty(&document)?;
        write_replace(&self.path_for(user), &json)
    }
}

/// Local cache keeping each slot as a file in a directory
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    /// Cache rooted at `dir` (created on first write)
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", file_stem(key)))
    }
}

impl LocalCache for FileCache {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        read_optional(&self.slot_path(key))
    }

    fn write(&self, key: &str, payload: &str) -> Result<(), StoreError> {
        write_replace(&self.slot_path(key), payload)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.slot_path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(&path, e)),
        }
    }
}
