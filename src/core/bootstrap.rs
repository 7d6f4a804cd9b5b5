//! Builds planner collaborators from a loaded [`Config`]

use crate::core::catalog::{Catalog, CatalogLookup};
use crate::core::config::Config;
use crate::core::error::CatalogError;
use crate::core::identity::StaticIdentity;
use crate::core::planner::Services;
use crate::core::store::{FileCache, JsonFileStore, LocalCache, MemoryCache, MemoryStore, PlanStore};
use crate::debug;
use std::sync::Arc;

/// Plan store backend named by `[store] backend`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// JSON files under `plans_dir` and `cache_dir`
    File,
    /// Process memory; nothing outlives the run
    Memory,
}

impl Backend {
    /// Backend for a config value; anything but `memory` means files
    #[must_use]
    pub fn from_config(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("memory") {
            Self::Memory
        } else {
            Self::File
        }
    }
}

/// Load the catalog named by `[catalog]`, or the bundled one
///
/// # Errors
/// Returns an error if a configured file cannot be read or parsed
pub fn load_catalog(config: &Config) -> Result<Catalog, CatalogError> {
    let courses = Config::optional_path(&config.catalog.courses_file);
    let templates = Config::optional_path(&config.catalog.templates_file);
    let catalog = Catalog::load(courses.as_deref(), templates.as_deref())?;
    debug!(
        "Catalog loaded: {} courses, {} templates",
        catalog.len(),
        catalog.templates().len()
    );
    Ok(catalog)
}

/// Session collaborators for the configured user and backend
///
/// # Errors
/// Returns an error if the catalog cannot be loaded
pub fn build_services(config: &Config) -> Result<Services, CatalogError> {
    let catalog = load_catalog(config)?;
    let (store, cache): (Arc<dyn PlanStore>, Arc<dyn LocalCache>) =
        match Backend::from_config(&config.store.backend) {
            Backend::Memory => (Arc::new(MemoryStore::new()), Arc::new(MemoryCache::new())),
            Backend::File => (
                Arc::new(JsonFileStore::new(&config.store.plans_dir)),
                Arc::new(FileCache::new(&config.store.cache_dir)),
            ),
        };

    Ok(Services {
        catalog: Arc::new(catalog),
        store,
        cache,
        identity: Box::new(StaticIdentity::new(&config.session.user)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identity::Identity;

    #[test]
    fn test_backend_from_config() {
        assert_eq!(Backend::from_config("memory"), Backend::Memory);
        assert_eq!(Backend::from_config(" Memory "), Backend::Memory);
        assert_eq!(Backend::from_config("file"), Backend::File);
        assert_eq!(Backend::from_config(""), Backend::File);
    }

    #[test]
    fn test_services_use_configured_user() {
        let mut config = Config::from_defaults();
        config.store.backend = "memory".to_string();
        config.session.user = "alice".to_string();
        let services = build_services(&config).unwrap();
        assert_eq!(
            services.identity.current_user_id().map(|u| u.to_string()),
            Some("alice".to_string())
        );
        assert!(services.catalog.course("CMSC 201").is_some());
    }
}
