//! Configuration module for the course planner

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Variable expanded to the planner's config directory
const DIR_VARIABLE: &str = "$COURSE_PLANNER";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Session configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Signed-in user id; empty means signed out
    #[serde(default)]
    pub user: String,
}

/// Plan persistence configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Plan store backend: `file` or `memory`
    #[serde(default)]
    pub backend: String,
    /// Directory holding one saved plan per user
    #[serde(default)]
    pub plans_dir: String,
    /// Directory holding the local fallback cache
    #[serde(default)]
    pub cache_dir: String,
}

/// Catalog configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Course catalog JSON file; empty uses the bundled catalog
    #[serde(default)]
    pub courses_file: String,
    /// Major templates JSON file; empty uses the bundled templates
    #[serde(default)]
    pub templates_file: String,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory for report output files
    #[serde(default)]
    pub reports_dir: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Session settings
    #[serde(default)]
    pub session: SessionConfig,
    /// Plan store settings
    #[serde(default)]
    pub store: StoreConfig,
    /// Catalog settings
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override signed-in user
    pub user: Option<String>,
    /// Override plan store backend
    pub backend: Option<String>,
    /// Override plans directory
    pub plans_dir: Option<String>,
    /// Override course catalog file
    pub courses_file: Option<String>,
    /// Override major templates file
    pub templates_file: Option<String>,
    /// Override reports output directory
    pub reports_dir: Option<String>,
}

/// Copy `default` into `field` when the field is empty and the default isn't
fn fill_if_empty(field: &mut String, default: &str) -> bool {
    if field.is_empty() && !default.is_empty() {
        default.clone_into(field);
        true
    } else {
        false
    }
}

impl Config {
    /// Get the `$COURSE_PLANNER` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/courseplanner`
    /// - macOS: `~/Library/Application Support/courseplanner`
    /// - Windows: `%APPDATA%\courseplanner`
    #[must_use]
    pub fn get_planner_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("courseplanner")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Used when loading so that settings added in a newer release get their
    /// defaults while existing user settings are preserved. `verbose` and
    /// `user` are never merged: false and signed-out are meaningful values.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let merged = [
            fill_if_empty(&mut self.logging.level, &defaults.logging.level),
            fill_if_empty(&mut self.logging.file, &defaults.logging.file),
            fill_if_empty(&mut self.store.backend, &defaults.store.backend),
            fill_if_empty(&mut self.store.plans_dir, &defaults.store.plans_dir),
            fill_if_empty(&mut self.store.cache_dir, &defaults.store.cache_dir),
            fill_if_empty(&mut self.catalog.courses_file, &defaults.catalog.courses_file),
            fill_if_empty(
                &mut self.catalog.templates_file,
                &defaults.catalog.templates_file,
            ),
            fill_if_empty(&mut self.paths.reports_dir, &defaults.paths.reports_dir),
        ];
        merged.contains(&true)
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides only last for the current run; the config file is untouched.
    /// Only non-`None` values replace config values.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let mut config = Config::load();
    /// let overrides = ConfigOverrides {
    ///     user: Some("alice".to_string()),
    ///     ..Default::default()
    /// };
    /// config.apply_overrides(&overrides);
    /// ```
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        let pairs = [
            (&mut self.logging.level, &overrides.level),
            (&mut self.logging.file, &overrides.file),
            (&mut self.session.user, &overrides.user),
            (&mut self.store.backend, &overrides.backend),
            (&mut self.store.plans_dir, &overrides.plans_dir),
            (&mut self.catalog.courses_file, &overrides.courses_file),
            (&mut self.catalog.templates_file, &overrides.templates_file),
            (&mut self.paths.reports_dir, &overrides.reports_dir),
        ];
        for (field, value) in pairs {
            if let Some(value) = value {
                field.clone_from(value);
            }
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds, inside
    /// [`get_planner_dir`](Self::get_planner_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_planner_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$COURSE_PLANNER` in a string to the planner config directory
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let planner_dir = Self::get_planner_dir();
            value.replace(DIR_VARIABLE, planner_dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing fields use their serde defaults (empty strings or false), and
    /// `$COURSE_PLANNER` is expanded in path values.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        for field in [
            &mut config.logging.file,
            &mut config.store.plans_dir,
            &mut config.store.cache_dir,
            &mut config.catalog.courses_file,
            &mut config.catalog.templates_file,
            &mut config.paths.reports_dir,
        ] {
            *field = Self::expand_variables(field);
        }

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML. The
    /// defaults are compiled into the binary and covered by tests.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from the user config file, or create it from defaults
    ///
    /// - If the file exists: load it, merge fields missing from it, save if anything was merged
    /// - If it doesn't (first run): write the defaults to it
    ///
    /// Falls back to defaults if the file cannot be read or parsed.
    #[must_use]
    pub fn load() -> Self {
        Self::load_from(&Self::get_config_file_path())
    }

    /// Same as [`load`](Self::load) for an explicit config file path
    #[must_use]
    pub fn load_from(config_file: &Path) -> Self {
        let defaults = Self::from_defaults();

        if !config_file.exists() {
            let _ = defaults.save_to(config_file);
            return defaults;
        }

        if let Ok(content) = fs::read_to_string(config_file) {
            if let Ok(mut config) = Self::from_toml(&content) {
                if config.merge_defaults(&defaults) {
                    let _ = config.save_to(config_file);
                }
                return config;
            }
        }

        defaults
    }

    /// Save configuration to the user config file
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or the file written
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(&Self::get_config_file_path())
    }

    /// Save configuration to an explicit path
    ///
    /// # Errors
    /// Returns an error if serialization fails, or the directory cannot be
    /// created, or the file cannot be written
    pub fn save_to(&self, config_file: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `user`, `backend`,
    /// `plans_dir`, `cache_dir`, `courses_file`, `templates_file`,
    /// `reports_dir` (dashes are accepted in place of underscores).
    ///
    /// # Returns
    /// `None` if the key is not recognized
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key.replace('-', "_").as_str() {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "user" => Some(self.session.user.clone()),
            "backend" => Some(self.store.backend.clone()),
            "plans_dir" => Some(self.store.plans_dir.clone()),
            "cache_dir" => Some(self.store.cache_dir.clone()),
            "courses_file" => Some(self.catalog.courses_file.clone()),
            "templates_file" => Some(self.catalog.templates_file.clone()),
            "reports_dir" => Some(self.paths.reports_dir.clone()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// `verbose` must be `true` or `false`, `backend` must be `file` or
    /// `memory`, `level` must be a log level. Call [`save()`](Config::save)
    /// to persist changes.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized or the value is invalid
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key.replace('-', "_").as_str() {
            "level" => {
                value
                    .parse::<crate::logger::Level>()
                    .map_err(|_| format!("Invalid log level for 'level': '{value}'"))?;
                self.logging.level = value.to_ascii_lowercase();
            }
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "user" => self.session.user = value.trim().to_string(),
            "backend" => {
                if !matches!(value, "file" | "memory") {
                    return Err(format!(
                        "Invalid store backend '{value}' (expected 'file' or 'memory')"
                    ));
                }
                self.store.backend = value.to_string();
            }
            "plans_dir" => self.store.plans_dir = value.to_string(),
            "cache_dir" => self.store.cache_dir = value.to_string(),
            "courses_file" => self.catalog.courses_file = value.to_string(),
            "templates_file" => self.catalog.templates_file = value.to_string(),
            "reports_dir" => self.paths.reports_dir = value.to_string(),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to the value in `defaults`)
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key.replace('-', "_").as_str() {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "user" => self.session.user.clone_from(&defaults.session.user),
            "backend" => self.store.backend.clone_from(&defaults.store.backend),
            "plans_dir" => self.store.plans_dir.clone_from(&defaults.store.plans_dir),
            "cache_dir" => self.store.cache_dir.clone_from(&defaults.store.cache_dir),
            "courses_file" => self
                .catalog
                .courses_file
                .clone_from(&defaults.catalog.courses_file),
            "templates_file" => self
                .catalog
                .templates_file
                .clone_from(&defaults.catalog.templates_file),
            "reports_dir" => self.paths.reports_dir.clone_from(&defaults.paths.reports_dir),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults by deleting the config file
    ///
    /// The next [`load()`](Config::load) recreates it. Succeeds if the file
    /// doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be deleted
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }

    /// Configured path, or `None` when the value is empty
    #[must_use]
    pub fn optional_path(value: &str) -> Option<PathBuf> {
        (!value.trim().is_empty()).then(|| PathBuf::from(value))
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[session]")?;
        writeln!(f, "  user = \"{}\"", self.session.user)?;

        writeln!(f, "\n[store]")?;
        writeln!(f, "  backend = \"{}\"", self.store.backend)?;
        writeln!(f, "  plans_dir = \"{}\"", self.store.plans_dir)?;
        writeln!(f, "  cache_dir = \"{}\"", self.store.cache_dir)?;

        writeln!(f, "\n[catalog]")?;
        writeln!(f, "  courses_file = \"{}\"", self.catalog.courses_file)?;
        writeln!(f, "  templates_file = \"{}\"", self.catalog.templates_file)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  reports_dir = \"{}\"", self.paths.reports_dir)?;

        Ok(())
    }
}
