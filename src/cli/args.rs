//! CLI argument definitions for `courseplanner`

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use course_planner::config::ConfigOverrides;
use course_planner::logger::Level;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `logger::Level`
/// for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

/// Report output format argument
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum ReportFormatArg {
    /// Markdown document
    #[value(alias = "md")]
    Markdown,
    /// Self-contained HTML page
    #[value(alias = "htm")]
    Html,
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    Get {
        /// Optional configuration key to display (e.g., `user`, `plans_dir`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum CatalogSubcommand {
    /// Show the full card for one course.
    Show {
        /// Course code, e.g. "CMSC 201"
        #[arg(value_name = "CODE")]
        code: String,
    },
    /// Search course codes and titles.
    Search {
        /// Case-insensitive text to look for
        #[arg(value_name = "TEXT")]
        query: String,
    },
    /// List major templates.
    Templates,
}

#[derive(Debug, Subcommand)]
pub enum PlanSubcommand {
    /// Show the plan grouped by semester.
    Show {
        /// Only list courses whose code or title contains TEXT
        #[arg(short, long, value_name = "TEXT")]
        filter: Option<String>,
    },
    /// Add a catalog course to a semester.
    ///
    /// The semester is a token such as `fall2024`, or use --term and --year.
    Add {
        /// Course code
        #[arg(value_name = "CODE")]
        code: String,
        /// Semester token (e.g. `fall2024`)
        #[arg(value_name = "SEMESTER", required_unless_present_all = ["term", "year"])]
        semester: Option<String>,
        /// Term name (Winter, Spring, Summer, Fall)
        #[arg(long, requires = "year", conflicts_with = "semester")]
        term: Option<String>,
        /// Four-digit year
        #[arg(long, requires = "term", conflicts_with = "semester")]
        year: Option<i32>,
    },
    /// Remove a course from the plan.
    Remove {
        /// Course code
        #[arg(value_name = "CODE")]
        code: String,
    },
    /// Record a grade as grade points (0-4) or a letter (A-F).
    Grade {
        /// Course code
        #[arg(value_name = "CODE")]
        code: String,
        /// Grade points or letter; an empty string clears the grade
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Replace the plan with a major template.
    Apply {
        /// Template name, e.g. "Computer Science B.S."
        #[arg(value_name = "TEMPLATE")]
        template: String,
        /// Replace a non-empty plan without asking
        #[arg(short, long)]
        yes: bool,
    },
    /// Remove every course from the plan.
    Clear {
        /// Clear a non-empty plan without asking
        #[arg(short, long)]
        yes: bool,
    },
    /// List the semesters courses can be planned into.
    Semesters {
        /// Number of years to list (1 to 100)
        #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..=100))]
        years: Option<u32>,
        /// First year (defaults to the current year)
        #[arg(long, value_name = "YEAR")]
        from: Option<i32>,
    },
    /// Save the current plan to the plan store again.
    Sync,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Browse the course catalog.
    Catalog {
        #[command(subcommand)]
        subcommand: CatalogSubcommand,
    },
    /// View and edit the signed-in user's plan.
    Plan {
        #[command(subcommand)]
        subcommand: PlanSubcommand,
    },
    /// Generate a plan report.
    ///
    /// Written to the configured reports directory unless --output is given.
    Report {
        /// Output file path
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Report format
        #[arg(short, long, value_enum, default_value_t = ReportFormatArg::Html)]
        format: ReportFormatArg,

        /// Only list courses whose code or title contains TEXT
        #[arg(long, value_name = "TEXT")]
        filter: Option<String>,
    },
    /// Sign the configured user out.
    SignOut,
}

#[derive(Parser, Debug)]
#[command(
    name = "courseplanner",
    about = "Plan courses semester by semester and track credits and GPA",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Act as this user for one run
    #[arg(long, value_name = "USER")]
    pub user: Option<String>,

    /// Override the plans directory
    #[arg(long = "plans-dir", value_name = "DIR")]
    pub plans_dir: Option<PathBuf>,

    /// Use this course catalog JSON file
    #[arg(long = "catalog", value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Use this major templates JSON file
    #[arg(long = "templates", value_name = "FILE")]
    pub templates: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

fn path_string(path: Option<&PathBuf>) -> Option<String> {
    path.map(|p| p.to_string_lossy().to_string())
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// # Returns
    /// A `ConfigOverrides` struct with values from CLI flags, where `None` means no override.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            user: self.user.clone(),
            plans_dir: path_string(self.plans_dir.as_ref()),
            courses_file: path_string(self.catalog.as_ref()),
            templates_file: path_string(self.templates.as_ref()),
            ..ConfigOverrides::default()
        }
    }
}
