//! Core planner functionality shared by the library and the CLI

pub mod bootstrap;
pub mod catalog;
pub mod config;
pub mod error;
pub mod identity;
pub mod models;
pub mod planner;
pub mod report;
pub mod store;

/// Returns the current version of the `course-planner` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
