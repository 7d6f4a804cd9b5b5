//! Course planning library
//!
//! Owns a signed-in user's course plan, groups it into chronological
//! semesters, and keeps credit totals and credit-weighted GPA current as the
//! plan changes. Plans are cached locally and saved to a plan store in the
//! background.

pub mod core;
pub mod logger;

pub use core::{config, get_version};
