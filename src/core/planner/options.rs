//! Selectable semesters for adding courses

use crate::core::models::{term::semester_id, Term};
use chrono::Datelike;

/// Number of years offered by default
pub const DEFAULT_YEARS: u32 = 8;

/// Most years a single listing covers
pub const MAX_YEARS: u32 = 100;

/// A semester the user can pick when adding a course
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemesterOption {
    /// Token accepted by `parse_semester_token` (e.g., "fall2024")
    pub value: String,
    /// Display label (e.g., "Fall 2024")
    pub label: String,
}

/// Every term of `years` consecutive years starting at `start_year`
///
/// `years` is capped at [`MAX_YEARS`], and the listing stops at the last
/// representable year.
#[must_use]
pub fn semester_options(start_year: i32, years: u32) -> Vec<SemesterOption> {
    (0..years.min(MAX_YEARS))
        .map_while(|offset| {
            i32::try_from(offset)
                .ok()
                .and_then(|offset| start_year.checked_add(offset))
        })
        .flat_map(|year| {
            Term::ALL.into_iter().map(move |term| SemesterOption {
                value: semester_id(term, year),
                label: format!("{term} {year}"),
            })
        })
        .collect()
}

/// Calendar year in the local timezone
#[must_use]
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}
