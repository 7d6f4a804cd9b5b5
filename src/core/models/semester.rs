//! Semester view model

use super::{term::semester_id, Course, Term};
use crate::core::planner::aggregate;

/// A derived grouping of plan courses sharing one term and year
///
/// Semesters are rebuilt from the plan on every change and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Semester {
    /// Grouping key (e.g., "fall2024")
    pub id: String,

    /// Term of every member course
    pub term: Term,

    /// Year of every member course
    pub year: i32,

    /// Member courses in plan insertion order
    pub courses: Vec<Course>,
}

impl Semester {
    /// Create an empty semester
    #[must_use]
    pub fn new(term: Term, year: i32) -> Self {
        Self {
            id: semester_id(term, year),
            term,
            year,
            courses: Vec::new(),
        }
    }

    /// Human-readable label (e.g., "Fall 2024")
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.term, self.year)
    }

    /// Sum of member credits
    #[must_use]
    pub fn total_credits(&self) -> u32 {
        aggregate::total_credits(&self.courses)
    }

    /// Credit-weighted GPA of member courses
    #[must_use]
    pub fn gpa(&self) -> f64 {
        aggregate::weighted_gpa(&self.courses)
    }

    /// Chronological sort key
    #[must_use]
    pub const fn sort_key(&self) -> (i32, u8) {
        (self.year, self.term.rank())
    }
}
