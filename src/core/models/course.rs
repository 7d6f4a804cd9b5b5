//! Course model

use super::term::{semester_id, Term};
use crate::core::catalog::CatalogCourse;
use serde::{Deserialize, Serialize};

/// Consent value meaning no special permission is needed to enroll
pub const NO_CONSENT_REQUIRED: &str = "No Special Consent Required";

/// Represents one course enrolled in a plan
///
/// Descriptive fields are copied from the catalog when the course is added and
/// are never refreshed afterwards.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Course {
    /// Catalog key (e.g., "CMSC 201"), unique within a plan
    pub code: String,

    /// Course title (e.g., "Computer Science I")
    pub name: String,

    /// Credit count
    pub credits: u32,

    /// Prerequisites as free text
    pub prerequisites: Option<String>,

    /// Instruction components (e.g., "Lecture", "Laboratory")
    pub components: String,

    /// Catalog attributes (e.g., general education designations)
    pub attributes: Option<Vec<String>>,

    /// Enrollment consent requirement
    pub consent: String,

    /// Registrar course identifier
    pub course_id: String,

    /// Grading basis (e.g., "Graded", "Pass/Fail")
    pub grading: String,

    /// Catalog description
    pub description: Option<String>,

    /// Link to the catalog page for this course
    #[serde(alias = "link")]
    pub external_reference: Option<String>,

    /// Grade points earned, 0.0 meaning ungraded
    pub gpa: f64,

    /// Term the course is planned for
    pub term: Option<Term>,

    /// Year the course is planned for
    pub year: Option<i32>,
}

impl Course {
    /// Build a plan course from a catalog entry for the given semester
    ///
    /// # Arguments
    /// * `code` - Catalog key the entry was found under
    /// * `entry` - Catalog attributes to copy
    /// * `term` - Planned term
    /// * `year` - Planned year
    #[must_use]
    pub fn from_catalog(code: &str, entry: &CatalogCourse, term: Term, year: i32) -> Self {
        Self {
            term: Some(term),
            year: Some(year),
            ..Self::unplanned(code, entry)
        }
    }

    /// Catalog entry as a course with no semester and no grade
    #[must_use]
    pub fn unplanned(code: &str, entry: &CatalogCourse) -> Self {
        Self {
            code: code.to_string(),
            name: entry.name.clone(),
            credits: entry.credits_or_default(),
            prerequisites: entry.prerequisites.clone(),
            components: entry.components_or_default().to_string(),
            attributes: entry.attributes.clone(),
            consent: entry.consent_or_default().to_string(),
            course_id: entry.course_id.clone().unwrap_or_default(),
            grading: entry.grading_or_default().to_string(),
            description: entry.description.clone(),
            external_reference: entry.external_reference.clone(),
            gpa: 0.0,
            term: None,
            year: None,
        }
    }

    /// Grouping key derived from term and year (e.g., "fall2024")
    ///
    /// # Returns
    /// `None` when the course lacks a term or a year
    #[must_use]
    pub fn semester_id(&self) -> Option<String> {
        match (self.term, self.year) {
            (Some(term), Some(year)) => Some(semester_id(term, year)),
            _ => None,
        }
    }

    /// Department prefix (e.g., "CMSC" for "CMSC 201")
    #[must_use]
    pub fn department(&self) -> &str {
        self.code.split_whitespace().next().unwrap_or("")
    }

    /// Course level from the first digit of the number (e.g., "200" for "CMSC 201")
    #[must_use]
    pub fn level(&self) -> Option<String> {
        self.code
            .split_whitespace()
            .nth(1)
            .and_then(|number| number.chars().next())
            .map(|first| format!("{first}00"))
    }

    /// Whether enrolling requires special consent
    #[must_use]
    pub fn requires_consent(&self) -> bool {
        self.consent != NO_CONSENT_REQUIRED
    }

    /// Prerequisites for display, "None" when there are none
    #[must_use]
    pub fn prerequisites_label(&self) -> &str {
        match self.prerequisites.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => text,
            _ => "None",
        }
    }

    /// Whether the course carries a grade
    #[must_use]
    pub fn is_graded(&self) -> bool {
        self.gpa > 0.0
    }
}
