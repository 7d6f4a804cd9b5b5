//! Plan model

use super::Course;
use crate::core::catalog::normalize_code;
use crate::core::error::PlanError;
use serde::{Deserialize, Serialize};

/// The ordered list of courses owned by one user session
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Plan {
    courses: Vec<Course>,
}

impl Plan {
    /// Create an empty plan
    #[must_use]
    pub const fn new() -> Self {
        Self {
            courses: Vec::new(),
        }
    }

    /// Build a plan from stored courses, keeping the first entry of any repeated code
    ///
    /// Codes are normalized first, so `"cmsc 201"` and `"CMSC 201"` count as
    /// the same course.
    ///
    /// # Returns
    /// The plan and the number of repeated entries that were dropped
    #[must_use]
    pub fn from_courses(courses: Vec<Course>) -> (Self, usize) {
        let total = courses.len();
        let mut plan = Self::new();
        for mut course in courses {
            course.code = normalize_code(&course.code);
            if !plan.contains(&course.code) {
                plan.courses.push(course);
            }
        }
        let dropped = total - plan.courses.len();
        (plan, dropped)
    }

    /// Courses in insertion order
    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Whether a course with `code` is in the plan
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.courses.iter().any(|c| c.code == code)
    }

    /// Look up a planned course by code
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.code == code)
    }

    /// Append a course to the end of the plan
    ///
    /// # Errors
    /// Returns `PlanError::DuplicateCourse` if the code is already planned
    pub fn add_course(&mut self, course: Course) -> Result<(), PlanError> {
        if self.contains(&course.code) {
            return Err(PlanError::DuplicateCourse(course.code));
        }
        self.courses.push(course);
        Ok(())
    }

    /// Remove a course from the plan
    ///
    /// # Returns
    /// The removed course, or `None` if it wasn't in the plan
    pub fn remove_course(&mut self, code: &str) -> Option<Course> {
        let pos = self.courses.iter().position(|c| c.code == code)?;
        Some(self.courses.remove(pos))
    }

    /// Set the grade points of one course, leaving everything else untouched
    ///
    /// # Returns
    /// `true` if a course with that code exists
    pub fn set_gpa(&mut self, code: &str, gpa: f64) -> bool {
        self.courses
            .iter_mut()
            .find(|c| c.code == code)
            .map(|course| course.gpa = gpa)
            .is_some()
    }

    /// Replace every course at once
    pub fn replace(&mut self, courses: Vec<Course>) {
        self.courses = courses;
    }

    /// Remove every course
    pub fn clear(&mut self) {
        self.courses.clear();
    }

    /// Get total number of courses in the plan
    #[must_use]
    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    /// Whether the plan has no courses
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}
