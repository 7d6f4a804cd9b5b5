//! Semester grouping and chronological sorting

use crate::core::models::{Course, Semester};
use std::collections::HashMap;

/// Whether `course` matches a text filter (case-insensitive, code or name)
///
/// An empty or whitespace-only filter matches everything.
#[must_use]
pub fn matches_filter(course: &Course, filter: &str) -> bool {
    let needle = filter.trim().to_lowercase();
    needle.is_empty()
        || course.code.to_lowercase().contains(&needle)
        || course.name.to_lowercase().contains(&needle)
}

/// Group courses into semesters sorted by (year, term rank)
///
/// Courses keep their relative order inside each semester. Courses without a
/// term or a year are left out of the grouping.
#[must_use]
pub fn group_semesters<'a, I>(courses: I) -> Vec<Semester>
where
    I: IntoIterator<Item = &'a Course>,
{
    let mut semesters: Vec<Semester> = Vec::new();
    let mut index_by_id: HashMap<String, usize> = HashMap::new();

    for course in courses {
        let (Some(term), Some(year)) = (course.term, course.year) else {
            continue;
        };
        let semester = Semester::new(term, year);
        let idx = *index_by_id.entry(semester.id.clone()).or_insert_with(|| {
            semesters.push(semester);
            semesters.len() - 1
        });
        semesters[idx].courses.push(course.clone());
    }

    // `sort_by_key` is stable, so equal keys keep first-seen order
    semesters.sort_by_key(Semester::sort_key);
    semesters
}

/// Group only the courses that match `filter`
#[must_use]
pub fn group_filtered(courses: &[Course], filter: &str) -> Vec<Semester> {
    group_semesters(courses.iter().filter(|c| matches_filter(c, filter)))
}
