//! Credit and weighted-GPA aggregation

use crate::core::models::Course;

/// Sum of credits over `courses`, saturating at `u32::MAX`
#[must_use]
pub fn total_credits<'a, I>(courses: I) -> u32
where
    I: IntoIterator<Item = &'a Course>,
{
    courses
        .into_iter()
        .fold(0_u32, |sum, c| sum.saturating_add(c.credits))
}

/// Credit-weighted average of grade points over `courses`
///
/// Defined as 0 when the courses carry no credits, so an empty plan never
/// produces NaN.
#[must_use]
pub fn weighted_gpa<'a, I>(courses: I) -> f64
where
    I: IntoIterator<Item = &'a Course>,
{
    let (points, credits) = courses
        .into_iter()
        .fold((0.0_f64, 0_u32), |(points, credits), course| {
            (
                course.gpa.mul_add(f64::from(course.credits), points),
                credits.saturating_add(course.credits),
            )
        });

    if credits == 0 {
        0.0
    } else {
        points / f64::from(credits)
    }
}

/// Credit and GPA totals for a set of courses
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    /// Sum of credits
    pub credits: u32,
    /// Credit-weighted GPA
    pub gpa: f64,
}

impl Totals {
    /// Compute totals over a slice of courses
    #[must_use]
    pub fn of(courses: &[Course]) -> Self {
        Self {
            credits: total_credits(courses),
            gpa: weighted_gpa(courses),
        }
    }
}
