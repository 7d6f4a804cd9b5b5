//! Plan report generation
//!
//! Renders a user's plan, grouped by semester with credit and GPA totals, as
//! a Markdown or self-contained HTML document.

pub mod formats;

use crate::core::identity::UserId;
use crate::core::models::grade::{format_gpa, selection_for_points};
use crate::core::models::{Course, Plan};
use crate::core::planner::grouping::matches_filter;
use crate::core::planner::{group_filtered, Totals};
use chrono::{DateTime, Utc};
use std::error::Error;
use std::path::{Path, PathBuf};

pub use formats::{HtmlReporter, MarkdownReporter, ReportFormat};

/// One course line in a report
#[derive(Debug, Clone, PartialEq)]
pub struct CourseRow {
    /// Course code
    pub code: String,
    /// Course title
    pub name: String,
    /// Credit hours
    pub credits: u32,
    /// Letter grade, or `-` when ungraded
    pub grade: String,
    /// Grade points, two decimals
    pub gpa: String,
}

impl CourseRow {
    fn from_course(course: &Course) -> Self {
        let letter = selection_for_points(course.gpa);
        Self {
            code: course.code.clone(),
            name: course.name.clone(),
            credits: course.credits,
            grade: if letter.is_empty() {
                "-".to_string()
            } else {
                letter
            },
            gpa: format_gpa(course.gpa),
        }
    }
}

/// One semester section in a report
#[derive(Debug, Clone, PartialEq)]
pub struct SemesterRow {
    /// Heading such as `Fall 2024`
    pub label: String,
    /// Credits in the semester
    pub credits: u32,
    /// Weighted GPA of the semester, two decimals
    pub gpa: String,
    /// Courses in insertion order
    pub courses: Vec<CourseRow>,
}

/// Data context for report generation
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Owner of the plan
    pub user: &'a UserId,
    /// The plan being reported
    pub plan: &'a Plan,
    /// Only courses matching this text are listed; totals stay plan-wide
    pub filter: String,
    /// Timestamp shown in the report header
    pub generated_at: DateTime<Utc>,
}

impl<'a> ReportContext<'a> {
    /// Context stamped with the current time
    #[must_use]
    pub fn new(user: &'a UserId, plan: &'a Plan) -> Self {
        Self {
            user,
            plan,
            filter: String::new(),
            generated_at: Utc::now(),
        }
    }

    /// Restrict the listed courses to those matching `filter`
    #[must_use]
    pub fn with_filter(mut self, filter: &str) -> Self {
        filter.trim().clone_into(&mut self.filter);
        self
    }

    /// Report title
    #[must_use]
    pub fn title(&self) -> String {
        format!("Course plan for {}", self.user)
    }

    /// Semester sections, chronological
    #[must_use]
    pub fn semesters(&self) -> Vec<SemesterRow> {
        group_filtered(self.plan.courses(), &self.filter)
            .iter()
            .map(|semester| SemesterRow {
                label: semester.label(),
                credits: semester.total_credits(),
                gpa: format_gpa(semester.gpa()),
                courses: semester.courses.iter().map(CourseRow::from_course).collect(),
            })
            .collect()
    }

    /// Courses without a term or year, which no semester shows
    #[must_use]
    pub fn unscheduled(&self) -> Vec<CourseRow> {
        self.plan
            .courses()
            .iter()
            .filter(|course| course.term.is_none() || course.year.is_none())
            .filter(|course| matches_filter(course, &self.filter))
            .map(CourseRow::from_course)
            .collect()
    }

    /// Totals over the whole plan
    #[must_use]
    pub fn totals(&self) -> Totals {
        Totals::of(self.plan.courses())
    }

    /// Header timestamp, formatted
    #[must_use]
    pub fn generated_label(&self) -> String {
        self.generated_at.format("%Y-%m-%d %H:%M UTC").to_string()
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if rendering or writing the file fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let content = self.render(ctx)?;
        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output_path, content)?;
        Ok(())
    }

    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if rendering fails
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;
}

/// Render `ctx` in `format`
///
/// # Errors
/// Returns an error if rendering fails
pub fn render(ctx: &ReportContext, format: ReportFormat) -> Result<String, Box<dyn Error>> {
    match format {
        ReportFormat::Markdown => MarkdownReporter::new().render(ctx),
        ReportFormat::Html => HtmlReporter::new().render(ctx),
    }
}

/// Default output path for a user's report in `dir`
#[must_use]
pub fn default_output_path(dir: &Path, user: &UserId, format: ReportFormat) -> PathBuf {
    dir.join(format!(
        "{}_plan.{}",
        crate::core::store::file_stem(user.as_str()),
        format.extension()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Term;

    fn course(code: &str, credits: u32, gpa: f64, term: Option<Term>, year: Option<i32>) -> Course {
        Course {
            code: code.to_string(),
            name: format!("{code} title"),
            credits,
            gpa,
            term,
            year,
            ..Course::default()
        }
    }

    #[test]
    fn test_semesters_and_unscheduled() {
        let user = UserId::new("alice").unwrap();
        let (plan, _) = Plan::from_courses(vec![
            course("CMSC 202", 4, 3.0, Some(Term::Spring), Some(2025)),
            course("CMSC 201", 4, 4.0, Some(Term::Fall), Some(2024)),
            course("FYS 101", 1, 0.0, None, None),
        ]);
        let ctx = ReportContext::new(&user, &plan);

        let semesters = ctx.semesters();
        assert_eq!(semesters.len(), 2);
        assert_eq!(semesters[0].label, "Fall 2024");
        assert_eq!(semesters[0].courses[0].grade, "A");
        assert_eq!(semesters[1].gpa, "3.00");

        let unscheduled = ctx.unscheduled();
        assert_eq!(unscheduled.len(), 1);
        assert_eq!(unscheduled[0].grade, "-");
        assert_eq!(ctx.totals().credits, 9);
    }

    #[test]
    fn test_filter_limits_rows_not_totals() {
        let user = UserId::new("alice").unwrap();
        let (plan, _) = Plan::from_courses(vec![
            course("CMSC 201", 4, 4.0, Some(Term::Fall), Some(2024)),
            course("MATH 151", 4, 2.0, Some(Term::Fall), Some(2024)),
        ]);
        let ctx = ReportContext::new(&user, &plan).with_filter("math");

        let semesters = ctx.semesters();
        assert_eq!(semesters.len(), 1);
        assert_eq!(semesters[0].courses.len(), 1);
        assert_eq!(semesters[0].courses[0].code, "MATH 151");
        assert_eq!(ctx.totals().credits, 8);
    }

    #[test]
    fn test_default_output_path() {
        let user = UserId::new("alice").unwrap();
        let path = default_output_path(Path::new("out"), &user, ReportFormat::Html);
        assert_eq!(path, Path::new("out").join("alice_plan.html"));
    }
}
