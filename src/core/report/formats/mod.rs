//! Report format implementations
//!
//! Markdown and HTML exporters, both rendered from askama templates.

pub mod html;
pub mod markdown;

pub use html::HtmlReporter;
pub use markdown::MarkdownReporter;

use super::{CourseRow, ReportContext, SemesterRow};
use crate::core::models::grade::format_gpa;
use std::fmt;
use std::str::FromStr;

/// Supported report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Markdown tables, one per semester
    #[default]
    Markdown,
    /// Self-contained HTML page with embedded CSS
    Html,
}

impl ReportFormat {
    /// Get the file extension for this format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Html => "html",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "md" | "markdown" => Ok(Self::Markdown),
            "html" | "htm" => Ok(Self::Html),
            _ => Err(format!("Unknown report format: {s}")),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Markdown => write!(f, "markdown"),
            Self::Html => write!(f, "html"),
        }
    }
}

/// Values the templates render, precomputed from a [`ReportContext`]
#[derive(Debug, Clone)]
pub struct PageData {
    /// Report title
    pub title: String,
    /// Formatted generation time
    pub generated: String,
    /// Plan-wide credits
    pub total_credits: u32,
    /// Plan-wide weighted GPA, two decimals
    pub total_gpa: String,
    /// Number of courses in the plan
    pub course_count: usize,
    /// Semester sections
    pub semesters: Vec<SemesterRow>,
    /// Courses missing a term or year
    pub unscheduled: Vec<CourseRow>,
}

impl From<&ReportContext<'_>> for PageData {
    fn from(ctx: &ReportContext<'_>) -> Self {
        let totals = ctx.totals();
        Self {
            title: ctx.title(),
            generated: ctx.generated_label(),
            total_credits: totals.credits,
            total_gpa: format_gpa(totals.gpa),
            course_count: ctx.plan.course_count(),
            semesters: ctx.semesters(),
            unscheduled: ctx.unscheduled(),
        }
    }
}
