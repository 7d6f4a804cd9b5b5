//! Markdown report generator
//!
//! Renders well in GitHub, GitLab, and VS Code previews.

use super::PageData;
use crate::core::report::{ReportContext, ReportGenerator};
use askama::Template;
use std::error::Error;

#[derive(Template)]
#[template(path = "plan.md", escape = "none")]
struct MarkdownPage<'a> {
    report: &'a PageData,
}

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        let report = PageData::from(ctx);
        Ok(MarkdownPage { report: &report }.render()?)
    }
}
