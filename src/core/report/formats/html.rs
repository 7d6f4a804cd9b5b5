//! HTML report generator
//!
//! The page is self-contained with embedded CSS. Course text is HTML-escaped.

use super::PageData;
use crate::core::report::{ReportContext, ReportGenerator};
use askama::Template;
use std::error::Error;

#[derive(Template)]
#[template(path = "plan.html")]
struct HtmlPage<'a> {
    report: &'a PageData,
}

/// HTML report generator
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        let report = PageData::from(ctx);
        Ok(HtmlPage { report: &report }.render()?)
    }
}
