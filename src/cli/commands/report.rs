//! Report command handler
//!
//! Renders the signed-in user's plan as Markdown or HTML.

use super::{finish, start_session};
use crate::args::ReportFormatArg;
use course_planner::config::Config;
use course_planner::core::report::{
    default_output_path, HtmlReporter, MarkdownReporter, ReportContext, ReportFormat,
    ReportGenerator,
};
use course_planner::{error, info};
use std::path::{Path, PathBuf};

impl From<ReportFormatArg> for ReportFormat {
    fn from(arg: ReportFormatArg) -> Self {
        match arg {
            ReportFormatArg::Markdown => Self::Markdown,
            ReportFormatArg::Html => Self::Html,
        }
    }
}

/// Run the report command.
///
/// # Arguments
/// * `output_file` - Optional output path; defaults to the configured reports directory
/// * `format` - Report format
/// * `filter` - Optional text filter for listed courses
/// * `config` - Configuration with the signed-in user and reports directory
pub fn run(
    output_file: Option<&Path>,
    format: ReportFormatArg,
    filter: Option<&str>,
    config: &Config,
) {
    let format = ReportFormat::from(format);
    let session = start_session(config);

    let output_path = output_file.map_or_else(
        || {
            let dir = Config::optional_path(&config.paths.reports_dir)
                .unwrap_or_else(|| PathBuf::from("."));
            default_output_path(&dir, session.user(), format)
        },
        Path::to_path_buf,
    );

    let ctx = ReportContext::new(session.user(), session.plan()).with_filter(filter.unwrap_or(""));
    let result = match format {
        ReportFormat::Markdown => MarkdownReporter::new().generate(&ctx, &output_path),
        ReportFormat::Html => HtmlReporter::new().generate(&ctx, &output_path),
    };

    match result {
        Ok(()) => {
            info!("Report written to {}", output_path.display());
            println!("✓ Report generated: {}", output_path.display());
        }
        Err(e) => {
            error!("Report generation failed: {e}");
            eprintln!("✗ Failed to generate {format} report: {e}");
        }
    }
    finish(&session);
}
