//! CLI command handlers for `courseplanner`.
//!
//! Each command is implemented in its own submodule.

pub mod catalog;
pub mod config;
pub mod plan;
pub mod report;

use course_planner::config::Config;
use course_planner::core::bootstrap::build_services;
use course_planner::core::error::PlanError;
use course_planner::core::planner::PlannerSession;
use course_planner::core::store::{SyncNotice, SyncOutcome};
use course_planner::error;
use std::io::{self, Write};

/// Ask a y/n question on stdin; anything but y/yes is a no
pub fn confirm(prompt: &str) -> bool {
    print!("{prompt} (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();
    let response = response.trim();
    response.eq_ignore_ascii_case("y") || response.eq_ignore_ascii_case("yes")
}

/// Start a planner session for the configured user, exiting on failure
pub fn start_session(config: &Config) -> PlannerSession {
    let services = match build_services(config) {
        Ok(services) => services,
        Err(e) => {
            error!("Failed to load catalog: {e}");
            eprintln!("✗ Failed to load catalog: {e}");
            std::process::exit(1);
        }
    };
    match PlannerSession::start(services) {
        Ok(session) => session,
        Err(PlanError::NotSignedIn) => {
            eprintln!("✗ Not signed in. Use --user USER or `courseplanner config set user USER`");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("✗ {e}");
            std::process::exit(1);
        }
    }
}

/// Report sync results; returns whether any save failed
pub fn print_notices(notices: &[SyncNotice]) -> bool {
    let mut failed = false;
    for notice in notices {
        match &notice.outcome {
            SyncOutcome::Saved => {}
            SyncOutcome::Failed(reason) => {
                failed = true;
                eprintln!(
                    "✗ Plan revision {} ({} courses) was not saved: {reason}",
                    notice.revision, notice.course_count
                );
            }
        }
    }
    if failed {
        eprintln!("  Changes are kept locally. Run `courseplanner plan sync` to retry.");
    }
    failed
}

/// Wait for pending saves, then report them
pub fn finish(session: &PlannerSession) {
    session.flush();
    print_notices(&session.notices());
}
