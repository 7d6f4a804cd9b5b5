//! Plan aggregation engine
//!
//! Grouping and aggregation are pure functions over course slices;
//! [`PlannerSession`] owns a user's plan and applies them after every change.

pub mod aggregate;
pub mod grouping;
pub mod options;
pub mod session;
pub mod template;

pub use aggregate::{total_credits, weighted_gpa, Totals};
pub use grouping::{group_filtered, group_semesters};
pub use options::{semester_options, SemesterOption};
pub use session::{Confirmation, PlanSource, PlanView, PlannerSession, Services};
pub use template::{expand_template, Expansion, SkipReason, SkippedCode};
