//! Data models for the course planner

pub mod course;
pub mod grade;
pub mod plan;
pub mod semester;
pub mod term;

pub use course::Course;
pub use grade::LetterGrade;
pub use plan::Plan;
pub use semester::Semester;
pub use term::Term;
