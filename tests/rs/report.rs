//! Integration tests for plan report rendering

use course_planner::core::identity::UserId;
use course_planner::core::models::{Course, Plan, Term};
use course_planner::core::report::{
    render, HtmlReporter, ReportContext, ReportFormat, ReportGenerator,
};
use tempfile::TempDir;

fn course(code: &str, name: &str, credits: u32, gpa: f64, term: Term, year: i32) -> Course {
    Course {
        code: code.to_string(),
        name: name.to_string(),
        credits,
        gpa,
        term: Some(term),
        year: Some(year),
        ..Course::default()
    }
}

fn sample_plan() -> Plan {
    let (plan, dropped) = Plan::from_courses(vec![
        course("CMSC 202", "Computer Science II", 4, 3.0, Term::Spring, 2025),
        course("CMSC 201", "Computer Science I", 4, 4.0, Term::Fall, 2024),
        course("ENGL 100", "Composition <Honors>", 3, 0.0, Term::Fall, 2024),
    ]);
    assert_eq!(dropped, 0);
    plan
}

#[test]
fn markdown_lists_semesters_in_order_with_totals() {
    let user = UserId::new("alice").expect("user");
    let plan = sample_plan();
    let ctx = ReportContext::new(&user, &plan);

    let markdown = render(&ctx, ReportFormat::Markdown).expect("render");

    assert!(markdown.contains("# Course plan for alice"));
    let fall = markdown.find("## Fall 2024").expect("fall heading");
    let spring = markdown.find("## Spring 2025").expect("spring heading");
    assert!(fall < spring);
    assert!(markdown.contains("| CMSC 201 | Computer Science I | 4 | A | 4.00 |"));
    // (4*4 + 4*3) / 11
    assert!(markdown.contains("2.55/4.00"));
    assert!(markdown.contains("| 3 | 11 |"));
    assert!(!markdown.contains("## Unscheduled"));
}

#[test]
fn html_escapes_course_text() {
    let user = UserId::new("alice").expect("user");
    let plan = sample_plan();
    let ctx = ReportContext::new(&user, &plan);

    let html = render(&ctx, ReportFormat::Html).expect("render");
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("Composition &lt;Honors&gt;"));
    assert!(!html.contains("<Honors>"));
    assert!(html.contains("<h2>Fall 2024</h2>"));
}

#[test]
fn empty_plan_renders() {
    let user = UserId::new("alice").expect("user");
    let plan = Plan::new();
    let ctx = ReportContext::new(&user, &plan);

    let markdown = render(&ctx, ReportFormat::Markdown).expect("render");
    assert!(markdown.contains("0.00/4.00"));
    assert!(!markdown.contains("## Fall"));
}

#[test]
fn generate_writes_file() {
    let dir = TempDir::new().expect("temp dir");
    let output = dir.path().join("reports").join("plan.html");
    let user = UserId::new("alice").expect("user");
    let plan = sample_plan();
    let ctx = ReportContext::new(&user, &plan).with_filter("cmsc");

    HtmlReporter::new()
        .generate(&ctx, &output)
        .expect("generate");

    let content = std::fs::read_to_string(&output).expect("read report");
    assert!(content.contains("CMSC 202"));
    assert!(!content.contains("ENGL 100"));
}
