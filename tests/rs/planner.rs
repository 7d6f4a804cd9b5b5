//! Integration tests for the plan aggregation engine

use course_planner::core::catalog::Catalog;
use course_planner::core::error::PlanError;
use course_planner::core::identity::StaticIdentity;
use course_planner::core::models::grade::selection_for_points;
use course_planner::core::models::{Course, Term};
use course_planner::core::planner::{
    group_semesters, weighted_gpa, Confirmation, PlannerSession, Services, SkipReason,
};
use course_planner::core::store::{MemoryCache, MemoryStore};
use std::sync::Arc;

const COURSES: &str = r#"{
    "CMSC 201": {"name": "Computer Science I", "credits": 4},
    "CMSC 202": {"name": "Computer Science II", "credits": 4},
    "MATH 151": {"name": "Calculus and Analytic Geometry I", "credits": 4},
    "ENGL 100": {"name": "Composition", "credits": 3},
    "FYS 101": {"name": "First Year Seminar", "credits": 0}
}"#;

const TEMPLATES: &str = r#"{
    "CS-Template": [
        {"term": "Fall", "year": 2024, "coursesList": ["CMSC 201", "MATH 151"]}
    ],
    "Partial": [
        {"term": "Fall", "year": 2024, "coursesList": ["CMSC 201", "BIOL 141", "MATH 151"]},
        {"term": "Spring", "year": 2025, "coursesList": ["CMSC 202"]}
    ]
}"#;

fn new_session() -> PlannerSession {
    PlannerSession::start(Services {
        catalog: Arc::new(Catalog::from_json(COURSES, TEMPLATES).expect("catalog")),
        store: Arc::new(MemoryStore::new()),
        cache: Arc::new(MemoryCache::new()),
        identity: Box::new(StaticIdentity::new("alice")),
    })
    .expect("signed in")
}

fn codes(session: &PlannerSession) -> Vec<String> {
    session
        .plan()
        .courses()
        .iter()
        .map(|c| c.code.clone())
        .collect()
}

fn planned(code: &str, credits: u32, term: Term, year: i32) -> Course {
    Course {
        code: code.to_string(),
        credits,
        term: Some(term),
        year: Some(year),
        ..Course::default()
    }
}

#[test]
fn template_on_empty_plan_yields_catalog_courses() {
    let mut session = new_session();
    let skipped = session
        .apply_template("CS-Template", Confirmation::Unconfirmed)
        .expect("empty plan needs no confirmation");

    assert!(skipped.is_empty());
    let courses = session.plan().courses();
    assert_eq!(courses.len(), 2);
    assert!(courses
        .iter()
        .all(|c| c.semester_id().as_deref() == Some("fall2024")));
    assert_eq!(session.view().totals.credits, 8);
}

#[test]
fn template_with_missing_code_is_partial_success() {
    let mut session = new_session();
    let skipped = session
        .apply_template("Partial", Confirmation::Confirmed)
        .expect("template exists");

    assert_eq!(codes(&session), vec!["CMSC 201", "MATH 151", "CMSC 202"]);
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].code, "BIOL 141");
    assert_eq!(skipped[0].reason, SkipReason::NotInCatalog);
    assert_eq!(session.view().semesters.len(), 2);
}

#[test]
fn template_replacing_plan_requires_confirmation() {
    let mut session = new_session();
    session
        .add_course("ENGL 100", Term::Fall, 2024)
        .expect("add");

    let err = session
        .apply_template("CS-Template", Confirmation::Unconfirmed)
        .unwrap_err();
    assert!(matches!(err, PlanError::ConfirmationRequired(_)));
    assert_eq!(codes(&session), vec!["ENGL 100"]);

    session
        .apply_template("CS-Template", Confirmation::Confirmed)
        .expect("confirmed");
    assert_eq!(codes(&session), vec!["CMSC 201", "MATH 151"]);
}

#[test]
fn unknown_template_is_an_error() {
    let mut session = new_session();
    assert_eq!(
        session
            .apply_template("Biology B.S.", Confirmation::Confirmed)
            .unwrap_err(),
        PlanError::TemplateNotFound("Biology B.S.".to_string())
    );
}

#[test]
fn clear_requires_confirmation_when_not_empty() {
    let mut session = new_session();
    assert!(session.clear(Confirmation::Unconfirmed).is_ok());

    session
        .add_course("CMSC 201", Term::Fall, 2024)
        .expect("add");
    assert!(matches!(
        session.clear(Confirmation::Unconfirmed),
        Err(PlanError::ConfirmationRequired(_))
    ));
    assert_eq!(session.plan().course_count(), 1);

    session.clear(Confirmation::Confirmed).expect("confirmed");
    assert!(session.plan().is_empty());
    assert!(session.view().semesters.is_empty());
    assert_eq!(session.view().totals.credits, 0);
}

#[test]
fn add_then_remove_restores_plan() {
    let mut session = new_session();
    session.add_course("ENGL 100", Term::Fall, 2024).expect("add");
    session
        .add_course("MATH 151", Term::Spring, 2025)
        .expect("add");
    let before = session.plan().clone();

    session.add_course("CMSC 201", Term::Fall, 2024).expect("add");
    let removed = session.remove_course("CMSC 201").expect("was planned");

    assert_eq!(removed.code, "CMSC 201");
    assert_eq!(session.plan(), &before);
}

#[test]
fn remove_unknown_code_is_a_no_op() {
    let mut session = new_session();
    session.add_course("ENGL 100", Term::Fall, 2024).expect("add");
    let revision = session.revision();

    assert!(session.remove_course("CMSC 999").is_none());
    assert_eq!(session.revision(), revision);
    assert_eq!(codes(&session), vec!["ENGL 100"]);
}

#[test]
fn duplicate_add_is_rejected() {
    let mut session = new_session();
    session.add_course("CMSC 201", Term::Fall, 2024).expect("add");

    let err = session
        .add_course("cmsc 201", Term::Spring, 2025)
        .unwrap_err();
    assert_eq!(err, PlanError::DuplicateCourse("CMSC 201".to_string()));
    assert_eq!(session.plan().course_count(), 1);
    assert_eq!(
        session.plan().get("CMSC 201").and_then(Course::semester_id),
        Some("fall2024".to_string())
    );
}

#[test]
fn invalid_grade_input_leaves_gpa_unchanged() {
    let mut session = new_session();
    session.add_course("CMSC 201", Term::Fall, 2024).expect("add");
    assert!(session.set_grade("CMSC 201", "3.3"));

    for input in ["abc", "5.0", "-1", "", "NaN", "inf"] {
        assert!(!session.set_grade("CMSC 201", input), "accepted {input:?}");
        let gpa = session.plan().get("CMSC 201").map(|c| c.gpa);
        assert_eq!(gpa, Some(3.3));
    }
}

#[test]
fn letter_grade_round_trip() {
    let mut session = new_session();
    session.add_course("CMSC 201", Term::Fall, 2024).expect("add");

    assert!(session.set_letter_grade("CMSC 201", "B"));
    let gpa = session.plan().get("CMSC 201").map_or(-1.0, |c| c.gpa);
    assert_eq!(selection_for_points(gpa), "B");

    assert!(session.set_letter_grade("CMSC 201", ""));
    let gpa = session.plan().get("CMSC 201").map_or(-1.0, |c| c.gpa);
    assert_eq!(selection_for_points(gpa), "");
}

#[test]
fn weighted_gpa_tracks_grades() {
    let mut session = new_session();
    session.add_course("CMSC 201", Term::Fall, 2024).expect("add");
    session.add_course("ENGL 100", Term::Fall, 2024).expect("add");
    session.set_grade("CMSC 201", "4.0");
    session.set_grade("ENGL 100", "2.0");

    // (4*4 + 3*2) / 7
    let expected = 22.0 / 7.0;
    assert!((session.view().totals.gpa - expected).abs() < 1e-9);
    assert!((session.view().semesters[0].gpa() - expected).abs() < 1e-9);
}

#[test]
fn zero_credit_plan_has_zero_gpa() {
    let mut session = new_session();
    assert!(session.view().totals.gpa.abs() < f64::EPSILON);

    session.add_course("FYS 101", Term::Fall, 2024).expect("add");
    session.set_grade("FYS 101", "4.0");
    assert_eq!(session.view().totals.credits, 0);
    assert!(session.view().totals.gpa.abs() < f64::EPSILON);
}

#[test]
fn semesters_are_chronological() {
    let courses = vec![
        planned("A 100", 3, Term::Fall, 2024),
        planned("B 100", 3, Term::Spring, 2024),
        planned("C 100", 3, Term::Winter, 2024),
        planned("D 100", 3, Term::Fall, 2023),
    ];
    let labels: Vec<String> = group_semesters(&courses).iter().map(|s| s.label()).collect();
    assert_eq!(
        labels,
        vec!["Fall 2023", "Winter 2024", "Spring 2024", "Fall 2024"]
    );
}

#[test]
fn grouping_loses_only_unscheduled_courses() {
    let mut unscheduled = planned("E 100", 3, Term::Fall, 2024);
    unscheduled.year = None;
    let courses = vec![
        planned("A 100", 3, Term::Fall, 2024),
        planned("B 100", 4, Term::Spring, 2025),
        unscheduled,
        planned("C 100", 2, Term::Fall, 2024),
    ];

    let semesters = group_semesters(&courses);
    let mut flattened: Vec<&str> = semesters
        .iter()
        .flat_map(|s| s.courses.iter().map(|c| c.code.as_str()))
        .collect();
    flattened.sort_unstable();
    assert_eq!(flattened, vec!["A 100", "B 100", "C 100"]);

    // Insertion order within a semester
    assert_eq!(semesters[0].courses[0].code, "A 100");
    assert_eq!(semesters[0].courses[1].code, "C 100");
}

#[test]
fn overall_totals_ignore_filter() {
    let mut session = new_session();
    session.add_course("CMSC 201", Term::Fall, 2024).expect("add");
    session
        .add_course("MATH 151", Term::Spring, 2025)
        .expect("add");

    let view = session.set_filter("calculus");
    assert_eq!(view.semesters.len(), 1);
    assert_eq!(view.semesters[0].courses[0].code, "MATH 151");
    assert_eq!(view.totals.credits, 8);

    let view = session.set_filter("   ");
    assert_eq!(view.semesters.len(), 2);
}

#[test]
fn weighted_gpa_of_iterator() {
    let mut a = planned("A 100", 3, Term::Fall, 2024);
    a.gpa = 4.0;
    let mut b = planned("B 100", 1, Term::Fall, 2024);
    b.gpa = 0.0;
    assert!((weighted_gpa(&[a, b]) - 3.0).abs() < 1e-9);
}
