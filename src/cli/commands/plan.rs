//! Plan command handler

use super::{confirm, finish, print_notices, start_session};
use crate::args::PlanSubcommand;
use course_planner::config::Config;
use course_planner::core::catalog::{normalize_code, CatalogLookup};
use course_planner::core::error::PlanError;
use course_planner::core::models::grade::format_gpa;
use course_planner::core::models::{LetterGrade, Term};
use course_planner::core::planner::options::{current_year, DEFAULT_YEARS};
use course_planner::core::planner::{semester_options, Confirmation, PlanView, PlannerSession};
use course_planner::{error, info};

/// Dispatch plan subcommands
pub fn run(subcommand: PlanSubcommand, config: &Config) {
    if let PlanSubcommand::Semesters { years, from } = subcommand {
        handle_semesters(years, from);
        return;
    }

    let mut session = start_session(config);
    match subcommand {
        PlanSubcommand::Show { filter } => {
            let view = session.set_filter(filter.as_deref().unwrap_or_default());
            print_view(view);
        }
        PlanSubcommand::Add {
            code,
            semester,
            term,
            year,
        } => handle_add(&mut session, &code, semester.as_deref(), term.as_deref(), year),
        PlanSubcommand::Remove { code } => match session.remove_course(&code) {
            Some(removed) => println!("✓ Removed {}", removed.code),
            None => println!("{code} is not in the plan"),
        },
        PlanSubcommand::Grade { code, value } => handle_grade(&mut session, &code, &value),
        PlanSubcommand::Apply { template, yes } => handle_apply(&mut session, &template, yes),
        PlanSubcommand::Clear { yes } => handle_clear(&mut session, yes),
        PlanSubcommand::Sync => {
            session.retry_sync();
            session.flush();
            if !print_notices(&session.notices()) {
                println!("✓ Plan saved ({} courses)", session.plan().course_count());
            }
            return;
        }
        PlanSubcommand::Semesters { .. } => {}
    }
    finish(&session);
}

/// Sign out: finish pending saves and forget the configured user
pub fn sign_out(config: &Config, mut stored: Config) {
    if config.session.user.trim().is_empty() {
        println!("✓ Already signed out");
        return;
    }

    let session = start_session(config);
    let user = session.user().clone();
    print_notices(&session.sign_out());

    stored.session.user.clear();
    if let Err(e) = stored.save() {
        eprintln!("Failed to save config: {e}");
        std::process::exit(1);
    }
    info!("Signed out {user}");
    println!("✓ Signed out {user}");
}

fn exit_with(err: &PlanError) -> ! {
    error!("{err}");
    eprintln!("✗ {err}");
    std::process::exit(1);
}

fn handle_add(
    session: &mut PlannerSession,
    code: &str,
    semester: Option<&str>,
    term: Option<&str>,
    year: Option<i32>,
) {
    let result = match (semester, term, year) {
        (Some(token), _, _) => session.add_course_to(code, token),
        (None, Some(term), Some(year)) => match term.parse::<Term>() {
            Ok(term) => session.add_course(code, term, year),
            Err(e) => Err(PlanError::InvalidSemester(e)),
        },
        _ => Err(PlanError::InvalidSemester(
            "give a semester such as fall2024, or --term and --year".to_string(),
        )),
    };

    match result {
        Ok(view) => println!(
            "✓ Added {} ({} credits, GPA {})",
            code.trim(),
            view.totals.credits,
            format_gpa(view.totals.gpa)
        ),
        Err(e) => exit_with(&e),
    }
}

fn handle_grade(session: &mut PlannerSession, code: &str, value: &str) {
    let value = value.trim();
    let applied = if value.is_empty() || value.parse::<LetterGrade>().is_ok() {
        session.set_letter_grade(code, value)
    } else {
        session.set_grade(code, value)
    };

    if applied {
        println!(
            "✓ Grade recorded (plan GPA {})",
            format_gpa(session.view().totals.gpa)
        );
    } else if session.plan().contains(&normalize_code(code)) {
        println!("✗ Ignored grade '{value}': expected 0.0-4.0 or a letter A-F");
    } else {
        println!("✗ {} is not in the plan", code.trim());
    }
}

fn gate(yes: bool, prompt: &str, session: &PlannerSession) -> Confirmation {
    if yes || session.plan().is_empty() {
        Confirmation::Confirmed
    } else {
        Confirmation::from(confirm(prompt))
    }
}

fn handle_apply(session: &mut PlannerSession, template: &str, yes: bool) {
    if session.catalog().template(template).is_none() {
        exit_with(&PlanError::TemplateNotFound(template.to_string()));
    }
    let confirmation = gate(
        yes,
        "This replaces every course in your plan. Continue?",
        session,
    );
    match session.apply_template(template, confirmation) {
        Ok(skipped) => {
            println!(
                "✓ Applied {template}: {} courses",
                session.plan().course_count()
            );
            for skip in skipped {
                println!(
                    "  skipped {} ({} {}): {}",
                    skip.code, skip.term, skip.year, skip.reason
                );
            }
        }
        Err(PlanError::ConfirmationRequired(_)) => println!("✗ Template not applied"),
        Err(e) => exit_with(&e),
    }
}

fn handle_clear(session: &mut PlannerSession, yes: bool) {
    let confirmation = gate(yes, "Remove every course from your plan?", session);
    match session.clear(confirmation) {
        Ok(()) => println!("✓ Plan cleared"),
        Err(PlanError::ConfirmationRequired(_)) => println!("✗ Clear cancelled"),
        Err(e) => exit_with(&e),
    }
}

fn handle_semesters(years: Option<u32>, from: Option<i32>) {
    let start = from.unwrap_or_else(current_year);
    for option in semester_options(start, years.unwrap_or(DEFAULT_YEARS)) {
        println!("{:<12} {}", option.value, option.label);
    }
}

fn print_view(view: &PlanView) {
    if view.semesters.is_empty() {
        if view.filter.is_empty() {
            println!("Your plan is empty. Add a course or apply a major template.");
        } else {
            println!("No planned courses match '{}'", view.filter);
        }
    }

    for semester in &view.semesters {
        println!(
            "\n{}  ({} credits, GPA {})",
            semester.label(),
            semester.total_credits(),
            format_gpa(semester.gpa())
        );
        for course in &semester.courses {
            let grade = LetterGrade::nearest(course.gpa)
                .map_or_else(|| "-".to_string(), |letter| letter.to_string());
            println!(
                "  {:<10} {:<40} {:>2} cr  {grade}",
                course.code, course.name, course.credits
            );
        }
    }

    println!(
        "\nTotal: {} credits, GPA {}/4.00",
        view.totals.credits,
        format_gpa(view.totals.gpa)
    );
}
