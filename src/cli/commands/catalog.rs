//! Catalog command handler

use super::start_session;
use crate::args::CatalogSubcommand;
use course_planner::config::Config;
use course_planner::core::bootstrap::load_catalog;
use course_planner::core::catalog::{normalize_code, Catalog, CatalogCourse, CatalogLookup};
use course_planner::core::models::Course;

/// Dispatch catalog subcommands
pub fn run(subcommand: CatalogSubcommand, config: &Config) {
    let catalog = match load_catalog(config) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("✗ Failed to load catalog: {e}");
            std::process::exit(1);
        }
    };

    match subcommand {
        CatalogSubcommand::Show { code } => handle_show(&catalog, config, &code),
        CatalogSubcommand::Search { query } => handle_search(&catalog, &query),
        CatalogSubcommand::Templates => handle_templates(&catalog),
    }
}

fn handle_show(catalog: &Catalog, config: &Config, code: &str) {
    let code = normalize_code(code);
    let Some(entry) = catalog.course(&code) else {
        eprintln!("✗ Course {code} is not in the catalog");
        std::process::exit(1);
    };
    print_card(&code, entry);

    // Planned semester is only known for a signed-in user
    if !config.session.user.trim().is_empty() {
        let session = start_session(config);
        if let Some(planned) = session.plan().get(&code) {
            if let Some(semester) = planned.semester_id() {
                println!("  Planned:       {semester}");
            }
        }
    }
}

fn print_card(code: &str, entry: &CatalogCourse) {
    let card = Course::unplanned(code, entry);

    println!("\n{} - {}\n", card.code, card.name);
    println!("  Credits:       {}", card.credits);
    println!("  Department:    {}", card.department());
    if let Some(level) = card.level() {
        println!("  Level:         {level}");
    }
    println!("  Components:    {}", card.components);
    println!("  Grading:       {}", card.grading);
    println!("  Prerequisites: {}", card.prerequisites_label());
    if card.requires_consent() {
        println!("  Consent:       {}", card.consent);
    }
    if let Some(attributes) = card.attributes.as_ref().filter(|a| !a.is_empty()) {
        println!("  Attributes:    {}", attributes.join(", "));
    }
    if let Some(description) = &card.description {
        println!("\n  {description}");
    }
    if let Some(link) = &card.external_reference {
        println!("\n  {link}");
    }
}

fn handle_search(catalog: &Catalog, query: &str) {
    let matches = catalog.search(query);
    if matches.is_empty() {
        println!("No courses match '{query}'");
        return;
    }
    for (code, entry) in matches {
        println!("{code:<10} {:<40} {} cr", entry.name, entry.credits_or_default());
    }
}

fn handle_templates(catalog: &Catalog) {
    let templates = catalog.templates();
    if templates.is_empty() {
        println!("No major templates available");
        return;
    }
    for (name, entries) in templates {
        let courses: usize = entries.iter().map(|entry| entry.courses.len()).sum();
        println!("{name} ({} semesters, {courses} courses)", entries.len());
    }
}
