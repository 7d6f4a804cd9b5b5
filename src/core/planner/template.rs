//! Major-template expansion

use crate::core::catalog::{normalize_code, CatalogLookup, TemplateEntry};
use crate::core::models::{Course, Term};
use crate::warn;
use std::collections::HashSet;
use std::fmt;

/// Why a template code was left out of the expanded plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The code is not in the catalog
    NotInCatalog,
    /// The code already appeared earlier in the same template
    Duplicate,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInCatalog => write!(f, "not in catalog"),
            Self::Duplicate => write!(f, "listed more than once"),
        }
    }
}

/// A template code that was skipped during expansion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedCode {
    /// Code as written in the template
    pub code: String,
    /// Term of the template entry
    pub term: Term,
    /// Year of the template entry
    pub year: i32,
    /// Why it was skipped
    pub reason: SkipReason,
}

/// Result of expanding a template against the catalog
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expansion {
    /// Courses built from the template, in template order
    pub courses: Vec<Course>,
    /// Codes that could not be added
    pub skipped: Vec<SkippedCode>,
}

/// Build plan courses for every code of every template entry
///
/// Codes missing from the catalog and repeats of an earlier code are skipped
/// and reported; the rest of the template is still expanded.
#[must_use]
pub fn expand_template<C>(catalog: &C, entries: &[TemplateEntry]) -> Expansion
where
    C: CatalogLookup + ?Sized,
{
    let mut expansion = Expansion::default();
    let mut seen: HashSet<String> = HashSet::new();

    for entry in entries {
        for raw_code in &entry.courses {
            let code = normalize_code(raw_code);
            let skip = |reason| SkippedCode {
                code: raw_code.clone(),
                term: entry.term,
                year: entry.year,
                reason,
            };

            let Some(catalog_entry) = catalog.course(&code) else {
                warn!(
                    "Template course {raw_code} ({} {}) not found in catalog; skipping",
                    entry.term, entry.year
                );
                expansion.skipped.push(skip(SkipReason::NotInCatalog));
                continue;
            };

            if !seen.insert(code.clone()) {
                warn!(
                    "Template lists {raw_code} more than once; keeping the first ({} {})",
                    entry.term, entry.year
                );
                expansion.skipped.push(skip(SkipReason::Duplicate));
                continue;
            }

            expansion.courses.push(Course::from_catalog(
                &code,
                catalog_entry,
                entry.term,
                entry.year,
            ));
        }
    }

    expansion
}
