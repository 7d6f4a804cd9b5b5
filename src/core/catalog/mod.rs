//! Read-only course catalog and major templates
//!
//! The catalog maps course codes to descriptive attributes and major-template
//! names to semester-by-semester course lists. It is loaded once per process
//! and never mutated by the planner.

use crate::core::error::CatalogError;
use crate::core::models::Term;
use crate::warn;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Bundled sample catalog used when no catalog file is configured
const BUNDLED_COURSES: &str = include_str!("../../../assets/catalog/courses.json");

/// Bundled sample major templates used when no templates file is configured
const BUNDLED_TEMPLATES: &str = include_str!("../../../assets/catalog/majors.json");

const DEFAULT_CREDITS: u32 = 3;
const DEFAULT_COMPONENTS: &str = "Lecture";
const DEFAULT_GRADING: &str = "Graded";

/// Catalog attributes for one course, as stored in the catalog file
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CatalogCourse {
    /// Course title
    pub name: String,

    /// Credit count, if the catalog lists one
    #[serde(deserialize_with = "deserialize_credits")]
    pub credits: Option<u32>,

    /// Prerequisites as free text (lists are joined with ", ")
    #[serde(deserialize_with = "deserialize_prerequisites")]
    pub prerequisites: Option<String>,

    /// Instruction components
    pub components: Option<String>,

    /// Catalog attributes
    pub attributes: Option<Vec<String>>,

    /// Consent requirement
    pub consent: Option<String>,

    /// Registrar course identifier
    pub course_id: Option<String>,

    /// Grading basis
    pub grading: Option<String>,

    /// Catalog description
    pub description: Option<String>,

    /// Link to the catalog page
    #[serde(alias = "link", alias = "url")]
    pub external_reference: Option<String>,
}

impl CatalogCourse {
    /// Credits, defaulting to 3 when the catalog omits them
    #[must_use]
    pub fn credits_or_default(&self) -> u32 {
        self.credits.unwrap_or(DEFAULT_CREDITS)
    }

    /// Components, defaulting to "Lecture"
    #[must_use]
    pub fn components_or_default(&self) -> &str {
        self.components.as_deref().unwrap_or(DEFAULT_COMPONENTS)
    }

    /// Consent, defaulting to "No Special Consent Required"
    #[must_use]
    pub fn consent_or_default(&self) -> &str {
        self.consent
            .as_deref()
            .unwrap_or(crate::core::models::course::NO_CONSENT_REQUIRED)
    }

    /// Grading basis, defaulting to "Graded"
    #[must_use]
    pub fn grading_or_default(&self) -> &str {
        self.grading.as_deref().unwrap_or(DEFAULT_GRADING)
    }
}

/// One semester of a major template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateEntry {
    /// Term of the semester
    pub term: Term,

    /// Year of the semester
    pub year: i32,

    /// Course codes to add, in order
    #[serde(rename = "coursesList", alias = "courses")]
    pub courses: Vec<String>,
}

/// Read-only catalog contract consumed by the planner
pub trait CatalogLookup {
    /// Catalog attributes for a course code
    fn course(&self, code: &str) -> Option<&CatalogCourse>;

    /// All major templates by name
    fn templates(&self) -> &BTreeMap<String, Vec<TemplateEntry>>;

    /// One major template by name
    fn template(&self, name: &str) -> Option<&[TemplateEntry]> {
        self.templates().get(name).map(Vec::as_slice)
    }
}

/// Canonical form of a course code: uppercase, single spaces, trimmed
///
/// # Examples
/// ```
/// use course_planner::core::catalog::normalize_code;
/// assert_eq!(normalize_code("  cmsc   201 "), "CMSC 201");
/// ```
#[must_use]
pub fn normalize_code(code: &str) -> String {
    code.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// In-memory catalog loaded from JSON
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    courses: BTreeMap<String, CatalogCourse>,
    templates: BTreeMap<String, Vec<TemplateEntry>>,
}

impl Catalog {
    /// Create a catalog from already-parsed maps, normalizing course codes
    ///
    /// When two keys normalize to the same code, the one that sorts last wins.
    #[must_use]
    pub fn new(
        courses: BTreeMap<String, CatalogCourse>,
        templates: BTreeMap<String, Vec<TemplateEntry>>,
    ) -> Self {
        let mut normalized = BTreeMap::new();
        for (key, entry) in courses {
            let code = normalize_code(&key);
            if normalized.insert(code.clone(), entry).is_some() {
                warn!("Catalog key {key:?} repeats course {code}, keeping the later entry");
            }
        }
        Self {
            courses: normalized,
            templates,
        }
    }

    /// Parse a catalog from its two JSON documents
    ///
    /// # Arguments
    /// * `courses_json` - Object mapping course code to attributes
    /// * `templates_json` - Object mapping template name to semester entries
    ///
    /// # Errors
    /// Returns `CatalogError::Json` if either document is malformed
    pub fn from_json(courses_json: &str, templates_json: &str) -> Result<Self, CatalogError> {
        let courses: BTreeMap<String, CatalogCourse> = serde_json::from_str(courses_json)?;
        let templates: BTreeMap<String, Vec<TemplateEntry>> =
            serde_json::from_str(templates_json)?;
        Ok(Self::new(courses, templates))
    }

    /// The sample catalog compiled into the binary
    ///
    /// # Errors
    /// Returns `CatalogError::Json` if the bundled files are malformed
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_COURSES, BUNDLED_TEMPLATES)
    }

    /// Load a catalog from files, using the bundled document for any path not given
    ///
    /// # Errors
    /// Returns an error if a file cannot be read or parsed
    pub fn load(
        courses_path: Option<&Path>,
        templates_path: Option<&Path>,
    ) -> Result<Self, CatalogError> {
        let courses = match courses_path {
            Some(path) => read_file(path)?,
            None => BUNDLED_COURSES.to_string(),
        };
        let templates = match templates_path {
            Some(path) => read_file(path)?,
            None => BUNDLED_TEMPLATES.to_string(),
        };
        Self::from_json(&courses, &templates)
    }

    /// Number of courses in the catalog
    #[must_use]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether the catalog has no courses
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Courses whose code or title contains `query` (case-insensitive), sorted by code
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<(&str, &CatalogCourse)> {
        let needle = query.trim().to_lowercase();
        self.courses
            .iter()
            .filter(|(code, entry)| {
                needle.is_empty()
                    || code.to_lowercase().contains(&needle)
                    || entry.name.to_lowercase().contains(&needle)
            })
            .map(|(code, entry)| (code.as_str(), entry))
            .collect()
    }
}

impl CatalogLookup for Catalog {
    fn course(&self, code: &str) -> Option<&CatalogCourse> {
        self.courses
            .get(code)
            .or_else(|| self.courses.get(&normalize_code(code)))
    }

    fn templates(&self) -> &BTreeMap<String, Vec<TemplateEntry>> {
        &self.templates
    }
}

fn read_file(path: &Path) -> Result<String, CatalogError> {
    fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CreditsField {
    Number(f64),
    Text(String),
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn deserialize_credits<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<CreditsField>::deserialize(deserializer)?;
    let value = match raw {
        Some(CreditsField::Number(n)) => Some(n),
        Some(CreditsField::Text(text)) => text.trim().parse::<f64>().ok(),
        None => None,
    };
    Ok(value
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map(|n| n.round() as u32))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PrerequisitesField {
    Text(String),
    List(Vec<String>),
}

fn deserialize_prerequisites<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<PrerequisitesField>::deserialize(deserializer)?;
    Ok(match raw {
        Some(PrerequisitesField::Text(text)) => Some(text),
        Some(PrerequisitesField::List(list)) if !list.is_empty() => Some(list.join(", ")),
        _ => None,
    })
}
