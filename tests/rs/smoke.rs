//! Integration smoke tests for `course_planner`

use course_planner::core::catalog::{Catalog, CatalogLookup};
use course_planner::get_version;

#[test]
fn version_is_not_empty() {
    let v = get_version();
    assert!(!v.trim().is_empty());
}

#[test]
fn bundled_catalog_loads() {
    let catalog = Catalog::bundled().expect("bundled catalog should parse");
    assert!(!catalog.is_empty());
    assert!(catalog.template("Computer Science B.S.").is_some());
}
