//! Integration tests for loading catalogs from TOML files

use std::path::Path;

use collection_pages::{Catalog, CatalogError, Category};

#[test]
fn test_load_from_file() {
    let catalog = Catalog::from_file(Path::new("tests/fixtures/research-only.toml"))
        .expect("Should load");
    assert_eq!(catalog.name.as_deref(), Some("Research talks"));
    assert_eq!(catalog.len(), 1);
    assert!(catalog.items(Category::Educational).is_empty());
    assert!(catalog.items(Category::TechNotes).is_empty());
}

#[test]
fn test_duplicate_tags_are_kept_on_items() {
    let catalog = Catalog::from_file(Path::new("tests/fixtures/mixed.toml")).unwrap();
    let wiring = &catalog.items(Category::TechNotes)[1];
    assert_eq!(wiring.tags, vec!["hardware", "cryogenics", "hardware"]);
    assert_eq!(wiring.joined_tags(), "hardware,cryogenics,hardware");
}

#[test]
fn test_missing_tags_reports_location() {
    let path = Path::new("tests/fixtures/missing-tags.toml");
    let source = std::fs::read_to_string(path).unwrap();
    let err = Catalog::from_str(&source).unwrap_err();

    assert!(matches!(err, CatalogError::Parse { .. }));
    let report = err.format(&source, "missing-tags.toml");
    assert!(report.contains("tags"), "report was: {}", report);
}

#[test]
fn test_unknown_item_field_rejected() {
    let result = Catalog::from_str(
        r#"
[[educational]]
title = "Intro"
date = "2022-07-10"
tags = []
path = "/intro.html"
author = "someone"
"#,
    );
    assert!(matches!(result, Err(CatalogError::Parse { .. })));
}

#[test]
fn test_empty_catalog_file() {
    let catalog = Catalog::from_str("").expect("Should parse");
    assert!(catalog.is_empty());
    assert!(catalog.featured().is_empty());
    assert!(catalog.all_tags().is_empty());
}
