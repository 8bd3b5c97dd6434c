//! Content catalog: the items rendered into collection pages
//!
//! A catalog maps each [`Category`] to an ordered list of [`Item`]s. It is
//! loaded once (from TOML or the bundled sample) and never mutated; the
//! renderer only ever borrows it.

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

use chrono::NaiveDate;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

use crate::error::CatalogError;

/// Sample content shipped with the crate
const SAMPLE_CATALOG: &str = include_str!("../data/sample-catalog.toml");

/// Long-form en-US date, e.g. "May 15, 2023"; the year is not zero-padded
pub const LONG_DATE_FORMAT: &str = "%B %-d, %-Y";

/// Content categories, in catalog iteration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    ResearchTalks,
    Educational,
    TechNotes,
}

impl Category {
    /// All categories in catalog order
    pub const ALL: [Category; 3] = [
        Category::ResearchTalks,
        Category::Educational,
        Category::TechNotes,
    ];

    /// Category name as it appears in URLs and catalog files
    pub fn as_str(self) -> &'static str {
        match self {
            Category::ResearchTalks => "research-talks",
            Category::Educational => "educational",
            Category::TechNotes => "tech-notes",
        }
    }

    fn index(self) -> usize {
        match self {
            Category::ResearchTalks => 0,
            Category::Educational => 1,
            Category::TechNotes => 2,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single piece of content
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Item {
    pub title: String,
    /// Native TOML date (`2023-05-15`) or quoted string (`"2023-05-15"`)
    #[serde(deserialize_with = "deserialize_date")]
    pub date: NaiveDate,
    /// Category labels in display order; duplicates are kept
    pub tags: Vec<String>,
    /// Site-relative URL of the content page
    pub path: String,
    /// Site-relative URL of the preview image
    #[serde(default)]
    pub thumbnail: Option<String>,
}

fn deserialize_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
    match toml::Value::deserialize(deserializer)? {
        toml::Value::String(text) => text
            .parse::<NaiveDate>()
            .map_err(|e| D::Error::custom(format!("invalid date '{}': {}", text, e))),
        toml::Value::Datetime(datetime) => match (datetime.date, datetime.time) {
            (Some(date), None) => NaiveDate::from_ymd_opt(
                i32::from(date.year),
                u32::from(date.month),
                u32::from(date.day),
            )
            .ok_or_else(|| D::Error::custom(format!("invalid date '{}'", datetime))),
            _ => Err(D::Error::custom(format!(
                "expected a date without time, found '{}'",
                datetime
            ))),
        },
        other => Err(D::Error::custom(format!(
            "expected a date, found {}",
            other.type_str()
        ))),
    }
}

impl Item {
    pub fn new(
        title: impl Into<String>,
        date: NaiveDate,
        tags: impl IntoIterator<Item = impl Into<String>>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            date,
            tags: tags.into_iter().map(Into::into).collect(),
            path: path.into(),
            thumbnail: None,
        }
    }

    /// Set the thumbnail URL
    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }

    /// Comma-joined tag list, as stored on rendered cards
    pub fn joined_tags(&self) -> String {
        self.tags.join(",")
    }

    /// Date in long form ("Month D, YYYY")
    pub fn long_date(&self) -> String {
        self.date.format(LONG_DATE_FORMAT).to_string()
    }
}

/// Immutable mapping from category to ordered items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    /// Optional name for the catalog
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
    sections: [Vec<Item>; 3],
}

/// TOML structure for deserializing catalogs
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlCatalog {
    metadata: Option<TomlMetadata>,
    #[serde(rename = "research-talks", default)]
    research_talks: Vec<Item>,
    #[serde(default)]
    educational: Vec<Item>,
    #[serde(rename = "tech-notes", default)]
    tech_notes: Vec<Item>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

impl Catalog {
    /// Catalog with no items in any category
    pub fn empty() -> Self {
        Self {
            name: None,
            description: None,
            sections: Default::default(),
        }
    }

    /// Build a catalog from (category, items) pairs
    ///
    /// Iteration order is always [`Category::ALL`]; a category given more
    /// than once has its items appended in the order supplied.
    pub fn from_items(entries: impl IntoIterator<Item = (Category, Vec<Item>)>) -> Self {
        let mut catalog = Self::empty();
        for (category, items) in entries {
            catalog.sections[category.index()].extend(items);
        }
        catalog
    }

    /// Load catalog from TOML file
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load catalog from TOML string
    pub fn from_str(content: &str) -> Result<Self, CatalogError> {
        let parsed: TomlCatalog = toml::from_str(content)?;

        Ok(Catalog {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            sections: [parsed.research_talks, parsed.educational, parsed.tech_notes],
        })
    }

    /// Items of one category, in catalog order
    pub fn items(&self, category: Category) -> &[Item] {
        &self.sections[category.index()]
    }

    /// Every category with its items, in catalog order
    pub fn sections(&self) -> impl Iterator<Item = (Category, &[Item])> + '_ {
        Category::ALL
            .into_iter()
            .map(move |category| (category, self.items(category)))
    }

    /// First item of every non-empty category
    pub fn featured(&self) -> Vec<&Item> {
        self.sections()
            .filter_map(|(_, items)| items.first())
            .collect()
    }

    /// Distinct tags of one category, sorted
    pub fn category_tags(&self, category: Category) -> Vec<&str> {
        sorted_tags(self.items(category))
    }

    /// Distinct tags across all categories, sorted
    pub fn all_tags(&self) -> Vec<&str> {
        sorted_tags(self.sections.iter().flatten())
    }

    /// Total number of items
    pub fn len(&self) -> usize {
        self.sections.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn sorted_tags<'a>(items: impl IntoIterator<Item = &'a Item>) -> Vec<&'a str> {
    items
        .into_iter()
        .flat_map(|item| item.tags.iter().map(String::as_str))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

impl Default for Catalog {
    fn default() -> Self {
        Self::from_str(SAMPLE_CATALOG).expect("Sample catalog should be valid TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_sample_catalog() {
        let catalog = Catalog::default();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.name.as_deref(), Some("Sample collections"));
        for category in Category::ALL {
            assert_eq!(catalog.items(category).len(), 1);
        }
        assert_eq!(
            catalog.items(Category::ResearchTalks)[0].title,
            "Quantum Error Mitigation in NISQ Devices"
        );
    }

    #[test]
    fn test_category_names() {
        let names: Vec<_> = Category::ALL.iter().map(|c| c.to_string()).collect();
        assert_eq!(names, vec!["research-talks", "educational", "tech-notes"]);
    }

    #[test]
    fn test_long_date() {
        let item = Item::new("t", date(2023, 5, 15), ["a"], "/a.html");
        assert_eq!(item.long_date(), "May 15, 2023");
        let item = Item::new("t", date(2022, 7, 1), ["a"], "/a.html");
        assert_eq!(item.long_date(), "July 1, 2022");
        let item = Item::new("t", date(999, 1, 2), ["a"], "/a.html");
        assert_eq!(item.long_date(), "January 2, 999");
    }

    #[test]
    fn test_joined_tags_keeps_duplicates() {
        let item = Item::new("t", date(2023, 1, 1), ["b", "a", "b"], "/t.html");
        assert_eq!(item.joined_tags(), "b,a,b");
    }

    #[test]
    fn test_category_tags_sorted_and_distinct() {
        let catalog = Catalog::from_items([(
            Category::Educational,
            vec![
                Item::new("one", date(2023, 1, 1), ["zeta", "alpha"], "/1"),
                Item::new("two", date(2023, 1, 2), ["alpha", "mu", "mu"], "/2"),
            ],
        )]);
        assert_eq!(
            catalog.category_tags(Category::Educational),
            vec!["alpha", "mu", "zeta"]
        );
        assert!(catalog.category_tags(Category::TechNotes).is_empty());
    }

    #[test]
    fn test_all_tags_union() {
        let catalog = Catalog::default();
        assert_eq!(
            catalog.all_tags(),
            vec![
                "educational",
                "error-mitigation",
                "fundamentals",
                "hardware",
                "nisq",
                "quantum-computing",
                "qubit-design",
                "superconducting",
            ]
        );
    }

    #[test]
    fn test_featured_skips_empty_categories() {
        let catalog = Catalog::from_items([
            (
                Category::TechNotes,
                vec![
                    Item::new("first note", date(2023, 1, 1), ["x"], "/n1"),
                    Item::new("second note", date(2023, 1, 2), ["y"], "/n2"),
                ],
            ),
            (
                Category::ResearchTalks,
                vec![Item::new("talk", date(2023, 2, 1), ["z"], "/t1")],
            ),
        ]);
        let titles: Vec<_> = catalog.featured().iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["talk", "first note"]);
    }

    #[test]
    fn test_parse_without_metadata_or_thumbnail() {
        let toml_str = r#"
[[tech-notes]]
title = "Note"
date = "2024-02-29"
tags = []
path = "/content/tech-notes/note.html"
"#;
        let catalog = Catalog::from_str(toml_str).expect("Should parse");
        assert_eq!(catalog.name, None);
        let items = catalog.items(Category::TechNotes);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].thumbnail, None);
        assert_eq!(items[0].date, date(2024, 2, 29));
        assert!(catalog.items(Category::ResearchTalks).is_empty());
    }

    #[test]
    fn test_missing_field_is_parse_error() {
        let toml_str = r#"
[[educational]]
title = "No tags"
date = "2022-07-10"
path = "/content/educational/x.html"
"#;
        let err = Catalog::from_str(toml_str).unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
        assert!(err.to_string().contains("tags"));
    }

    #[test]
    fn test_native_toml_date() {
        let toml_str = r#"
[[educational]]
title = "Unquoted"
date = 2022-07-10
tags = []
path = "/t.html"
"#;
        let catalog = Catalog::from_str(toml_str).expect("Should parse");
        assert_eq!(catalog.items(Category::Educational)[0].date, date(2022, 7, 10));
    }

    #[test]
    fn test_datetime_with_time_rejected() {
        let toml_str = r#"
[[educational]]
title = "Timed"
date = 2022-07-10T09:30:00
tags = []
path = "/t.html"
"#;
        let err = Catalog::from_str(toml_str).unwrap_err();
        assert!(err.to_string().contains("without time"), "got: {}", err);
    }

    #[test]
    fn test_invalid_date_is_parse_error() {
        let toml_str = r#"
[[educational]]
title = "Bad date"
date = "2022-13-40"
tags = ["x"]
path = "/x.html"
"#;
        let err = Catalog::from_str(toml_str).unwrap_err();
        assert!(matches!(err, CatalogError::Parse { span: Some(_), .. }));
    }

    #[test]
    fn test_unknown_category_rejected() {
        let toml_str = r#"
[[podcasts]]
title = "Nope"
date = "2022-07-10"
tags = []
path = "/x.html"
"#;
        assert!(Catalog::from_str(toml_str).is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Catalog::from_file(Path::new("/nonexistent/catalog.toml")).unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }
}
