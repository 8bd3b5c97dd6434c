//! Collection Pages - render the collection pages of a static content site
//!
//! This library resolves a page path to a route, populates the page's
//! content slots from a catalog, replays the page's filters, and writes
//! the result as HTML.
//!
//! # Example
//!
//! ```rust
//! use collection_pages::{render_page, RenderConfig};
//!
//! let html = render_page("/research-talks/", &RenderConfig::default());
//! assert!(html.contains("collection-item"));
//! assert!(html.contains("Quantum Error Mitigation in NISQ Devices"));
//! ```

pub mod catalog;
pub mod dom;
pub mod error;
pub mod events;
pub mod page;
pub mod renderer;
pub mod route;

pub use catalog::{Catalog, Category, Item};
pub use dom::{Display, Document, Element, Slot, Surface};
pub use error::CatalogError;
pub use events::{dispatch, Dispatch, Event};
pub use page::{filter_items_by_tag, search_titles, Renderer};
pub use renderer::{render_html, HtmlConfig};
pub use route::Route;

/// Configuration for the complete render pipeline
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Content to render
    pub catalog: Catalog,
    /// HTML output configuration
    pub html: HtmlConfig,
    /// Slots present in the page shell
    pub slots: Vec<Slot>,
    /// Tag selected in the tag filter after rendering
    pub tag_filter: Option<String>,
    /// Text typed into the search box after rendering
    pub search: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            catalog: Catalog::default(),
            html: HtmlConfig::default(),
            slots: Slot::ALL.to_vec(),
            tag_filter: None,
            search: None,
        }
    }
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the catalog
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Set the HTML configuration
    pub fn with_html(mut self, config: HtmlConfig) -> Self {
        self.html = config;
        self
    }

    /// Set which slots the page shell provides
    pub fn with_slots(mut self, slots: impl IntoIterator<Item = Slot>) -> Self {
        self.slots = slots.into_iter().collect();
        self
    }

    /// Select a tag in the tag filter after rendering
    pub fn with_tag_filter(mut self, tag: impl Into<String>) -> Self {
        self.tag_filter = Some(tag.into());
        self
    }

    /// Type a query into the search box after rendering
    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search = Some(query.into());
        self
    }
}

/// Render the page at `path` into an in-memory document
///
/// The configured tag filter is applied first, then the search query, each
/// through the listeners the renderer registered. Neither takes effect if
/// the page lacks the corresponding slot or listener, and a tag that is not
/// one of the filter's options is ignored with a warning.
pub fn render_document(path: &str, config: &RenderConfig) -> Document {
    let route = Route::resolve(path);
    let mut document = Document::with_slots(&config.slots);

    Renderer::new(&config.catalog).render(&mut document, route);

    if let Some(tag) = &config.tag_filter {
        dispatch(
            &mut document,
            Slot::TagFilter,
            Event::Change { value: tag.clone() },
        );
    }
    if let Some(query) = &config.search {
        dispatch(
            &mut document,
            Slot::SearchInput,
            Event::Input {
                value: query.clone(),
            },
        );
    }

    document
}

/// Render the page at `path` to HTML
///
/// # Example
///
/// ```rust
/// use collection_pages::{render_page, HtmlConfig, RenderConfig};
///
/// let config = RenderConfig::new()
///     .with_html(HtmlConfig::new().with_standalone(false))
///     .with_tag_filter("hardware");
///
/// let html = render_page("/tech-notes/", &config);
/// assert!(html.contains(r#"style="display: flex""#));
/// ```
pub fn render_page(path: &str, config: &RenderConfig) -> String {
    render_html(&render_document(path, config), &config.html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_category_page() {
        let html = render_page("/research-talks/index.html", &RenderConfig::default());
        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains(r#"data-tags="quantum-computing,error-mitigation,nisq""#));
        assert!(html.contains("May 15, 2023"));
        assert!(!html.contains("featured-item"));
    }

    #[test]
    fn test_render_home_page() {
        let html = render_page("/", &RenderConfig::default());
        assert_eq!(html.matches(r#"class="featured-item""#).count(), 3);
        assert!(html.contains(r##"<a class="tag" href="#">qubit-design</a>"##));
        assert!(!html.contains("collection-item"));
    }

    #[test]
    fn test_render_other_page() {
        let document = render_document("/about.html", &RenderConfig::default());
        assert!(document.elements_with_class("collection-item").is_empty());
        assert!(document.elements_with_class("featured-item").is_empty());
    }

    #[test]
    fn test_tag_filter_then_search() {
        let catalog = Catalog::from_str(
            r#"
[[research-talks]]
title = "First"
date = 2023-01-01
tags = ["a"]
path = "/first.html"

[[research-talks]]
title = "Second"
date = 2023-01-02
tags = ["b"]
path = "/second.html"
"#,
        )
        .unwrap();
        let config = RenderConfig::new()
            .with_catalog(catalog)
            .with_tag_filter("a")
            .with_search("");
        let document = render_document("/research-talks/", &config);
        let cards = document.elements_with_class("collection-item");
        // Search runs last and does not respect the tag filter
        assert!(cards.iter().all(|c| c.is_visible()));
        assert_eq!(
            document.slot(Slot::TagFilter).unwrap().value.as_deref(),
            Some("a")
        );
    }

    #[test]
    fn test_tag_filter_not_among_options_is_ignored() {
        let config = RenderConfig::new().with_tag_filter("no-such-tag");
        let document = render_document("/research-talks/", &config);
        let cards = document.elements_with_class("collection-item");
        assert_eq!(cards[0].display, None);
        assert_eq!(document.slot(Slot::TagFilter).unwrap().value, None);
    }

    #[test]
    fn test_tag_filter_ignored_without_select() {
        let config = RenderConfig::new()
            .with_slots([Slot::ItemsContainer])
            .with_tag_filter("no-such-tag");
        let document = render_document("/research-talks/", &config);
        let cards = document.elements_with_class("collection-item");
        assert_eq!(cards[0].display, None);
    }
}
