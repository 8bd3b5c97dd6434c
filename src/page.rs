//! Collection page rendering
//!
//! Populates the slots of a [`Surface`] from a [`Catalog`] according to a
//! [`Route`], and implements the two card filters (tag and title search)
//! that the registered listeners run.

use tracing::debug;

use crate::catalog::{Catalog, Category, Item};
use crate::dom::{Display, Element, Slot, Surface};
use crate::events::{Action, EventKind};
use crate::route::Route;

/// Class carried by every listing card; both filters select on it
pub const COLLECTION_ITEM_CLASS: &str = "collection-item";

/// Attribute holding a card's comma-joined tags
pub const DATA_TAGS_ATTR: &str = "data-tags";

/// Text shown when an item has no thumbnail
pub const PLACEHOLDER_TEXT: &str = "No Preview";

/// Renders catalog content into a surface
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'c> {
    catalog: &'c Catalog,
}

impl<'c> Renderer<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }

    /// Render the page selected by `route`, then wire title search
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, route: Route) {
        debug!(%route, "rendering page");
        match route {
            Route::Category(category) => self.populate_category_items(surface, category),
            Route::Home => {
                self.populate_featured_items(surface);
                self.populate_tag_cloud(surface);
            }
            Route::Other => debug!("no collection content for this page"),
        }
        wire_search(surface);
    }

    /// Append one card per item of `category`, then fill the tag filter
    pub fn populate_category_items<S: Surface + ?Sized>(&self, surface: &mut S, category: Category) {
        let Some(container) = surface.slot_mut(Slot::ItemsContainer) else {
            debug!(slot = %Slot::ItemsContainer, "slot missing, skipping category items");
            return;
        };

        let items = self.catalog.items(category);
        for item in items {
            container.append(collection_card(item));
        }
        debug!(%category, count = items.len(), "rendered category items");

        self.populate_tag_filter(surface, category);
    }

    /// Append one option per distinct tag of `category` and listen for changes
    pub fn populate_tag_filter<S: Surface + ?Sized>(&self, surface: &mut S, category: Category) {
        let Some(filter) = surface.slot_mut(Slot::TagFilter) else {
            debug!(slot = %Slot::TagFilter, "slot missing, skipping tag filter");
            return;
        };

        let tags = self.catalog.category_tags(category);
        for tag in &tags {
            filter.append(Element::new("option").with_attr("value", *tag).with_text(*tag));
        }
        filter.listen(EventKind::Change, Action::FilterByTag);
        debug!(%category, count = tags.len(), "populated tag filter");
    }

    /// Append the first item of each non-empty category as a featured card
    pub fn populate_featured_items<S: Surface + ?Sized>(&self, surface: &mut S) {
        let Some(container) = surface.slot_mut(Slot::FeaturedContainer) else {
            debug!(slot = %Slot::FeaturedContainer, "slot missing, skipping featured items");
            return;
        };

        let featured = self.catalog.featured();
        for item in &featured {
            container.append(featured_card(item));
        }
        debug!(count = featured.len(), "rendered featured items");
    }

    /// Append one link per distinct tag across the catalog
    ///
    /// Clicking a link only suppresses navigation and logs the tag.
    pub fn populate_tag_cloud<S: Surface + ?Sized>(&self, surface: &mut S) {
        let Some(container) = surface.slot_mut(Slot::TagCloud) else {
            debug!(slot = %Slot::TagCloud, "slot missing, skipping tag cloud");
            return;
        };

        let tags = self.catalog.all_tags();
        for tag in &tags {
            let mut link = Element::new("a")
                .with_class("tag")
                .with_attr("href", "#")
                .with_text(*tag);
            link.listen(EventKind::Click, Action::LogTag(tag.to_string()));
            container.append(link);
        }
        debug!(count = tags.len(), "rendered tag cloud");
    }
}

/// Listen for input on the search box, if the page has one
pub fn wire_search<S: Surface + ?Sized>(surface: &mut S) {
    match surface.slot_mut(Slot::SearchInput) {
        Some(input) => input.listen(EventKind::Input, Action::SearchTitles),
        None => debug!(slot = %Slot::SearchInput, "slot missing, search disabled"),
    }
}

/// Show cards whose tag string contains `tag`; an empty tag shows all
///
/// Matching is a plain substring test on the joined tag string, so a tag
/// also matches any longer tag containing it.
pub fn filter_items_by_tag<S: Surface + ?Sized>(surface: &mut S, tag: &str) {
    let mut shown = 0usize;
    surface.for_each_with_class(COLLECTION_ITEM_CLASS, &mut |card: &mut Element| {
        let tags = card.attr(DATA_TAGS_ATTR).unwrap_or_default();
        let visible = tag.is_empty() || tags.contains(tag);
        card.display = Some(if visible { Display::Flex } else { Display::None });
        shown += usize::from(visible);
    });
    debug!(tag, shown, "filtered items by tag");
}

/// Show cards whose title contains `query`, ignoring case
///
/// Overrides whatever the tag filter last decided.
pub fn search_titles<S: Surface + ?Sized>(surface: &mut S, query: &str) {
    let query = query.to_lowercase();
    let mut shown = 0usize;
    surface.for_each_with_class(COLLECTION_ITEM_CLASS, &mut |card: &mut Element| {
        let title = card
            .find_descendant("h3")
            .map(Element::text_content)
            .unwrap_or_default()
            .to_lowercase();
        let visible = title.contains(&query);
        card.display = Some(if visible { Display::Flex } else { Display::None });
        shown += usize::from(visible);
    });
    debug!(query = %query, shown, "filtered items by title");
}

fn thumbnail(item: &Item) -> Element {
    let block = Element::new("div").with_class("item-thumbnail");
    match &item.thumbnail {
        Some(src) => block.with_child(
            Element::new("img")
                .with_attr("src", src)
                .with_attr("alt", &item.title),
        ),
        None => block.with_child(
            Element::new("div")
                .with_class("placeholder-thumbnail")
                .with_text(PLACEHOLDER_TEXT),
        ),
    }
}

/// Listing card: thumbnail, title, date and tag chips
fn collection_card(item: &Item) -> Element {
    let tags = item.tags.iter().fold(
        Element::new("div").with_class("tags"),
        |tags, tag| tags.with_child(Element::new("span").with_class("tag").with_text(tag)),
    );

    let details = Element::new("div")
        .with_class("item-details")
        .with_child(Element::new("h3").with_text(&item.title))
        .with_child(Element::new("p").with_class("meta").with_text(item.long_date()))
        .with_child(tags);

    Element::new("a")
        .with_class(COLLECTION_ITEM_CLASS)
        .with_attr("href", &item.path)
        .with_attr(DATA_TAGS_ATTR, item.joined_tags())
        .with_child(thumbnail(item))
        .with_child(details)
}

/// Home page card: thumbnail and title only
fn featured_card(item: &Item) -> Element {
    Element::new("a")
        .with_class("featured-item")
        .with_attr("href", &item.path)
        .with_child(thumbnail(item))
        .with_child(Element::new("h3").with_text(&item.title))
}
