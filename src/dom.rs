//! In-memory document model and the target surface the renderer writes to
//!
//! The renderer never looks elements up by itself. It goes through the
//! [`Surface`] trait, which exposes the five named [`Slot`]s a page may
//! provide plus a class query over everything on the page. [`Document`] is
//! the in-memory implementation used by the CLI and the tests.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::events::{Action, EventKind, Listener};

/// Named containers a page may provide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    ItemsContainer,
    TagFilter,
    FeaturedContainer,
    TagCloud,
    SearchInput,
}

impl Slot {
    pub const ALL: [Slot; 5] = [
        Slot::SearchInput,
        Slot::TagFilter,
        Slot::ItemsContainer,
        Slot::FeaturedContainer,
        Slot::TagCloud,
    ];

    /// Element id of the slot on the page
    pub fn id(self) -> &'static str {
        match self {
            Slot::ItemsContainer => "items-container",
            Slot::TagFilter => "tag-filter",
            Slot::FeaturedContainer => "featured-container",
            Slot::TagCloud => "tag-cloud",
            Slot::SearchInput => "search-input",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Error)]
#[error("unknown slot '{0}' (expected one of: items-container, tag-filter, featured-container, tag-cloud, search-input)")]
pub struct UnknownSlot(pub String);

impl FromStr for Slot {
    type Err = UnknownSlot;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Slot::ALL
            .into_iter()
            .find(|slot| slot.id() == s)
            .ok_or_else(|| UnknownSlot(s.to_string()))
    }
}

/// Inline display state set by the filters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    Flex,
    None,
}

impl Display {
    pub fn as_css(self) -> &'static str {
        match self {
            Display::Flex => "flex",
            Display::None => "none",
        }
    }
}

/// A node in the document tree
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    /// Attributes other than id/class, in insertion order
    pub attributes: Vec<(String, String)>,
    /// Text preceding the children
    pub text: Option<String>,
    pub children: Vec<Element>,
    /// Inline display style; None means unset
    pub display: Option<Display>,
    /// Current value of a form control
    pub value: Option<String>,
    pub listeners: Vec<Listener>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn append(&mut self, child: Element) {
        self.children.push(child);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing any previous value in place
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Register an event listener
    pub fn listen(&mut self, kind: EventKind, action: Action) {
        self.listeners.push(Listener { kind, action });
    }

    /// Concatenated text of this element and all descendants
    pub fn text_content(&self) -> String {
        let mut out = self.text.clone().unwrap_or_default();
        for child in &self.children {
            out.push_str(&child.text_content());
        }
        out
    }

    /// First descendant (depth-first, excluding self) with the given tag
    pub fn find_descendant(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find_map(|child| {
            if child.tag == tag {
                Some(child)
            } else {
                child.find_descendant(tag)
            }
        })
    }

    /// Whether the element is currently shown
    pub fn is_visible(&self) -> bool {
        self.display != Some(Display::None)
    }

    fn find_by_id(&self, id: &str) -> Option<&Element> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_by_id(id))
    }

    fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_by_id_mut(id))
    }

    fn collect_with_class<'a>(&'a self, class: &str, out: &mut Vec<&'a Element>) {
        if self.has_class(class) {
            out.push(self);
        }
        for child in &self.children {
            child.collect_with_class(class, out);
        }
    }

    fn visit_with_class_mut(&mut self, class: &str, f: &mut dyn FnMut(&mut Element)) {
        if self.has_class(class) {
            f(self);
        }
        for child in &mut self.children {
            child.visit_with_class_mut(class, f);
        }
    }
}

/// The page as seen by the renderer
///
/// Every slot is optional; operations on a missing slot are no-ops.
pub trait Surface {
    fn slot(&self, slot: Slot) -> Option<&Element>;

    fn slot_mut(&mut self, slot: Slot) -> Option<&mut Element>;

    /// Run `f` on every element carrying `class`, in document order
    fn for_each_with_class(&mut self, class: &str, f: &mut dyn FnMut(&mut Element));
}

/// In-memory page
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub root: Element,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Empty page with a bare `<body>`
    pub fn new() -> Self {
        Self {
            root: Element::new("body"),
        }
    }

    /// Page shell providing every slot
    pub fn site_page() -> Self {
        Self::with_slots(&Slot::ALL)
    }

    /// Page shell providing only the given slots
    ///
    /// The search input sits in the header; the tag filter carries a
    /// default empty-valued option that clears the filter.
    pub fn with_slots(slots: &[Slot]) -> Self {
        let mut header = Element::new("header");
        let mut main = Element::new("main");

        for slot in Slot::ALL {
            if !slots.contains(&slot) {
                continue;
            }
            match slot {
                Slot::SearchInput => header.append(
                    Element::new("input")
                        .with_id(slot.id())
                        .with_attr("type", "search")
                        .with_attr("placeholder", "Search titles"),
                ),
                Slot::TagFilter => main.append(
                    Element::new("select").with_id(slot.id()).with_child(
                        Element::new("option")
                            .with_attr("value", "")
                            .with_text("All tags"),
                    ),
                ),
                Slot::ItemsContainer | Slot::FeaturedContainer | Slot::TagCloud => {
                    main.append(Element::new("div").with_id(slot.id()))
                }
            }
        }

        let mut root = Element::new("body");
        if !header.children.is_empty() {
            root.append(header);
        }
        root.append(main);
        Self { root }
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<&Element> {
        self.root.find_by_id(id)
    }

    pub fn get_element_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.root.find_by_id_mut(id)
    }

    /// All elements carrying `class`, in document order
    pub fn elements_with_class(&self, class: &str) -> Vec<&Element> {
        let mut out = Vec::new();
        self.root.collect_with_class(class, &mut out);
        out
    }
}

impl Surface for Document {
    fn slot(&self, slot: Slot) -> Option<&Element> {
        self.get_element_by_id(slot.id())
    }

    fn slot_mut(&mut self, slot: Slot) -> Option<&mut Element> {
        self.get_element_by_id_mut(slot.id())
    }

    fn for_each_with_class(&mut self, class: &str, f: &mut dyn FnMut(&mut Element)) {
        self.root.visit_with_class_mut(class, f);
    }
}
