//! Page events and the listeners the renderer registers
//!
//! Listeners are plain data attached to elements. [`dispatch`] replays an
//! event against a surface: it finds the target, updates its value the way
//! a browser would, and runs the matching listeners to completion.

use tracing::{debug, info, warn};

use crate::dom::{Element, Slot, Surface};
use crate::page::{filter_items_by_tag, search_titles};

/// Kind of event a listener reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Change,
    Input,
    Click,
}

/// What a listener does when triggered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Show cards whose tag string contains the target's value
    FilterByTag,
    /// Show cards whose title contains the target's value, ignoring case
    SearchTitles,
    /// Suppress navigation and log the tag
    LogTag(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listener {
    pub kind: EventKind,
    pub action: Action,
}

/// An event fired at a slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A select control took a new value
    Change { value: String },
    /// A text input took a new value
    Input { value: String },
    /// The `child`-th child of the slot was clicked
    Click { child: usize },
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Change { .. } => EventKind::Change,
            Event::Input { .. } => EventKind::Input,
            Event::Click { .. } => EventKind::Click,
        }
    }
}

/// Outcome of a dispatched event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dispatch {
    /// Number of listeners that ran
    pub handled: usize,
    /// Whether a listener suppressed the default action
    pub default_prevented: bool,
}

/// Fire `event` at `slot` and run its listeners
///
/// A missing slot, a missing click target, or a target without matching
/// listeners leaves the surface untouched.
pub fn dispatch<S: Surface + ?Sized>(surface: &mut S, slot: Slot, event: Event) -> Dispatch {
    let kind = event.kind();

    let Some(element) = surface.slot_mut(slot) else {
        debug!(%slot, "event target missing");
        return Dispatch::default();
    };

    let (target, value) = match event {
        Event::Change { value } if element.tag == "select" && !has_option(element, &value) => {
            warn!(%slot, %value, "no such option, ignoring change");
            return Dispatch::default();
        }
        Event::Change { value } | Event::Input { value } => {
            element.value = Some(value.clone());
            (element, value)
        }
        Event::Click { child } => match element.children.get_mut(child) {
            Some(target) => {
                let value = target.value.clone().unwrap_or_default();
                (target, value)
            }
            None => {
                debug!(%slot, child, "click target missing");
                return Dispatch::default();
            }
        },
    };

    let actions: Vec<Action> = target
        .listeners
        .iter()
        .filter(|l| l.kind == kind)
        .map(|l| l.action.clone())
        .collect();

    let mut outcome = Dispatch::default();
    for action in actions {
        match action {
            Action::FilterByTag => filter_items_by_tag(surface, &value),
            Action::SearchTitles => search_titles(surface, &value),
            Action::LogTag(tag) => {
                outcome.default_prevented = true;
                info!(%tag, "tag clicked");
            }
        }
        outcome.handled += 1;
    }
    outcome
}

/// Whether a select offers `value` among its options
fn has_option(select: &Element, value: &str) -> bool {
    select
        .children
        .iter()
        .any(|option| option.tag == "option" && option.attr("value") == Some(value))
}
