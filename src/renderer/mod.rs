//! HTML renderer for populated documents
//!
//! This module takes a [`Document`](crate::dom::Document) and produces an
//! HTML string, either a full page or a body fragment.

pub mod config;
pub mod html;

pub use config::HtmlConfig;
pub use html::render_html;
