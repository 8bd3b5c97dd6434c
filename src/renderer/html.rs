//! HTML generation from documents

use crate::dom::{Document, Element};

use super::HtmlConfig;

/// Elements written as a single self-closing tag
const VOID_ELEMENTS: &[&str] = &["img", "input", "meta", "br", "hr", "link"];

/// Build HTML output incrementally
pub struct HtmlBuilder {
    config: HtmlConfig,
    lines: Vec<String>,
    indent: usize,
}

impl HtmlBuilder {
    /// Create a new HTML builder
    pub fn new(config: HtmlConfig) -> Self {
        Self {
            config,
            lines: vec![],
            indent: 0,
        }
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    fn push_line(&mut self, line: String) {
        let indented = format!("{}{}", self.indent_str(), line);
        self.lines.push(indented);
    }

    /// Add an element and all of its descendants
    pub fn add_element(&mut self, element: &Element) {
        self.add_element_with_selection(element, None);
    }

    fn add_element_with_selection(&mut self, element: &Element, selected: Option<&str>) {
        let mut open = format!("<{}{}", element.tag, format_attributes(element));
        if element.tag == "option" && selected.is_some() && element.attr("value") == selected {
            open.push_str(" selected");
        }

        if VOID_ELEMENTS.contains(&element.tag.as_str()) {
            self.push_line(format!("{}/>", open));
            return;
        }

        let text = element.text.as_deref().map(escape_html).unwrap_or_default();
        if element.children.is_empty() {
            self.push_line(format!("{}>{}</{}>", open, text, element.tag));
            return;
        }

        // Options are marked from the select's current value
        let child_selection = if element.tag == "select" {
            element.value.as_deref()
        } else {
            None
        };

        self.push_line(format!("{}>{}", open, text));
        self.indent += 1;
        for child in &element.children {
            self.add_element_with_selection(child, child_selection);
        }
        self.indent = self.indent.saturating_sub(1);
        self.push_line(format!("</{}>", element.tag));
    }

    /// Add the children of an element without the element itself
    pub fn add_children(&mut self, element: &Element) {
        for child in &element.children {
            self.add_element(child);
        }
    }

    /// Build the final HTML string
    pub fn build(self) -> String {
        let nl = self.newline();
        let mut html = String::new();
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                html.push_str(nl);
            }
            html.push_str(line);
        }
        html
    }
}

/// Render a document to HTML
///
/// Standalone output is a complete page with the document root as its
/// `<body>`; otherwise only the root's children are written.
pub fn render_html(document: &Document, config: &HtmlConfig) -> String {
    let mut builder = HtmlBuilder::new(config.clone());

    if !config.standalone {
        builder.add_children(&document.root);
        return builder.build();
    }

    builder.push_line("<!DOCTYPE html>".to_string());
    builder.push_line(r#"<html lang="en">"#.to_string());
    builder.push_line("<head>".to_string());
    builder.indent += 1;
    builder.push_line(r#"<meta charset="utf-8"/>"#.to_string());
    builder.push_line(format!("<title>{}</title>", escape_html(&config.title)));
    builder.indent -= 1;
    builder.push_line("</head>".to_string());
    builder.add_element(&document.root);
    builder.push_line("</html>".to_string());

    let mut html = builder.build();
    html.push_str(if config.pretty_print { "\n" } else { "" });
    html
}

fn format_attributes(element: &Element) -> String {
    let mut attrs = String::new();

    if let Some(id) = &element.id {
        attrs.push_str(&format!(r#" id="{}""#, escape_html(id)));
    }
    if !element.classes.is_empty() {
        attrs.push_str(&format!(
            r#" class="{}""#,
            escape_html(&element.classes.join(" "))
        ));
    }
    for (name, value) in &element.attributes {
        attrs.push_str(&format!(r#" {}="{}""#, name, escape_html(value)));
    }
    if element.tag == "input" {
        if let Some(value) = &element.value {
            attrs.push_str(&format!(r#" value="{}""#, escape_html(value)));
        }
    }
    if let Some(display) = element.display {
        attrs.push_str(&format!(r#" style="display: {}""#, display.as_css()));
    }

    attrs
}

/// Escape special HTML characters in text and attribute values
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
