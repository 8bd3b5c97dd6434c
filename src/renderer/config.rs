//! Configuration for HTML rendering

/// Configuration options for HTML output
#[derive(Debug, Clone)]
pub struct HtmlConfig {
    /// Whether to wrap the body in a complete `<!DOCTYPE html>` page
    pub standalone: bool,

    /// Whether to format output with indentation
    pub pretty_print: bool,

    /// Page title used when standalone
    pub title: String,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            standalone: true,
            pretty_print: true,
            title: "Collections".to_string(),
        }
    }
}

impl HtmlConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether output is a complete page
    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    /// Set whether to pretty-print output
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    /// Set the page title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}
