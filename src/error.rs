//! Error types for catalog loading

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Errors that can occur when loading or parsing a catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog TOML: {message}")]
    Parse {
        span: Option<Span>,
        message: String,
    },
}

impl From<toml::de::Error> for CatalogError {
    fn from(err: toml::de::Error) -> Self {
        // toml reports truncated input with an empty message
        let message = match err.message().trim() {
            "" => "unexpected end of input".to_string(),
            message => message.to_string(),
        };
        CatalogError::Parse {
            span: err.span(),
            message,
        }
    }
}

impl CatalogError {
    /// Format the error with source context using ariadne
    ///
    /// Errors without a span (I/O failures, spanless TOML errors) fall back
    /// to their plain `Display` form.
    pub fn format(&self, source: &str, filename: &str) -> String {
        let (span, message) = match self {
            CatalogError::Parse {
                span: Some(span),
                message,
            } => (span.clone(), message),
            _ => return self.to_string(),
        };

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message("invalid catalog")
            .with_label(
                Label::new((filename, span))
                    .with_message(message)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}
