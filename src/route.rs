//! Page routing: which rendering a page path selects

use std::fmt;

use crate::catalog::Category;

/// Rendering selected for a page, resolved once from its path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Category listing page
    Category(Category),
    /// Home page: featured grid and tag cloud
    Home,
    /// Any other page; nothing is rendered
    Other,
}

impl Route {
    /// Resolve a URL path to a route
    ///
    /// Category names match anywhere in the path and are tried in catalog
    /// order, so `/educational/tech-notes.html` is an educational page.
    /// The home page is exactly `/` or any path containing `/index.html`.
    pub fn resolve(path: &str) -> Self {
        for category in Category::ALL {
            let segment = format!("/{}", category.as_str());
            if path.contains(&segment) {
                return Route::Category(category);
            }
        }

        if path == "/" || path.contains("/index.html") {
            Route::Home
        } else {
            Route::Other
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Category(category) => write!(f, "category:{}", category),
            Route::Home => f.write_str("home"),
            Route::Other => f.write_str("other"),
        }
    }
}
