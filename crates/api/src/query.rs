//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// `?q=` for entry search.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// `?text=` for markdown preview.
#[derive(Debug, Default, Deserialize)]
pub struct PreviewParams {
    pub text: Option<String>,
}
