//! Request DTOs for the HTTP API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Maximum allowed title length in characters
pub const MAX_TITLE_LENGTH: usize = 256;

/// Request body for creating (POST /api/items) or replacing
/// (PUT /api/items/:id) an item
///
/// # Fields
/// - `title`: Item title, required
/// - `body`: Free-form text (defaults to empty)
#[derive(Debug, Clone, Deserialize)]
pub struct ItemRequest {
    pub title: String,
    #[serde(default)]
    pub body: String,
}

impl ItemRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.title.trim().is_empty() {
            return Some("Title cannot be empty".to_string());
        }
        if self.title.chars().count() > MAX_TITLE_LENGTH {
            return Some(format!(
                "Title exceeds maximum length of {} characters",
                MAX_TITLE_LENGTH
            ));
        }
        None
    }
}
