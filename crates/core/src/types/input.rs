//! Mutation input and field-level error types shared by the form and the API client.

use serde::{Deserialize, Serialize};

use super::{ProductStatus, TagList};

/// Fields sent to `productCreate` and `productUpdate`.
///
/// Serializes with the Admin API's camelCase field names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    /// Product title.
    pub title: String,
    /// HTML description.
    pub description_html: String,
    /// Product type/category.
    pub product_type: String,
    /// Vendor name.
    pub vendor: String,
    /// Publication status.
    pub status: ProductStatus,
    /// Tags (replaces existing tags on update).
    pub tags: TagList,
}

/// A field-level validation failure reported by the platform (`userErrors`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserError {
    /// Path to the offending input field, e.g. `["title"]`.
    #[serde(default)]
    pub field: Option<Vec<String>>,
    /// Error message.
    pub message: String,
}

impl std::fmt::Display for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.field.as_deref() {
            Some(path) if !path.is_empty() => write!(f, "{}: {}", path.join("."), self.message),
            _ => f.write_str(&self.message),
        }
    }
}
