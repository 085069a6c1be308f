//! Common domain types shared across Shopify Admin API responses.

use product_desk_core::Price;
use serde::{Deserialize, Serialize};

// =============================================================================
// Image Types
// =============================================================================

/// Product or variant image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Shopify image ID (absent on variant images).
    pub id: Option<String>,
    /// Image URL.
    pub url: String,
    /// Alt text for accessibility.
    pub alt_text: Option<String>,
}

// =============================================================================
// Money Types
// =============================================================================

/// Minimum and maximum variant price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    /// Cheapest variant.
    pub min: Price,
    /// Most expensive variant.
    pub max: Price,
}

// =============================================================================
// Pagination Types
// =============================================================================

/// Pagination information for cursor-based pagination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Whether there are more items after this page.
    pub has_next_page: bool,
    /// Whether there are items before this page.
    pub has_previous_page: bool,
    /// Cursor of the first item.
    pub start_cursor: Option<String>,
    /// Cursor for fetching the next page.
    pub end_cursor: Option<String>,
}
