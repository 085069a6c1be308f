//! Product domain types for Shopify Admin API.

use chrono::{DateTime, Utc};
use product_desk_core::listing::Listable;
use product_desk_core::{CollectionId, Price, ProductId, ProductStatus, TagList, VariantId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::common::{Image, PageInfo, PriceRange};

// =============================================================================
// Product Types
// =============================================================================

/// A product as listed on the products page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Product ID.
    pub id: ProductId,
    /// Numeric ID used in legacy REST URLs.
    pub legacy_resource_id: String,
    /// Product title.
    pub title: String,
    /// Plain text description.
    pub description: String,
    /// URL handle.
    pub handle: String,
    /// Product type/category.
    pub product_type: String,
    /// Vendor name.
    pub vendor: String,
    /// Product tags.
    pub tags: TagList,
    /// Product status (Active, Draft, Archived).
    pub status: ProductStatus,
    /// Creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    pub updated_at: Option<DateTime<Utc>>,
    /// Featured image.
    pub featured_image: Option<Image>,
    /// First product images.
    pub images: Vec<Image>,
    /// First product variants.
    pub variants: Vec<ProductVariant>,
    /// Variant price range.
    pub price_range: Option<PriceRange>,
    /// Product options (Size, Color, ...).
    pub options: Vec<ProductOption>,
    /// Search engine listing.
    pub seo: Seo,
    /// First collections the product belongs to.
    pub collections: Vec<CollectionRef>,
    /// Total inventory quantity across all variants.
    pub total_inventory: i64,
    /// Number of variants.
    pub total_variants: i64,
}

impl Listable for Product {
    fn id(&self) -> &ProductId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn status(&self) -> ProductStatus {
        self.status
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    fn min_price(&self) -> Option<Decimal> {
        self.price_range.as_ref().map(|r| r.min.amount)
    }
}

/// A product variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductVariant {
    /// Variant ID.
    pub id: VariantId,
    /// Numeric ID used in legacy REST URLs.
    pub legacy_resource_id: String,
    /// Variant title (combination of option values).
    pub title: String,
    /// SKU code.
    pub sku: Option<String>,
    /// Barcode.
    pub barcode: Option<String>,
    /// Current price.
    pub price: Option<Decimal>,
    /// Compare-at price (original price if on sale).
    pub compare_at_price: Option<Decimal>,
    /// Inventory quantity (across all locations).
    pub inventory_quantity: i64,
    /// Whether the variant can be bought.
    pub available_for_sale: bool,
    /// Option values, e.g. `Size: M`.
    pub selected_options: Vec<SelectedOption>,
    /// Variant image.
    pub image: Option<Image>,
}

/// One option value chosen by a variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedOption {
    pub name: String,
    pub value: String,
}

/// A product option and its values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOption {
    pub id: String,
    pub name: String,
    pub values: Vec<String>,
}

/// SEO title and description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seo {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// A collection the product belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionRef {
    pub id: CollectionId,
    pub title: String,
    pub handle: String,
}

/// The product fields returned by mutations and the edit-form lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDetail {
    /// Product ID.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// HTML description.
    pub description_html: String,
    /// URL handle.
    pub handle: String,
    /// Product tags.
    pub tags: TagList,
    /// Vendor name.
    pub vendor: String,
    /// Product status.
    pub status: ProductStatus,
    /// Product type/category.
    pub product_type: String,
}

/// The reduced projection returned by the tag search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedProduct {
    /// Product ID.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// URL handle.
    pub handle: String,
    /// Product tags.
    pub tags: TagList,
    /// Featured image.
    pub featured_image: Option<Image>,
    /// Cheapest variant price.
    pub min_price: Option<Price>,
}

// =============================================================================
// Pagination Types
// =============================================================================

/// Paginated list of products.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductConnection {
    /// Products in this page.
    pub products: Vec<Product>,
    /// Pagination info.
    pub page_info: PageInfo,
}
