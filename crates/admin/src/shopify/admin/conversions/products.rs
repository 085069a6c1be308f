//! Product type conversion functions.

use product_desk_core::{CollectionId, ProductId, TagList, VariantId};

use crate::shopify::types::{
    CollectionRef, Image, PageInfo, PriceRange, Product, ProductConnection, ProductDetail,
    ProductOption, ProductVariant, SelectedOption, Seo, TaggedProduct,
};

use super::super::queries::{
    self, ImageNode, ProductDetailNode, get_all_products, get_products_by_tags,
};
use super::{convert_decimal, convert_money, convert_status, convert_timestamp};

// =============================================================================
// GetAllProducts conversions
// =============================================================================

pub fn convert_product_connection(conn: get_all_products::Products) -> ProductConnection {
    ProductConnection {
        products: conn
            .edges
            .into_iter()
            .map(|e| convert_product(e.node))
            .collect(),
        page_info: convert_page_info(conn.page_info),
    }
}

fn convert_page_info(info: queries::PageInfo) -> PageInfo {
    PageInfo {
        has_next_page: info.has_next_page,
        has_previous_page: info.has_previous_page,
        start_cursor: info.start_cursor,
        end_cursor: info.end_cursor,
    }
}

fn convert_product(product: get_all_products::ProductNode) -> Product {
    let price_range = product.price_range_v2.and_then(|range| {
        Some(PriceRange {
            min: convert_money(&range.min_variant_price)?,
            max: convert_money(&range.max_variant_price)?,
        })
    });

    Product {
        id: ProductId::from_api(product.id),
        legacy_resource_id: product.legacy_resource_id,
        title: product.title,
        description: product.description,
        handle: product.handle,
        product_type: product.product_type,
        vendor: product.vendor,
        tags: TagList::from(product.tags),
        status: convert_status(&product.status),
        created_at: convert_timestamp(product.created_at.as_deref()),
        updated_at: convert_timestamp(product.updated_at.as_deref()),
        featured_image: product.featured_image.map(convert_image),
        images: product.images.into_nodes().map(convert_image).collect(),
        variants: product.variants.into_nodes().map(convert_variant).collect(),
        price_range,
        options: product
            .options
            .into_iter()
            .map(|o| ProductOption {
                id: o.id,
                name: o.name,
                values: o.values,
            })
            .collect(),
        seo: product
            .seo
            .map(|s| Seo {
                title: s.title,
                description: s.description,
            })
            .unwrap_or_default(),
        collections: product
            .collections
            .into_nodes()
            .map(|c| CollectionRef {
                id: CollectionId::from_api(c.id),
                title: c.title,
                handle: c.handle,
            })
            .collect(),
        total_inventory: product.total_inventory.unwrap_or(0),
        total_variants: product.total_variants.unwrap_or(0),
    }
}

fn convert_variant(v: get_all_products::VariantNode) -> ProductVariant {
    ProductVariant {
        id: VariantId::from_api(v.id),
        legacy_resource_id: v.legacy_resource_id,
        title: v.title,
        sku: v.sku,
        barcode: v.barcode,
        price: convert_decimal(v.price.as_deref()),
        compare_at_price: convert_decimal(v.compare_at_price.as_deref()),
        inventory_quantity: v.inventory_quantity.unwrap_or(0),
        available_for_sale: v.available_for_sale,
        selected_options: v
            .selected_options
            .into_iter()
            .map(|o| SelectedOption {
                name: o.name,
                value: o.value,
            })
            .collect(),
        image: v.image.map(|i| Image {
            id: None,
            url: i.url,
            alt_text: i.alt_text,
        }),
    }
}

fn convert_image(i: ImageNode) -> Image {
    Image {
        id: i.id,
        url: i.url,
        alt_text: i.alt_text,
    }
}

// =============================================================================
// GetProductsByTags conversions
// =============================================================================

pub fn convert_tagged_products(
    conn: queries::Connection<get_products_by_tags::TaggedNode>,
) -> Vec<TaggedProduct> {
    conn.into_nodes()
        .map(|node| TaggedProduct {
            id: ProductId::from_api(node.id),
            title: node.title,
            handle: node.handle,
            tags: TagList::from(node.tags),
            featured_image: node.featured_image.map(|i| Image {
                id: None,
                url: i.url,
                alt_text: i.alt_text,
            }),
            min_price: node
                .price_range_v2
                .and_then(|r| convert_money(&r.min_variant_price)),
        })
        .collect()
}

// =============================================================================
// Mutation / GetProduct conversions
// =============================================================================

pub fn convert_product_detail(product: ProductDetailNode) -> ProductDetail {
    ProductDetail {
        id: ProductId::from_api(product.id),
        title: product.title,
        description_html: product.description_html,
        handle: product.handle,
        tags: TagList::from(product.tags),
        vendor: product.vendor,
        status: convert_status(&product.status),
        product_type: product.product_type,
    }
}
