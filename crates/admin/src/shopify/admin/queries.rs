//! GraphQL operation definitions for the Shopify Admin API.
//!
//! Each operation is a unit struct implementing [`GraphQLQuery`] plus a
//! module holding its document, `Variables` and `ResponseData`, laid out the
//! way `graphql_client`'s derive would generate them. Field selections match
//! the admin page's projections exactly.

use graphql_client::{GraphQLQuery, QueryBody};
use product_desk_core::{ProductInput, UserError};
use serde::{Deserialize, Serialize};

// =============================================================================
// Shared response shapes
// =============================================================================

/// `{ edges { node } }` wrapper.
#[derive(Debug, Clone, Deserialize)]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self { edges: Vec::new() }
    }
}

impl<T> Connection<T> {
    /// Unwrap the edges into their nodes.
    pub fn into_nodes(self) -> impl Iterator<Item = T> {
        self.edges.into_iter().map(|e| e.node)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Edge<T> {
    pub node: T,
    #[serde(default)]
    pub cursor: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub has_previous_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageNode {
    #[serde(default)]
    pub id: Option<String>,
    pub url: String,
    pub alt_text: Option<String>,
}

/// `MoneyV2`: decimal amount as string plus currency.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyNode {
    pub amount: String,
    pub currency_code: String,
}

/// `productCreate`/`productUpdate` product selection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetailNode {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description_html: String,
    #[serde(default)]
    pub handle: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub vendor: String,
    pub status: String,
    #[serde(default)]
    pub product_type: String,
}

/// Builds a [`QueryBody`] for an operation module.
macro_rules! operation {
    ($name:ident, $module:ident) => {
        impl GraphQLQuery for $name {
            type Variables = $module::Variables;
            type ResponseData = $module::ResponseData;

            fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
                QueryBody {
                    variables,
                    query: $module::QUERY,
                    operation_name: $module::OPERATION_NAME,
                }
            }
        }
    };
}

// =============================================================================
// Product queries
// =============================================================================

pub struct GetAllProducts;
operation!(GetAllProducts, get_all_products);

pub mod get_all_products {
    use super::{Connection, ImageNode, MoneyNode, PageInfo};
    use serde::{Deserialize, Serialize};

    pub const OPERATION_NAME: &str = "GetAllProducts";
    pub const QUERY: &str = r"query GetAllProducts($first: Int = 50, $after: String) {
  products(first: $first, after: $after) {
    edges {
      node {
        id
        legacyResourceId
        title
        description
        handle
        productType
        vendor
        tags
        status
        createdAt
        updatedAt
        featuredImage { id url altText }
        images(first: 5) { edges { node { id url altText } } }
        variants(first: 10) {
          edges {
            node {
              id
              legacyResourceId
              title
              sku
              barcode
              price
              compareAtPrice
              inventoryQuantity
              availableForSale
              selectedOptions { name value }
              image { url altText }
            }
          }
        }
        priceRangeV2 {
          minVariantPrice { amount currencyCode }
          maxVariantPrice { amount currencyCode }
        }
        options { id name values }
        seo { title description }
        collections(first: 5) { edges { node { id title handle } } }
        totalInventory
        totalVariants
      }
      cursor
    }
    pageInfo { hasNextPage hasPreviousPage endCursor startCursor }
  }
}";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub first: i64,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub after: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub products: Products,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Products {
        #[serde(default = "Vec::new")]
        pub edges: Vec<super::Edge<ProductNode>>,
        #[serde(default)]
        pub page_info: PageInfo,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ProductNode {
        pub id: String,
        #[serde(default)]
        pub legacy_resource_id: String,
        pub title: String,
        #[serde(default)]
        pub description: String,
        #[serde(default)]
        pub handle: String,
        #[serde(default)]
        pub product_type: String,
        #[serde(default)]
        pub vendor: String,
        #[serde(default)]
        pub tags: Vec<String>,
        pub status: String,
        pub created_at: Option<String>,
        pub updated_at: Option<String>,
        pub featured_image: Option<ImageNode>,
        #[serde(default)]
        pub images: Connection<ImageNode>,
        #[serde(default)]
        pub variants: Connection<VariantNode>,
        pub price_range_v2: Option<PriceRangeNode>,
        #[serde(default)]
        pub options: Vec<OptionNode>,
        pub seo: Option<SeoNode>,
        #[serde(default)]
        pub collections: Connection<CollectionNode>,
        pub total_inventory: Option<i64>,
        pub total_variants: Option<i64>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct VariantNode {
        pub id: String,
        #[serde(default)]
        pub legacy_resource_id: String,
        #[serde(default)]
        pub title: String,
        pub sku: Option<String>,
        pub barcode: Option<String>,
        pub price: Option<String>,
        pub compare_at_price: Option<String>,
        pub inventory_quantity: Option<i64>,
        #[serde(default)]
        pub available_for_sale: bool,
        #[serde(default)]
        pub selected_options: Vec<SelectedOptionNode>,
        pub image: Option<VariantImageNode>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct SelectedOptionNode {
        pub name: String,
        pub value: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct VariantImageNode {
        pub url: String,
        pub alt_text: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PriceRangeNode {
        pub min_variant_price: MoneyNode,
        pub max_variant_price: MoneyNode,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct OptionNode {
        pub id: String,
        pub name: String,
        #[serde(default)]
        pub values: Vec<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct SeoNode {
        pub title: Option<String>,
        pub description: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct CollectionNode {
        pub id: String,
        pub title: String,
        pub handle: String,
    }
}

pub struct GetProductsByTags;
operation!(GetProductsByTags, get_products_by_tags);

pub mod get_products_by_tags {
    use super::{Connection, MoneyNode};
    use serde::{Deserialize, Serialize};

    pub const OPERATION_NAME: &str = "GetProductsByTags";
    pub const QUERY: &str = r"query GetProductsByTags($query: String, $first: Int = 50) {
  products(query: $query, first: $first) {
    edges {
      node {
        id
        title
        handle
        tags
        featuredImage { url altText }
        priceRangeV2 { minVariantPrice { amount currencyCode } }
      }
    }
  }
}";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub query: String,
        pub first: i64,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub products: Connection<TaggedNode>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TaggedNode {
        pub id: String,
        pub title: String,
        #[serde(default)]
        pub handle: String,
        #[serde(default)]
        pub tags: Vec<String>,
        pub featured_image: Option<TaggedImageNode>,
        pub price_range_v2: Option<MinPriceNode>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TaggedImageNode {
        pub url: String,
        pub alt_text: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MinPriceNode {
        pub min_variant_price: MoneyNode,
    }
}

pub struct GetProduct;
operation!(GetProduct, get_product);

pub mod get_product {
    use super::ProductDetailNode;
    use serde::{Deserialize, Serialize};

    pub const OPERATION_NAME: &str = "GetProduct";
    pub const QUERY: &str = r"query GetProduct($id: ID!) {
  product(id: $id) {
    id
    title
    descriptionHtml
    handle
    productType
    vendor
    tags
    status
  }
}";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub id: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub product: Option<ProductDetailNode>,
    }
}

// =============================================================================
// Product mutations
// =============================================================================

pub struct ProductCreate;
operation!(ProductCreate, product_create);

pub mod product_create {
    use super::{ProductDetailNode, ProductInput, UserError};
    use serde::{Deserialize, Serialize};

    pub const OPERATION_NAME: &str = "productCreate";
    pub const QUERY: &str = r"mutation productCreate($input: ProductInput!) {
  productCreate(input: $input) {
    product {
      id
      title
      descriptionHtml
      handle
      tags
      vendor
      status
      productType
    }
    userErrors {
      field
      message
    }
  }
}";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub input: ProductInput,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub product_create: Option<Payload>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Payload {
        pub product: Option<ProductDetailNode>,
        #[serde(default)]
        pub user_errors: Vec<UserError>,
    }
}

pub struct ProductUpdate;
operation!(ProductUpdate, product_update);

pub mod product_update {
    use super::{ProductDetailNode, ProductInput, UserError};
    use serde::{Deserialize, Serialize};

    pub const OPERATION_NAME: &str = "productUpdate";
    pub const QUERY: &str = r"mutation productUpdate($input: ProductInput!) {
  productUpdate(input: $input) {
    product {
      id
      title
      descriptionHtml
      handle
      productType
      vendor
      tags
      status
    }
    userErrors {
      field
      message
    }
  }
}";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub input: UpdateInput,
    }

    /// `ProductInput` with the target id.
    #[derive(Debug, Clone, Serialize)]
    pub struct UpdateInput {
        pub id: String,
        #[serde(flatten)]
        pub fields: ProductInput,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub product_update: Option<Payload>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Payload {
        pub product: Option<ProductDetailNode>,
        #[serde(default)]
        pub user_errors: Vec<UserError>,
    }
}

pub struct ProductDelete;
operation!(ProductDelete, product_delete);

pub mod product_delete {
    use super::UserError;
    use serde::{Deserialize, Serialize};

    pub const OPERATION_NAME: &str = "productDelete";
    pub const QUERY: &str = r"mutation productDelete($input: ProductDeleteInput!) {
  productDelete(input: $input) {
    deletedProductId
    userErrors {
      field
      message
    }
  }
}";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub input: ProductDeleteInput,
    }

    #[derive(Debug, Clone, Serialize)]
    pub struct ProductDeleteInput {
        pub id: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub product_delete: Option<Payload>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Payload {
        pub deleted_product_id: Option<String>,
        #[serde(default)]
        pub user_errors: Vec<UserError>,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use product_desk_core::{ProductStatus, TagList};
    use serde_json::json;

    use super::*;

    #[test]
    fn test_build_query_names_operation() {
        let body = GetAllProducts::build_query(get_all_products::Variables {
            first: 50,
            after: None,
        });
        assert_eq!(body.operation_name, "GetAllProducts");
        assert!(body.query.starts_with("query GetAllProducts("));

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["variables"], json!({ "first": 50 }));
    }

    #[test]
    fn test_update_input_flattens_fields() {
        let body = ProductUpdate::build_query(product_update::Variables {
            input: product_update::UpdateInput {
                id: "gid://shopify/Product/1".to_string(),
                fields: ProductInput {
                    title: "Tee".to_string(),
                    status: ProductStatus::Archived,
                    tags: TagList::new(["a"]),
                    ..ProductInput::default()
                },
            },
        });
        let value = serde_json::to_value(&body).unwrap();
        let input = &value["variables"]["input"];
        assert_eq!(input["id"], "gid://shopify/Product/1");
        assert_eq!(input["title"], "Tee");
        assert_eq!(input["status"], "ARCHIVED");
        assert_eq!(input["tags"], json!(["a"]));
        assert_eq!(input["descriptionHtml"], "");
    }

    #[test]
    fn test_decode_list_with_sparse_nodes() {
        let data: get_all_products::ResponseData = serde_json::from_value(json!({
            "products": {
                "edges": [{
                    "node": {
                        "id": "gid://shopify/Product/1",
                        "title": "Tee",
                        "status": "ACTIVE",
                        "updatedAt": "2026-01-05T12:00:00Z",
                        "priceRangeV2": {
                            "minVariantPrice": { "amount": "5.0", "currencyCode": "USD" },
                            "maxVariantPrice": { "amount": "12.0", "currencyCode": "USD" }
                        },
                        "variants": { "edges": [{ "node": {
                            "id": "gid://shopify/ProductVariant/7",
                            "price": "5.00",
                            "selectedOptions": [{ "name": "Size", "value": "S" }]
                        } }] }
                    },
                    "cursor": "abc"
                }],
                "pageInfo": { "hasNextPage": true, "endCursor": "abc" }
            }
        }))
        .unwrap();

        let edge = &data.products.edges[0];
        assert_eq!(edge.cursor.as_deref(), Some("abc"));
        assert_eq!(edge.node.variants.edges.len(), 1);
        assert!(edge.node.images.edges.is_empty());
        assert!(data.products.page_info.has_next_page);
    }

    #[test]
    fn test_decode_mutation_user_errors() {
        let data: product_create::ResponseData = serde_json::from_value(json!({
            "productCreate": {
                "product": null,
                "userErrors": [{ "field": ["title"], "message": "Title can't be blank" }]
            }
        }))
        .unwrap();
        let payload = data.product_create.unwrap();
        assert!(payload.product.is_none());
        assert_eq!(payload.user_errors[0].to_string(), "title: Title can't be blank");
    }
}
