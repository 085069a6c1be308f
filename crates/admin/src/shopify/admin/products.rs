//! Product CRUD operations for the Admin API.

use product_desk_core::{ProductId, ProductInput, TagList, UserError};
use tracing::instrument;

use super::{
    AdminClient, AdminShopifyError,
    conversions::{convert_product_connection, convert_product_detail, convert_tagged_products},
    queries::{
        self, GetAllProducts, GetProduct, GetProductsByTags, ProductCreate, ProductDelete,
        ProductDetailNode, ProductUpdate,
    },
};
use crate::shopify::types::{ProductConnection, ProductDetail, TaggedProduct};

/// Page size used by the products page and the tag search.
pub const DEFAULT_PAGE_SIZE: i64 = 50;

impl AdminClient {
    /// Get a page of products with the full listing projection.
    ///
    /// # Arguments
    ///
    /// * `first` - Number of products to return
    /// * `after` - Cursor for pagination
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response carries a
    /// top-level `errors` list.
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        first: i64,
        after: Option<String>,
    ) -> Result<ProductConnection, AdminShopifyError> {
        let variables = queries::get_all_products::Variables { first, after };

        let response = self.execute::<GetAllProducts>(variables).await?;

        let connection = convert_product_connection(response.products);
        tracing::debug!(count = connection.products.len(), "Fetched products");
        Ok(connection)
    }

    /// Get products carrying any of `tags`, with the reduced projection.
    ///
    /// An empty tag list returns no products without calling the API.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    #[instrument(skip(self), fields(tags = tags.len()))]
    pub async fn list_products_by_tags(
        &self,
        tags: &TagList,
    ) -> Result<Vec<TaggedProduct>, AdminShopifyError> {
        if tags.is_empty() {
            return Ok(Vec::new());
        }

        let variables = queries::get_products_by_tags::Variables {
            query: tag_query(tags),
            first: DEFAULT_PAGE_SIZE,
        };

        let response = self.execute::<GetProductsByTags>(variables).await?;

        Ok(convert_tagged_products(response.products))
    }

    /// Get a product by ID, including its HTML description.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(
        &self,
        id: &ProductId,
    ) -> Result<Option<ProductDetail>, AdminShopifyError> {
        let variables = queries::get_product::Variables {
            id: id.to_string(),
        };

        let response = self.execute::<GetProduct>(variables).await?;

        Ok(response.product.map(convert_product_detail))
    }

    /// Create a new product.
    ///
    /// # Errors
    ///
    /// Returns `AdminShopifyError::UserErrors` if Shopify rejects the input,
    /// or a transport error if the request fails.
    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create_product(
        &self,
        input: &ProductInput,
    ) -> Result<ProductDetail, AdminShopifyError> {
        let variables = queries::product_create::Variables {
            input: input.clone(),
        };

        let response = self.execute::<ProductCreate>(variables).await?;

        let payload = response
            .product_create
            .ok_or(AdminShopifyError::MissingPayload("productCreate"))?;
        mutation_result(payload.product, payload.user_errors, "productCreate")
    }

    /// Update an existing product. Tags replace the current tags.
    ///
    /// # Errors
    ///
    /// Returns `AdminShopifyError::UserErrors` if Shopify rejects the input,
    /// or a transport error if the request fails.
    #[instrument(skip(self, input), fields(product_id = %id))]
    pub async fn update_product(
        &self,
        id: &ProductId,
        input: &ProductInput,
    ) -> Result<ProductDetail, AdminShopifyError> {
        let variables = queries::product_update::Variables {
            input: queries::product_update::UpdateInput {
                id: id.to_string(),
                fields: input.clone(),
            },
        };

        let response = self.execute::<ProductUpdate>(variables).await?;

        let payload = response
            .product_update
            .ok_or(AdminShopifyError::MissingPayload("productUpdate"))?;
        mutation_result(payload.product, payload.user_errors, "productUpdate")
    }

    /// Delete a product.
    ///
    /// # Returns
    ///
    /// Returns the deleted product's ID on success.
    ///
    /// # Errors
    ///
    /// Returns `AdminShopifyError::UserErrors` if Shopify refuses the delete
    /// (e.g. unknown product), or a transport error if the request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: &ProductId) -> Result<ProductId, AdminShopifyError> {
        use queries::product_delete::{ProductDeleteInput, Variables};

        let variables = Variables {
            input: ProductDeleteInput { id: id.to_string() },
        };

        let response = self.execute::<ProductDelete>(variables).await?;

        let payload = response
            .product_delete
            .ok_or(AdminShopifyError::MissingPayload("productDelete"))?;
        check_user_errors(payload.user_errors)?;

        payload
            .deleted_product_id
            .map(ProductId::from_api)
            .ok_or(AdminShopifyError::MissingPayload("productDelete"))
    }
}

fn check_user_errors(user_errors: Vec<UserError>) -> Result<(), AdminShopifyError> {
    if user_errors.is_empty() {
        return Ok(());
    }
    tracing::info!(count = user_errors.len(), "Mutation returned user errors");
    Err(AdminShopifyError::UserErrors(user_errors))
}

fn mutation_result(
    product: Option<ProductDetailNode>,
    user_errors: Vec<UserError>,
    operation: &'static str,
) -> Result<ProductDetail, AdminShopifyError> {
    check_user_errors(user_errors)?;
    product
        .map(convert_product_detail)
        .ok_or(AdminShopifyError::MissingPayload(operation))
}

/// Search expression matching any of the tags: `tag:"a" OR tag:"b"`.
///
/// Tags are quoted so spaces and search syntax inside a tag stay literal.
fn tag_query(tags: &TagList) -> String {
    tags.iter()
        .map(|tag| {
            let escaped = tag.replace('\\', "\\\\").replace('"', "\\\"");
            format!("tag:\"{escaped}\"")
        })
        .collect::<Vec<_>>()
        .join(" OR ")
}
