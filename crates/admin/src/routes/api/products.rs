//! Product lookup API handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use product_desk_core::TagList;
use serde::Deserialize;
use tracing::instrument;

use crate::{error::AppError, shopify::TaggedProduct, state::AppState};

/// Build the products API router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/products/by-tags", get(by_tags))
}

/// Query for the tag search.
#[derive(Debug, Deserialize)]
pub struct ByTagsQuery {
    /// Comma-separated tags, e.g. `summer, sale`.
    pub tags: Option<String>,
}

/// Products carrying any of the requested tags.
///
/// An empty tag list answers `[]` without calling Shopify.
///
/// # Errors
///
/// Returns `400 Bad Request` if `tags` is missing, or `502 Bad Gateway` if
/// the Shopify request fails.
#[instrument(skip(state))]
pub async fn by_tags(
    State(state): State<AppState>,
    Query(query): Query<ByTagsQuery>,
) -> Result<Json<Vec<TaggedProduct>>, AppError> {
    let raw = query
        .tags
        .ok_or_else(|| AppError::BadRequest("tags parameter is required".to_string()))?;
    let tags = TagList::parse(&raw);
    let products = state.shopify().list_products_by_tags(&tags).await?;
    tracing::debug!(tags = tags.len(), count = products.len(), "Tag search");
    Ok(Json(products))
}
