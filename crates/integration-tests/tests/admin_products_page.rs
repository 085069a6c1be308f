//! Integration tests for the admin products page and product actions.
//!
//! The admin router is driven with `tower::ServiceExt::oneshot` while the
//! Shopify Admin API is served by an in-process fake.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::collections::HashMap;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use product_desk_integration_tests::{FakeShopify, product_detail, seven_products};
use serde_json::{Value, json};
use tower::ServiceExt;
use url::form_urlencoded;

async fn get(router: Router, uri: &str) -> Response {
    router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_form(router: Router, fields: &[(&str, &str)]) -> Response {
    let body = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields)
        .finish();
    router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/products")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(response: &Response) -> String {
    response.headers()[header::LOCATION]
        .to_str()
        .unwrap()
        .to_string()
}

fn redirect_params(response: &Response) -> HashMap<String, String> {
    let location = location(response);
    let query = location.split_once('?').map_or("", |(_, q)| q);
    form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}

/// Assert that `needles` appear in `body` in the given order.
fn assert_in_order(body: &str, needles: &[&str]) {
    let positions: Vec<usize> = needles
        .iter()
        .map(|needle| {
            body.find(needle)
                .unwrap_or_else(|| panic!("{needle:?} not found in page"))
        })
        .collect();
    assert!(
        positions.windows(2).all(|w| w[0] < w[1]),
        "expected {needles:?} in order, found at {positions:?}"
    );
}

async fn catalog() -> FakeShopify {
    let shopify = FakeShopify::start().await;
    shopify.respond("GetAllProducts", seven_products());
    shopify
}

// ============================================================================
// Listing
// ============================================================================

#[tokio::test]
async fn test_first_page_sorted_by_most_recent_update() {
    let shopify = catalog().await;

    let response = get(shopify.router(), "/products").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;

    assert_in_order(
        &body,
        &["Linen Shirt", "Sandals", "Straw Hat", "Canvas Tote", "Rain Jacket"],
    );
    assert!(!body.contains("Beanie"));
    assert!(!body.contains("Wool Scarf"));
    assert!(body.contains("Showing 1-5 of 7"));
    assert!(body.contains("Page 1 of 2"));
    assert!(body.contains("$45.00 USD"));
    assert!(body.contains("Jan 7, 2026"));
}

#[tokio::test]
async fn test_second_page() {
    let shopify = catalog().await;

    let body = body_text(get(shopify.router(), "/products?page=2").await).await;

    assert_in_order(&body, &["Beanie", "Wool Scarf"]);
    assert!(!body.contains("Linen Shirt"));
    assert!(body.contains("Showing 6-7 of 7"));
    assert!(body.contains("Page 2 of 2"));
}

#[tokio::test]
async fn test_page_beyond_last_is_clamped() {
    let shopify = catalog().await;

    let body = body_text(get(shopify.router(), "/products?page=9").await).await;
    assert!(body.contains("Page 2 of 2"));
}

#[tokio::test]
async fn test_search_status_and_sort() {
    let shopify = catalog().await;

    let body = body_text(
        get(
            shopify.router(),
            "/products?q=S&status=ACTIVE&sort=title+asc",
        )
        .await,
    )
    .await;

    assert_in_order(&body, &["Canvas Tote", "Linen Shirt", "Sandals", "Straw Hat"]);
    assert!(!body.contains("Rain Jacket"));
    assert!(!body.contains("Wool Scarf"));
    assert!(body.contains("Showing 1-4 of 4"));
    assert!(body.contains("Status: Active"));
}

#[tokio::test]
async fn test_no_matches_shows_empty_state() {
    let shopify = catalog().await;

    let body = body_text(get(shopify.router(), "/products?q=zzz").await).await;
    assert!(body.contains("No products found"));
    assert!(body.contains("Showing 0 of 7 loaded"));
}

#[tokio::test]
async fn test_catalog_failure_renders_error_toast() {
    let shopify = FakeShopify::start().await;
    shopify.respond_with_status("GetAllProducts", 500, json!({}));

    let response = get(shopify.router(), "/products").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;

    assert!(body.contains("Could not reach Shopify: HTTP status 500"));
    assert!(body.contains("No products found"));
}

#[tokio::test]
async fn test_toast_carried_in_query() {
    let shopify = catalog().await;

    let body = body_text(
        get(
            shopify.router(),
            "/products?toast=Product+deleted+successfully&tone=success",
        )
        .await,
    )
    .await;
    assert!(body.contains("Product deleted successfully"));
    assert!(body.contains("data-duration=\"5000\""));
}

// ============================================================================
// Modals
// ============================================================================

#[tokio::test]
async fn test_create_modal_has_empty_form() {
    let shopify = catalog().await;

    let body = body_text(get(shopify.router(), "/products?modal=create").await).await;

    assert!(body.contains("Create product"));
    assert!(body.contains(r#"name="actionType" value="create""#));
    assert!(body.contains(r#"<option value="ACTIVE" selected>"#));
}

#[tokio::test]
async fn test_edit_without_selection_is_refused() {
    let shopify = catalog().await;

    let body = body_text(get(shopify.router(), "/products?modal=edit").await).await;

    assert!(body.contains("Select exactly one product to edit"));
    assert!(!body.contains(r#"name="actionType""#));
}

#[tokio::test]
async fn test_edit_with_two_selected_is_refused() {
    let shopify = catalog().await;

    let body = body_text(
        get(shopify.router(), "/products?selected=1,3&modal=edit").await,
    )
    .await;
    assert!(body.contains("Select exactly one product to edit"));
}

#[tokio::test]
async fn test_edit_prefills_from_product_lookup() {
    let shopify = catalog().await;
    shopify.respond(
        "GetProduct",
        json!({ "data": { "product": product_detail(3, "Straw Hat") } }),
    );

    let body = body_text(
        get(shopify.router(), "/products?selected=3&modal=edit").await,
    )
    .await;

    assert!(body.contains("Edit product"));
    assert!(body.contains(r#"name="actionType" value="update""#));
    assert!(body.contains(r#"name="title" value="Straw Hat""#));
    assert!(body.contains(r#"name="tags" value="summer, sale""#));
    assert!(body.contains("gid://shopify/Product/3"));
    assert_eq!(shopify.requests_for("GetProduct").len(), 1);
}

#[tokio::test]
async fn test_edit_falls_back_to_listing_row() {
    let shopify = catalog().await;

    let body = body_text(
        get(shopify.router(), "/products?selected=3&modal=edit").await,
    )
    .await;

    assert!(body.contains(r#"name="title" value="Straw Hat""#));
    assert!(body.contains(r#"name="tags" value="summer, sale""#));
    assert!(body.contains("Straw Hat description"));
}

#[tokio::test]
async fn test_delete_of_row_not_on_page_is_refused() {
    let shopify = catalog().await;

    // Wool Scarf is on page 2, so the selection does not survive page 1.
    let body = body_text(
        get(shopify.router(), "/products?selected=2&modal=delete").await,
    )
    .await;
    assert!(body.contains("Select exactly one product to delete"));
}

#[tokio::test]
async fn test_delete_modal_confirms_title() {
    let shopify = catalog().await;

    let body = body_text(
        get(shopify.router(), "/products?selected=5&modal=delete").await,
    )
    .await;

    assert!(body.contains("Delete product"));
    assert!(body.contains("Delete <strong>Sandals</strong>?"));
    assert!(body.contains(r#"name="actionType" value="delete""#));
}

// ============================================================================
// Actions
// ============================================================================

#[tokio::test]
async fn test_create_redirects_with_success_toast() {
    let shopify = FakeShopify::start().await;
    shopify.respond(
        "productCreate",
        json!({ "data": { "productCreate": {
            "product": product_detail(8, "Linen Shorts"),
            "userErrors": []
        } } }),
    );

    let response = post_form(
        shopify.router(),
        &[
            ("actionType", "create"),
            ("title", "Linen Shorts"),
            ("descriptionHtml", "<p>Shorts</p>"),
            ("vendor", "Acme"),
            ("status", "DRAFT"),
            ("tags", " summer ,, sale "),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let params = redirect_params(&response);
    assert_eq!(params["toast"], "Product created successfully");
    assert_eq!(params["tone"], "success");

    let requests = shopify.requests_for("productCreate");
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].variables["input"]["tags"], json!(["summer", "sale"]));
    assert_eq!(requests[0].variables["input"]["status"], json!("DRAFT"));
}

#[tokio::test]
async fn test_redirect_returns_to_listing() {
    let shopify = FakeShopify::start().await;
    shopify.respond(
        "productDelete",
        json!({ "data": { "productDelete": {
            "deletedProductId": "gid://shopify/Product/3",
            "userErrors": []
        } } }),
    );

    let response = post_form(
        shopify.router(),
        &[
            ("actionType", "delete"),
            ("productId", "gid://shopify/Product/3"),
            ("returnQ", "hat"),
            ("returnSort", "title asc"),
            ("returnPage", "2"),
        ],
    )
    .await;

    let params = redirect_params(&response);
    assert!(location(&response).starts_with("/products?"));
    assert_eq!(params["q"], "hat");
    assert_eq!(params["sort"], "title asc");
    assert_eq!(params["page"], "2");
    assert_eq!(params["toast"], "Product deleted successfully");
    assert!(!params.contains_key("selected"));
}

#[tokio::test]
async fn test_update_user_errors_become_critical_toast() {
    let shopify = FakeShopify::start().await;
    shopify.respond(
        "productUpdate",
        json!({ "data": { "productUpdate": {
            "product": null,
            "userErrors": [{ "field": ["title"], "message": "Title can't be blank" }]
        } } }),
    );

    let response = post_form(
        shopify.router(),
        &[
            ("actionType", "update"),
            ("productId", "3"),
            ("title", ""),
        ],
    )
    .await;

    let params = redirect_params(&response);
    assert_eq!(params["tone"], "critical");
    assert_eq!(
        params["toast"],
        "Shopify rejected the product: title: Title can't be blank"
    );
}

#[tokio::test]
async fn test_transport_failure_becomes_critical_toast() {
    let shopify = FakeShopify::start().await;
    shopify.respond_with_status("productDelete", 503, json!({}));

    let response = post_form(
        shopify.router(),
        &[("actionType", "delete"), ("productId", "3")],
    )
    .await;

    let params = redirect_params(&response);
    assert_eq!(params["tone"], "critical");
    assert_eq!(params["toast"], "Could not reach Shopify: HTTP status 503");
}

#[tokio::test]
async fn test_failed_create_leaves_catalog_unchanged() {
    let shopify = catalog().await;
    shopify.respond_with_status("productCreate", 503, json!({}));

    let response = post_form(
        shopify.router(),
        &[
            ("actionType", "create"),
            ("title", "Linen Shorts"),
            ("tags", "summer"),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(redirect_params(&response)["tone"], "critical");

    let body = body_text(get(shopify.router(), &location(&response)).await).await;

    assert!(body.contains("Could not reach Shopify: HTTP status 503"));
    assert!(body.contains("Showing 1-5 of 7"));
    assert!(body.contains("Page 1 of 2"));
    assert!(!body.contains("Linen Shorts"));
    assert_eq!(shopify.requests_for("productCreate").len(), 1);
}

#[tokio::test]
async fn test_invalid_actions_are_refused_without_a_request() {
    let shopify = FakeShopify::start().await;

    let cases: [(&[(&str, &str)], &str); 3] = [
        (&[("actionType", "archive")], "Unknown action: archive"),
        (
            &[("actionType", "delete")],
            "A product id is required to delete",
        ),
        (
            &[("actionType", "create"), ("title", "X"), ("status", "LIVE")],
            "Invalid product status: LIVE",
        ),
    ];

    for (fields, message) in cases {
        let response = post_form(shopify.router(), fields).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let params = redirect_params(&response);
        assert_eq!(params["toast"], message);
        assert_eq!(params["tone"], "critical");
    }

    assert!(shopify.requests().is_empty());
}

// ============================================================================
// JSON API
// ============================================================================

#[tokio::test]
async fn test_products_by_tags_api() {
    let shopify = FakeShopify::start().await;
    shopify.respond(
        "GetProductsByTags",
        json!({ "data": { "products": { "edges": [{ "node": {
            "id": "gid://shopify/Product/3",
            "title": "Straw Hat",
            "handle": "straw-hat",
            "tags": ["summer"],
            "featuredImage": null,
            "priceRangeV2": { "minVariantPrice": { "amount": "19.90", "currencyCode": "USD" } }
        } }] } } }),
    );

    let response = get(shopify.router(), "/api/products/by-tags?tags=summer").await;
    assert_eq!(response.status(), StatusCode::OK);

    let products: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(products.as_array().unwrap().len(), 1);
    assert_eq!(products[0]["id"], json!("gid://shopify/Product/3"));
    assert_eq!(products[0]["tags"], json!(["summer"]));
}

#[tokio::test]
async fn test_products_by_tags_api_empty_and_failure() {
    let shopify = FakeShopify::start().await;

    let response = get(shopify.router(), "/api/products/by-tags?tags=").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "[]");
    assert!(shopify.requests().is_empty());

    shopify.respond_with_status("GetProductsByTags", 500, json!({}));
    let response = get(shopify.router(), "/api/products/by-tags?tags=summer").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_products_by_tags_api_requires_tags() {
    let shopify = FakeShopify::start().await;

    let response = get(shopify.router(), "/api/products/by-tags").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_text(response).await,
        "Bad request: tags parameter is required"
    );
    assert!(shopify.requests().is_empty());
}
