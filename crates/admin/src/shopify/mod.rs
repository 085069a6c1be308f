//! Shopify Admin API client (HIGH PRIVILEGE).
//!
//! # Security
//!
//! **This module holds the Admin API access token.** The Admin API has full
//! write access to the store's catalog; keep the admin binary off the public
//! internet.
//!
//! # Architecture
//!
//! - Operations are `graphql_client::GraphQLQuery` implementations with
//!   hand-written documents (see [`admin::queries`])
//! - Direct API calls to Shopify, one request per operation, no retries
//! - Every operation returns `Result<_, AdminShopifyError>`; field-level
//!   `userErrors` become [`AdminShopifyError::UserErrors`]
//!
//! # Example
//!
//! ```rust,ignore
//! use product_desk_admin::shopify::AdminClient;
//!
//! let client = AdminClient::new(&config.shopify)?;
//!
//! let connection = client.list_products(50, None).await?;
//! let created = client.create_product(&input).await?;
//! client.delete_product(&created.id).await?;
//! ```

pub mod admin;
pub mod types;

pub use admin::{AdminClient, DEFAULT_PAGE_SIZE};
pub use types::*;

use product_desk_core::UserError;
use product_desk_core::listing::{ActionKind, ActionOutcome};
use thiserror::Error;

/// Errors that can occur when interacting with Shopify Admin API.
#[derive(Debug, Error)]
pub enum AdminShopifyError {
    /// HTTP request failed (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status other than 401/429.
    #[error("HTTP status {0}")]
    Status(u16),

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Rate limited by Shopify.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Authentication/authorization failed.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// A mutation answered with neither a result nor `userErrors`.
    #[error("Missing payload: {0}")]
    MissingPayload(&'static str),

    /// Field-level validation errors from a mutation.
    #[error("User errors: {}", format_user_errors(.0))]
    UserErrors(Vec<UserError>),
}

/// Coarse failure class, used to pick the message shown to the merchant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The request did not produce a usable answer.
    Transport,
    /// Shopify answered and rejected the input.
    Validation,
}

impl AdminShopifyError {
    /// Classify this error.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::UserErrors(_) => FailureKind::Validation,
            Self::Http(_)
            | Self::Status(_)
            | Self::GraphQL(_)
            | Self::Parse(_)
            | Self::RateLimited(_)
            | Self::Unauthorized(_)
            | Self::MissingPayload(_) => FailureKind::Transport,
        }
    }

    /// Outcome shown to the merchant when `action` failed with this error.
    #[must_use]
    pub fn into_outcome(self, action: ActionKind) -> ActionOutcome {
        match self {
            Self::UserErrors(errors) => ActionOutcome::Rejected { action, errors },
            other => ActionOutcome::TransportFailed {
                action,
                detail: other.to_string(),
            },
        }
    }
}

/// A GraphQL error returned by the Shopify Admin API.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Source locations in the query.
    pub locations: Vec<GraphQLErrorLocation>,
    /// Path to the error in the response.
    pub path: Vec<serde_json::Value>,
}

/// Location in a GraphQL query where an error occurred.
#[derive(Debug, Clone)]
pub struct GraphQLErrorLocation {
    /// Line number (1-indexed).
    pub line: i64,
    /// Column number (1-indexed).
    pub column: i64,
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(|e| e.message.clone())
        .collect::<Vec<_>>()
        .join("; ")
}

fn format_user_errors(errors: &[UserError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
