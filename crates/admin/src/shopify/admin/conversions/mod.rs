//! Type conversions from GraphQL response types to domain types.
//!
//! Scalars arrive as strings (`DateTime`, `Money`, enums); these helpers
//! parse them leniently so one malformed field does not drop a whole row.

mod products;

pub use products::{
    convert_product_connection, convert_product_detail, convert_tagged_products,
};

use chrono::{DateTime, Utc};
use product_desk_core::{Price, ProductStatus};
use rust_decimal::Decimal;

use super::queries::MoneyNode;

/// Convert a status enum value; unknown values (e.g. `UNLISTED`) map to draft.
pub fn convert_status(status: &str) -> ProductStatus {
    status.parse().unwrap_or(ProductStatus::Draft)
}

/// Parse an ISO 8601 timestamp.
pub fn convert_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    value
        .and_then(|v| DateTime::parse_from_rfc3339(v).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parse a decimal scalar.
pub fn convert_decimal(value: Option<&str>) -> Option<Decimal> {
    value.and_then(|v| v.trim().parse().ok())
}

/// Convert a `MoneyV2` object.
pub fn convert_money(money: &MoneyNode) -> Option<Price> {
    Price::from_api(&money.amount, &money.currency_code)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_status_falls_back_to_draft() {
        assert_eq!(convert_status("ACTIVE"), ProductStatus::Active);
        assert_eq!(convert_status("ARCHIVED"), ProductStatus::Archived);
        assert_eq!(convert_status("UNLISTED"), ProductStatus::Draft);
    }

    #[test]
    fn test_convert_timestamp() {
        let at = convert_timestamp(Some("2026-01-05T12:00:00-05:00")).unwrap();
        assert_eq!(at.to_rfc3339(), "2026-01-05T17:00:00+00:00");
        assert!(convert_timestamp(Some("yesterday")).is_none());
        assert!(convert_timestamp(None).is_none());
    }

    #[test]
    fn test_convert_decimal() {
        assert_eq!(convert_decimal(Some("12.50")), Some(Decimal::new(1250, 2)));
        assert_eq!(convert_decimal(Some("")), None);
    }
}
