//! Display helpers for table cells.

use chrono::{DateTime, Utc};

use crate::types::{Price, ProductStatus, TagList};

/// Placeholder for missing values.
pub const NOT_AVAILABLE: &str = "N/A";

/// Format a variant price range, e.g. `"$5.00 - $12.00 USD"`.
///
/// A single price renders as `"$12.00 USD"`. The currency of the minimum
/// price is used for both ends.
#[must_use]
pub fn format_price(min: Option<&Price>, max: Option<&Price>) -> String {
    let Some(min) = min else {
        return NOT_AVAILABLE.to_owned();
    };
    let currency = &min.currency_code;
    match max {
        Some(max) if max.amount != min.amount => {
            format!("${:.2} - ${:.2} {currency}", min.amount, max.amount)
        }
        _ => format!("${:.2} {currency}", min.amount),
    }
}

/// Format a timestamp as `"Jan 5, 2026"`.
#[must_use]
pub fn format_date(at: Option<DateTime<Utc>>) -> String {
    at.map_or_else(
        || NOT_AVAILABLE.to_owned(),
        |at| at.format("%b %-d, %Y").to_string(),
    )
}

/// Badge tone for a status.
#[must_use]
pub const fn status_tone(status: ProductStatus) -> &'static str {
    match status {
        ProductStatus::Active => "success",
        ProductStatus::Draft => "info",
        ProductStatus::Archived => "warning",
    }
}

/// Tags badge text.
#[must_use]
pub fn tags_label(tags: &TagList) -> String {
    if tags.is_empty() {
        NOT_AVAILABLE.to_owned()
    } else {
        tags.to_form_value()
    }
}
