//! Listing view model for the products page.
//!
//! The admin loads the whole catalog page once per request and derives the
//! visible rows from it on every filter, sort or page change:
//!
//! 1. **Filter** - title contains the query (case-insensitive) and status is
//!    in the active status set (empty set = any status).
//! 2. **Sort** - by one [`SortKey`]; stable.
//! 3. **Paginate** - [`PAGE_SIZE`] rows per page, page index clamped into
//!    `1..=page_count`.
//!
//! Everything here is pure and synchronous. [`ProductsPage`] wraps the
//! pipeline with selection, modal and form state behind a reducer.

pub mod format;
mod page;
mod selection;
mod state;

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::types::{ProductId, ProductStatus};

pub use page::{
    ActionForm, ActionKind, ActionOutcome, LogicError, Modal, PageAction, PendingAction,
    ProductForm, ProductsPage, Submission, Toast,
};
pub use selection::Selection;
pub use state::{ListingAction, ListingState, SortKey, StatusFilter, StatusTab};

/// Rows shown per page.
pub const PAGE_SIZE: usize = 5;

/// A catalog row the listing pipeline can filter and sort.
pub trait Listable {
    /// Platform identifier.
    fn id(&self) -> &ProductId;
    /// Product title.
    fn title(&self) -> &str;
    /// Publication status.
    fn status(&self) -> ProductStatus;
    /// Last update timestamp, if known.
    fn updated_at(&self) -> Option<DateTime<Utc>>;
    /// Minimum variant price amount, if known.
    fn min_price(&self) -> Option<Decimal>;
}

/// The visible slice of the catalog for one listing state.
#[derive(Debug)]
pub struct ListingPage<'a, T> {
    /// Rows on the current page, in display order.
    pub rows: Vec<&'a T>,
    /// Number of rows that passed the filter.
    pub filtered_count: usize,
    /// `ceil(filtered_count / PAGE_SIZE)`.
    pub page_count: usize,
    /// Current page index after clamping (1-based).
    pub page: usize,
}

impl<T> ListingPage<'_, T> {
    /// Whether a previous page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Whether a next page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.page_count
    }

    /// 1-based index of the first row on this page (0 when empty).
    #[must_use]
    pub const fn first_row(&self) -> usize {
        if self.rows.is_empty() {
            0
        } else {
            (self.page - 1) * PAGE_SIZE + 1
        }
    }

    /// 1-based index of the last row on this page (0 when empty).
    #[must_use]
    pub const fn last_row(&self) -> usize {
        if self.rows.is_empty() {
            0
        } else {
            (self.page - 1) * PAGE_SIZE + self.rows.len()
        }
    }
}

/// Number of pages needed for `count` rows.
#[must_use]
pub const fn page_count(count: usize) -> usize {
    count.div_ceil(PAGE_SIZE)
}

/// Clamp a requested page into `1..=page_count` (1 when there are no pages).
#[must_use]
pub fn clamp_page(page: usize, page_count: usize) -> usize {
    page.clamp(1, page_count.max(1))
}

/// Keep the rows matching the query and status filter, preserving order.
#[must_use]
pub fn filter<'a, T: Listable>(
    items: &'a [T],
    query: &str,
    statuses: &StatusFilter,
) -> Vec<&'a T> {
    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| statuses.allows(item.status()))
        .filter(|item| needle.is_empty() || item.title().to_lowercase().contains(&needle))
        .collect()
}

/// Stable sort by the given key.
pub fn sort<T: Listable>(rows: &mut [&T], key: SortKey) {
    rows.sort_by(|a, b| compare(*a, *b, key));
}

/// Total order for one sort key.
#[must_use]
pub fn compare<T: Listable>(a: &T, b: &T, key: SortKey) -> Ordering {
    match key {
        SortKey::TitleAsc => compare_titles(a.title(), b.title()),
        SortKey::TitleDesc => compare_titles(b.title(), a.title()),
        SortKey::UpdatedAtAsc => a.updated_at().cmp(&b.updated_at()),
        SortKey::UpdatedAtDesc => b.updated_at().cmp(&a.updated_at()),
        SortKey::PriceAsc => price_or_zero(a).cmp(&price_or_zero(b)),
        SortKey::PriceDesc => price_or_zero(b).cmp(&price_or_zero(a)),
    }
}

// Case-folded first so "apple" < "Banana"; raw bytes break ties.
fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn price_or_zero<T: Listable>(item: &T) -> Decimal {
    item.min_price().unwrap_or(Decimal::ZERO)
}

/// Run filter, sort and paginate for one listing state.
#[must_use]
pub fn derive_page<'a, T: Listable>(items: &'a [T], state: &ListingState) -> ListingPage<'a, T> {
    let mut rows = filter(items, &state.query, &state.statuses);
    sort(&mut rows, state.sort);

    let filtered_count = rows.len();
    let page_count = page_count(filtered_count);
    let page = clamp_page(state.page, page_count);

    let rows = rows
        .into_iter()
        .skip((page - 1) * PAGE_SIZE)
        .take(PAGE_SIZE)
        .collect();

    ListingPage {
        rows,
        filtered_count,
        page_count,
        page,
    }
}
