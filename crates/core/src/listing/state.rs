//! Filter, sort and page state for the listing, with its reducer.

use std::collections::BTreeSet;

use crate::types::ProductStatus;

/// Sort options offered by the products table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    /// Title A to Z.
    TitleAsc,
    /// Title Z to A.
    TitleDesc,
    /// Least recently updated first.
    UpdatedAtAsc,
    /// Most recently updated first.
    #[default]
    UpdatedAtDesc,
    /// Cheapest first (minimum variant price).
    PriceAsc,
    /// Most expensive first (minimum variant price).
    PriceDesc,
}

impl SortKey {
    /// All keys, in the order the sort menu lists them.
    pub const ALL: [Self; 6] = [
        Self::TitleAsc,
        Self::TitleDesc,
        Self::UpdatedAtDesc,
        Self::UpdatedAtAsc,
        Self::PriceAsc,
        Self::PriceDesc,
    ];

    /// Query-string value, e.g. `"updated_at desc"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TitleAsc => "title asc",
            Self::TitleDesc => "title desc",
            Self::UpdatedAtAsc => "updated_at asc",
            Self::UpdatedAtDesc => "updated_at desc",
            Self::PriceAsc => "price asc",
            Self::PriceDesc => "price desc",
        }
    }

    /// Menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::TitleAsc => "Title (A → Z)",
            Self::TitleDesc => "Title (Z → A)",
            Self::UpdatedAtAsc => "Updated (oldest)",
            Self::UpdatedAtDesc => "Updated (newest)",
            Self::PriceAsc => "Price (low → high)",
            Self::PriceDesc => "Price (high → low)",
        }
    }

    /// Parse a query-string value. Unknown values fall back to the default.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let normalized = value.trim().replace('+', " ");
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == normalized)
            .unwrap_or_default()
    }
}

/// Set of statuses a row must belong to. Empty means any status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusFilter(BTreeSet<ProductStatus>);

impl StatusFilter {
    /// Build a filter from statuses.
    #[must_use]
    pub fn new(statuses: impl IntoIterator<Item = ProductStatus>) -> Self {
        Self(statuses.into_iter().collect())
    }

    /// Parse a comma-separated list such as `"ACTIVE,DRAFT"`.
    ///
    /// Unknown entries are ignored.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        Self::new(value.split(',').filter_map(|s| s.parse().ok()))
    }

    /// Comma-separated query-string value.
    #[must_use]
    pub fn to_query_value(&self) -> String {
        self.0
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Whether a row with `status` passes the filter.
    #[must_use]
    pub fn allows(&self, status: ProductStatus) -> bool {
        self.0.is_empty() || self.0.contains(&status)
    }

    /// Whether the filter explicitly includes `status`.
    #[must_use]
    pub fn contains(&self, status: ProductStatus) -> bool {
        self.0.contains(&status)
    }

    /// Whether no status constraint is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the selected statuses.
    pub fn iter(&self) -> impl Iterator<Item = ProductStatus> + '_ {
        self.0.iter().copied()
    }

    /// Label for the applied-filter pill, e.g. `"Status: Active, Draft"`.
    #[must_use]
    pub fn label(&self) -> String {
        let names: Vec<&str> = self.0.iter().map(|s| s.label()).collect();
        format!("Status: {}", names.join(", "))
    }
}

/// Tabs above the products table. Each tab is a preset status filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusTab {
    /// No status constraint.
    #[default]
    All,
    /// Active products only.
    Active,
    /// Draft products only.
    Draft,
    /// Archived products only.
    Archived,
}

impl StatusTab {
    /// Tabs in display order.
    pub const ALL: [Self; 4] = [Self::All, Self::Active, Self::Draft, Self::Archived];

    /// Tab label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Active => "Active",
            Self::Draft => "Draft",
            Self::Archived => "Archived",
        }
    }

    /// Query-string value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Draft => "draft",
            Self::Archived => "archived",
        }
    }

    /// Parse a query-string value.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tab| tab.as_str().eq_ignore_ascii_case(value.trim()))
    }

    /// The status filter this tab applies.
    #[must_use]
    pub fn statuses(self) -> StatusFilter {
        match self {
            Self::All => StatusFilter::default(),
            Self::Active => StatusFilter::new([ProductStatus::Active]),
            Self::Draft => StatusFilter::new([ProductStatus::Draft]),
            Self::Archived => StatusFilter::new([ProductStatus::Archived]),
        }
    }

    /// The tab matching a status filter exactly, if any.
    #[must_use]
    pub fn for_filter(filter: &StatusFilter) -> Option<Self> {
        Self::ALL.into_iter().find(|tab| tab.statuses() == *filter)
    }
}

/// Filter text, status filter, sort key and page index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingState {
    /// Title search text.
    pub query: String,
    /// Status constraint.
    pub statuses: StatusFilter,
    /// Active sort.
    pub sort: SortKey,
    /// Requested page (1-based); clamped when the page is derived.
    pub page: usize,
}

impl Default for ListingState {
    fn default() -> Self {
        Self {
            query: String::new(),
            statuses: StatusFilter::default(),
            sort: SortKey::default(),
            page: 1,
        }
    }
}

/// Transitions on [`ListingState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingAction {
    /// Replace the title search text.
    SetQuery(String),
    /// Clear the title search text.
    ClearQuery,
    /// Replace the status filter.
    SetStatuses(StatusFilter),
    /// Switch to a status tab.
    SelectTab(StatusTab),
    /// Remove the applied status filter.
    RemoveStatusFilter,
    /// Change the sort.
    SetSort(SortKey),
    /// Clear query and status filter.
    ClearAll,
    /// Jump to a page.
    GoToPage(usize),
    /// Advance one page.
    NextPage,
    /// Go back one page.
    PreviousPage,
}

impl ListingState {
    /// Apply one action. Any change to what is shown resets the page to 1.
    #[must_use]
    pub fn apply(self, action: ListingAction) -> Self {
        match action {
            ListingAction::SetQuery(query) => Self {
                query,
                page: 1,
                ..self
            },
            ListingAction::ClearQuery => Self {
                query: String::new(),
                page: 1,
                ..self
            },
            ListingAction::SetStatuses(statuses) => Self {
                statuses,
                page: 1,
                ..self
            },
            ListingAction::SelectTab(tab) => Self {
                statuses: tab.statuses(),
                page: 1,
                ..self
            },
            ListingAction::RemoveStatusFilter => Self {
                statuses: StatusFilter::default(),
                page: 1,
                ..self
            },
            ListingAction::SetSort(sort) => Self {
                sort,
                page: 1,
                ..self
            },
            ListingAction::ClearAll => Self {
                query: String::new(),
                statuses: StatusFilter::default(),
                page: 1,
                ..self
            },
            ListingAction::GoToPage(page) => Self {
                page: page.max(1),
                ..self
            },
            ListingAction::NextPage => Self {
                page: self.page.saturating_add(1),
                ..self
            },
            ListingAction::PreviousPage => Self {
                page: self.page.saturating_sub(1).max(1),
                ..self
            },
        }
    }

    /// Clamp the page index against the current number of pages.
    #[must_use]
    pub fn clamped(self, page_count: usize) -> Self {
        Self {
            page: super::clamp_page(self.page, page_count),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on_page_three() -> ListingState {
        ListingState::default().apply(ListingAction::GoToPage(3))
    }

    #[test]
    fn test_filter_and_sort_changes_reset_page() {
        let actions = [
            ListingAction::SetQuery("tee".to_string()),
            ListingAction::ClearQuery,
            ListingAction::SetStatuses(StatusFilter::new([ProductStatus::Draft])),
            ListingAction::SelectTab(StatusTab::Archived),
            ListingAction::RemoveStatusFilter,
            ListingAction::SetSort(SortKey::PriceDesc),
            ListingAction::ClearAll,
        ];
        for action in actions {
            let state = on_page_three().apply(action.clone());
            assert_eq!(state.page, 1, "{action:?}");
        }
    }

    #[test]
    fn test_page_navigation_keeps_filters() {
        let state = ListingState::default()
            .apply(ListingAction::SetQuery("tee".to_string()))
            .apply(ListingAction::NextPage)
            .apply(ListingAction::NextPage)
            .apply(ListingAction::PreviousPage);
        assert_eq!(state.page, 2);
        assert_eq!(state.query, "tee");
    }

    #[test]
    fn test_previous_page_stops_at_one() {
        let state = ListingState::default().apply(ListingAction::PreviousPage);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_clamped() {
        assert_eq!(on_page_three().clamped(2).page, 2);
        assert_eq!(on_page_three().clamped(0).page, 1);
        assert_eq!(on_page_three().clamped(5).page, 3);
    }

    #[test]
    fn test_select_tab_sets_statuses() {
        let state = ListingState::default().apply(ListingAction::SelectTab(StatusTab::Draft));
        assert_eq!(state.statuses, StatusFilter::new([ProductStatus::Draft]));
        let state = state.apply(ListingAction::SelectTab(StatusTab::All));
        assert!(state.statuses.is_empty());
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!(SortKey::parse("title asc"), SortKey::TitleAsc);
        assert_eq!(SortKey::parse("price+desc"), SortKey::PriceDesc);
        assert_eq!(SortKey::parse("bogus"), SortKey::UpdatedAtDesc);
        for key in SortKey::ALL {
            assert_eq!(SortKey::parse(key.as_str()), key);
        }
    }

    #[test]
    fn test_status_filter_parse_and_render() {
        let filter = StatusFilter::parse("draft, ACTIVE,nope");
        assert_eq!(
            filter,
            StatusFilter::new([ProductStatus::Active, ProductStatus::Draft])
        );
        assert_eq!(filter.to_query_value(), "ACTIVE,DRAFT");
        assert_eq!(filter.label(), "Status: Active, Draft");
        assert!(StatusFilter::parse("").is_empty());
    }

    #[test]
    fn test_tab_for_filter() {
        assert_eq!(StatusTab::for_filter(&StatusFilter::default()), Some(StatusTab::All));
        assert_eq!(
            StatusTab::for_filter(&StatusFilter::new([ProductStatus::Archived])),
            Some(StatusTab::Archived)
        );
        assert_eq!(
            StatusTab::for_filter(&StatusFilter::new([
                ProductStatus::Active,
                ProductStatus::Draft
            ])),
            None
        );
        assert_eq!(StatusTab::parse("Draft"), Some(StatusTab::Draft));
        assert_eq!(StatusTab::parse("x"), None);
    }
}
