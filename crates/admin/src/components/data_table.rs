//! Data table component types.
//!
//! These types define the configuration for the products table: its
//! columns, the status filter, the sort menu and the row actions.

use product_desk_core::ProductStatus;
use product_desk_core::listing::{ActionKind, SortKey};

/// Column definition for a data table.
#[derive(Debug, Clone)]
pub struct TableColumn {
    /// Unique key for the column.
    pub key: &'static str,
    /// Display label for the column header.
    pub label: &'static str,
    /// Sorts applied by the header, ascending then descending.
    pub sorts: Option<(SortKey, SortKey)>,
}

impl TableColumn {
    /// Create a new sortable column.
    #[must_use]
    pub const fn sortable(key: &'static str, label: &'static str, asc: SortKey, desc: SortKey) -> Self {
        Self {
            key,
            label,
            sorts: Some((asc, desc)),
        }
    }

    /// Create a new non-sortable column.
    #[must_use]
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            sorts: None,
        }
    }

    /// Sort the header applies next: ascending unless ascending is current.
    #[must_use]
    pub fn next_sort(&self, current: SortKey) -> Option<SortKey> {
        self.sorts
            .map(|(asc, desc)| if current == asc { desc } else { asc })
    }
}

/// Option for select/multiselect filters.
#[derive(Debug, Clone)]
pub struct FilterOption {
    /// Option value.
    pub value: &'static str,
    /// Display label.
    pub label: &'static str,
}

/// Multi-select filter definition.
#[derive(Debug, Clone)]
pub struct TableFilter {
    /// Filter parameter key.
    pub key: &'static str,
    /// Display label.
    pub label: &'static str,
    /// Available options.
    pub options: Vec<FilterOption>,
}

/// Row action shown above the table.
#[derive(Debug, Clone)]
pub struct RowAction {
    /// The action the button opens.
    pub kind: ActionKind,
    /// Display label.
    pub label: &'static str,
    /// Phosphor icon class.
    pub icon: &'static str,
    /// Whether this is a destructive action.
    pub destructive: bool,
}

impl RowAction {
    /// Create a new row action.
    #[must_use]
    pub const fn new(kind: ActionKind, label: &'static str, icon: &'static str) -> Self {
        Self {
            kind,
            label,
            icon,
            destructive: false,
        }
    }

    /// Mark this action as destructive.
    #[must_use]
    pub const fn destructive(mut self) -> Self {
        self.destructive = true;
        self
    }
}

/// Configuration for a data table.
#[derive(Debug, Clone)]
pub struct DataTableConfig {
    /// Unique table identifier.
    pub table_id: &'static str,
    /// Column definitions.
    pub columns: Vec<TableColumn>,
    /// Filter definitions.
    pub filters: Vec<TableFilter>,
    /// Actions on the selected row.
    pub row_actions: Vec<RowAction>,
    /// Search placeholder text.
    pub search_placeholder: &'static str,
    /// Icon for empty state.
    pub empty_icon: &'static str,
    /// Title for empty state.
    pub empty_title: &'static str,
    /// Description for empty state.
    pub empty_description: Option<&'static str>,
}

impl DataTableConfig {
    /// Create a new data table configuration.
    #[must_use]
    pub const fn new(table_id: &'static str) -> Self {
        Self {
            table_id,
            columns: vec![],
            filters: vec![],
            row_actions: vec![],
            search_placeholder: "Search...",
            empty_icon: "ph-list",
            empty_title: "No items found",
            empty_description: None,
        }
    }

    /// Add a column.
    #[must_use]
    pub fn column(mut self, column: TableColumn) -> Self {
        self.columns.push(column);
        self
    }

    /// Add a filter.
    #[must_use]
    pub fn filter(mut self, filter: TableFilter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Add a row action.
    #[must_use]
    pub fn row_action(mut self, action: RowAction) -> Self {
        self.row_actions.push(action);
        self
    }

    /// Set search placeholder.
    #[must_use]
    pub fn search_placeholder(mut self, placeholder: &'static str) -> Self {
        self.search_placeholder = placeholder;
        self
    }

    /// Set empty state configuration.
    #[must_use]
    pub fn empty_state(
        mut self,
        icon: &'static str,
        title: &'static str,
        description: Option<&'static str>,
    ) -> Self {
        self.empty_icon = icon;
        self.empty_title = title;
        self.empty_description = description;
        self
    }
}

/// Build the products table configuration.
#[must_use]
pub fn products_table_config() -> DataTableConfig {
    DataTableConfig::new("products")
        .column(TableColumn::sortable(
            "title",
            "Product",
            SortKey::TitleAsc,
            SortKey::TitleDesc,
        ))
        .column(TableColumn::new("status", "Status"))
        .column(TableColumn::new("tags", "Tags"))
        .column(TableColumn::new("type", "Type"))
        .column(TableColumn::new("vendor", "Vendor"))
        .column(TableColumn::sortable(
            "price",
            "Price",
            SortKey::PriceAsc,
            SortKey::PriceDesc,
        ))
        .column(TableColumn::sortable(
            "updated",
            "Updated",
            SortKey::UpdatedAtAsc,
            SortKey::UpdatedAtDesc,
        ))
        .filter(TableFilter {
            key: "status",
            label: "Status",
            options: ProductStatus::ALL
                .into_iter()
                .map(|status| FilterOption {
                    value: status.as_str(),
                    label: status.label(),
                })
                .collect(),
        })
        .row_action(RowAction::new(ActionKind::Update, "Edit", "ph-pencil-simple"))
        .row_action(RowAction::new(ActionKind::Delete, "Delete", "ph-trash").destructive())
        .search_placeholder("Search products by title...")
        .empty_state(
            "ph-package",
            "No products found",
            Some("Try adjusting your search or filters"),
        )
}
