//! Reusable view components.

pub mod data_table;

pub use data_table::{DataTableConfig, RowAction, TableColumn, TableFilter, products_table_config};
