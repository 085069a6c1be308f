//! Core types for Product Desk.
//!
//! This module provides type-safe wrappers for common catalog concepts.

pub mod id;
pub mod input;
pub mod price;
pub mod status;
pub mod tags;

pub use id::*;
pub use input::{ProductInput, UserError};
pub use price::{CurrencyCode, Price};
pub use status::*;
pub use tags::TagList;
