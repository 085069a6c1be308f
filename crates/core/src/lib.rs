//! Product Desk Core - Shared types library.
//!
//! This crate provides the types used by the Product Desk admin panel:
//! - `admin` - Merchant-facing product catalog management
//! - `integration-tests` - End-to-end tests against a fake Admin API
//!
//! # Architecture
//!
//! The core crate contains only types, traits and pure functions - no I/O, no
//! HTTP clients. The listing view model lives here so that every transition
//! can be tested without a browser or a network.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product ids, statuses, prices and tags
//! - [`listing`] - Filter/sort/paginate pipeline and page-level state reducer

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod listing;
pub mod types;

pub use types::*;
