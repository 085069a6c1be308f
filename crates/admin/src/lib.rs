//! Product Desk admin library.
//!
//! This crate provides the admin functionality as a library,
//! allowing it to be tested and reused.
//!
//! # Security
//!
//! This crate holds a HIGH PRIVILEGE Shopify Admin API token with write
//! access to the store's catalog. Only deploy it on private infrastructure.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod components;
pub mod config;
pub mod error;
pub mod filters;
pub mod routes;
pub mod shopify;
pub mod state;
