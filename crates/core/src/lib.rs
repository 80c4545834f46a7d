//! Stech Core - Shared types library.
//!
//! This crate provides the common types used across the Stech storefront:
//! newtype IDs, catalog records matching the mock API wire format, and
//! price display helpers.
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, `Product`/`Category` records, and price helpers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
