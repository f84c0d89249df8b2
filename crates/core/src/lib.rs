//! Portfolio Core - Shared types library.
//!
//! This crate provides common types used across the portfolio backend:
//! - `api` - Public JSON API server
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. The optional `postgres` feature adds sqlx column encodings so the
//! types can be stored directly in TEXT columns.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
