//! AgriLink Core - Shared types library.
//!
//! This crate provides common types used across all AgriLink components:
//! - `server` - Catalog web application (soil types and distributors)
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types and small pure helpers - no I/O, no
//! database access, no HTTP clients. This keeps it lightweight and allows it
//! to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, and roles, plus
//!   the comma-separated tag list helpers shared by forms and seeders

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
