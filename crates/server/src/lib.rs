//! AgriLink server library.
//!
//! This crate provides the catalog application as a library, allowing it
//! to be tested and reused by the CLI.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod records;
pub mod routes;
pub mod search;
pub mod services;
pub mod state;
pub mod store;
