//! Core types for AgriLink.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod role;
pub mod tags;

pub use email::{Email, EmailError};
pub use id::*;
pub use role::Role;
pub use tags::{join_tags, split_tags};
