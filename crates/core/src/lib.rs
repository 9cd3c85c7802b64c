//! Stockroom Core - Shared domain types.
//!
//! This crate provides the types used across all Stockroom components:
//! - `web` - The inventory web application
//! - `cli` - Command-line tools for migrations and user management
//!
//! # Architecture
//!
//! The core crate contains only types and parsing rules - no I/O, no database
//! access, no HTTP. Every value that arrives from a form is parsed into one of
//! these types before it reaches storage.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, usernames, passwords and product fields

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
