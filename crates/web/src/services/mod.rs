//! Business logic services.
//!
//! # Services
//!
//! - `auth` - Registration, password login and the per-request user loader
//! - `products` - Product creation (with input validation) and listing

pub mod auth;
pub mod products;
