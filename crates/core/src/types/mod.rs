//! Core types for Stockroom.
//!
//! This module provides type-safe wrappers for the domain concepts that
//! cross the HTTP/storage boundary.

pub mod flash;
pub mod id;
pub mod password;
pub mod price;
pub mod product;
pub mod username;

pub use flash::FlashLevel;
pub use id::*;
pub use password::{MIN_PASSWORD_LENGTH, PasswordError, validate_password};
pub use price::{Price, PriceError};
pub use product::{
    ProductName, ProductNameError, Quantity, QuantityError, Reference, ReferenceError,
};
pub use username::{Username, UsernameError};
