//! Domain models for Stockroom.
//!
//! These types represent validated domain objects separate from database row types.

pub mod product;
pub mod session;
pub mod user;

pub use product::{NewProduct, Product};
pub use session::{CurrentUser, Flash, keys as session_keys};
pub use user::User;
