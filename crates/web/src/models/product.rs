//! Product domain types.

use stockroom_core::{Price, ProductId, ProductName, Quantity, Reference, UserId};

/// A stored product.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Units in stock.
    pub quantity: Quantity,
    /// Optional owner-unique reference code.
    pub reference: Option<String>,
    /// Owning account, if any.
    pub owner_id: Option<UserId>,
}

/// A validated product ready to insert.
///
/// Every field has already been parsed, so constructing one is proof the
/// input was well-formed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: ProductName,
    pub price: Price,
    pub quantity: Quantity,
    pub reference: Option<Reference>,
    pub owner: Option<UserId>,
}
