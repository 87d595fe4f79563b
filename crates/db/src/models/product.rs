//! Product row and insert DTO.

use bloom_core::product::Product;
use bloom_core::types::{DbId, Price, Timestamp};
use sqlx::FromRow;

/// A row from the `products` table.
#[derive(Debug, Clone, FromRow)]
pub struct ProductRow {
    pub id: DbId,
    pub name: String,
    pub price: Price,
    pub category: String,
    pub created_at: Timestamp,
    pub quantity_sold: i32,
    pub available_quantity: i32,
    pub description: String,
    pub image: String,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            price: row.price,
            category: row.category,
            created_at: row.created_at,
            quantity_sold: row.quantity_sold,
            available_quantity: row.available_quantity,
            description: row.description,
            image: row.image,
        }
    }
}

/// DTO for inserting a product (fixtures and data loading).
///
/// `created_at` defaults to `now()` when absent.
#[derive(Debug, Clone)]
pub struct CreateProduct {
    pub name: String,
    pub price: Price,
    pub category: String,
    pub created_at: Option<Timestamp>,
    pub quantity_sold: Option<i32>,
    pub available_quantity: Option<i32>,
    pub description: Option<String>,
    pub image: Option<String>,
}
