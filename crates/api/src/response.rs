//! JSON payloads for the client-side rendered listing.
//!
//! Prices are serialized as strings with two decimal places so clients never
//! see floating-point rounding.

use bloom_core::catalog::ProductPage;
use bloom_core::product::Product;
use bloom_core::types::DbId;
use serde::Serialize;

/// One product in the JSON listing.
#[derive(Debug, Serialize)]
pub struct ProductSummary {
    pub id: DbId,
    pub name: String,
    pub price: String,
    pub category: String,
    pub category_display: String,
    pub quantity_sold: i32,
    pub availability_status: &'static str,
}

impl From<&Product> for ProductSummary {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: format_price(product),
            category: product.category.clone(),
            category_display: product.category_display().to_string(),
            quantity_sold: product.quantity_sold,
            availability_status: product.availability_status(),
        }
    }
}

/// Response body of `GET /ajax-product-list/`.
#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<ProductSummary>,
    pub page: i64,
    pub num_pages: i64,
    pub has_previous: bool,
    pub has_next: bool,
    pub previous_page_number: Option<i64>,
    pub next_page_number: Option<i64>,
}

impl From<&ProductPage> for ProductListResponse {
    fn from(page: &ProductPage) -> Self {
        let info = &page.page;
        Self {
            products: page.products.iter().map(ProductSummary::from).collect(),
            page: info.number,
            num_pages: info.num_pages,
            has_previous: info.has_previous(),
            has_next: info.has_next(),
            previous_page_number: info.previous_page_number(),
            next_page_number: info.next_page_number(),
        }
    }
}

/// Price with exactly two decimal places, e.g. `"12.50"`.
pub fn format_price(product: &Product) -> String {
    format!("{:.2}", product.price)
}
