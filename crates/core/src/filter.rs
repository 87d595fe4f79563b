//! Composable product filters.
//!
//! A catalog query carries a list of [`ProductFilter`] predicates that are
//! combined with AND. The storage layer translates each predicate into its
//! own query language; [`ProductFilter::matches`] evaluates the same
//! predicate against an in-memory [`Product`].

use crate::product::Product;
use crate::types::{Price, Timestamp};

/// A single predicate/value pair over the product table.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductFilter {
    /// `category = value` (exact, case-sensitive).
    CategoryEq(String),
    /// `price >= value`.
    PriceAtLeast(Price),
    /// `price <= value`.
    PriceAtMost(Price),
    /// `created_at >= value`.
    CreatedSince(Timestamp),
}

impl ProductFilter {
    /// Evaluate the predicate against a product.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            ProductFilter::CategoryEq(category) => product.category == *category,
            ProductFilter::PriceAtLeast(min) => product.price >= *min,
            ProductFilter::PriceAtMost(max) => product.price <= *max,
            ProductFilter::CreatedSince(since) => product.created_at >= *since,
        }
    }
}

/// Returns `true` if the product satisfies every filter.
pub fn matches_all(filters: &[ProductFilter], product: &Product) -> bool {
    filters.iter().all(|f| f.matches(product))
}
