//! Bloom catalog domain layer.
//!
//! Holds the product entity, the catalog query translation (filters, sort,
//! pagination) and the read interface the storage layer implements. This
//! crate carries no database vocabulary so the same query logic serves the
//! HTML and JSON adapters as well as in-memory fixtures.

pub mod catalog;
pub mod error;
pub mod filter;
pub mod pagination;
pub mod product;
pub mod reader;
pub mod sorting;
pub mod types;
