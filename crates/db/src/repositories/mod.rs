//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` as the first argument.

pub mod product_repo;

pub use product_repo::{PgProductStore, ProductRepo};
