//! Read interface over the product store.

use async_trait::async_trait;

use crate::filter::ProductFilter;
use crate::product::Product;
use crate::sorting::SortOrder;
use crate::types::DbId;

/// Read-only access to products, implemented by the storage layer.
///
/// Filters passed to [`count`](ProductReader::count) and
/// [`fetch_page`](ProductReader::fetch_page) are combined with AND.
#[async_trait]
pub trait ProductReader: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Number of products matching every filter.
    async fn count(&self, filters: &[ProductFilter]) -> Result<i64, Self::Error>;

    /// One window of matching products in the given order.
    async fn fetch_page(
        &self,
        filters: &[ProductFilter],
        sort: SortOrder,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Product>, Self::Error>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Product>, Self::Error>;
}
