//! Repository for the `products` table.
//!
//! Listing queries are assembled from a [`ProductFilter`] list. Only
//! placeholders carry request values; column names and sort directions come
//! from `match` arms over the core enums.

use async_trait::async_trait;
use bloom_core::filter::ProductFilter;
use bloom_core::product::Product;
use bloom_core::reader::ProductReader;
use bloom_core::sorting::{SortField, SortOrder};
use bloom_core::types::DbId;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{PgPool, Postgres};

use crate::models::product::{CreateProduct, ProductRow};

/// Column list for products queries.
const COLUMNS: &str = "id, name, price, category, created_at, quantity_sold, \
    available_quantity, description, image";

/// Provides read queries (and a fixture insert) for products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a product, returning the created row.
    ///
    /// The catalog itself never writes; this serves fixtures and loaders.
    pub async fn create(pool: &PgPool, input: &CreateProduct) -> Result<ProductRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO products \
                (name, price, category, created_at, quantity_sold, \
                 available_quantity, description, image) \
             VALUES ($1, $2, $3, COALESCE($4, now()), COALESCE($5, 0), \
                     COALESCE($6, 0), COALESCE($7, ''), COALESCE($8, '')) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProductRow>(&query)
            .bind(&input.name)
            .bind(input.price)
            .bind(&input.category)
            .bind(input.created_at)
            .bind(input.quantity_sold)
            .bind(input.available_quantity)
            .bind(input.description.as_deref())
            .bind(input.image.as_deref())
            .fetch_one(pool)
            .await
    }

    /// Find a product by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ProductRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, ProductRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Count products matching every filter.
    pub async fn count(pool: &PgPool, filters: &[ProductFilter]) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM products {}", where_clause(filters));

        let (count,) = bind_filters(sqlx::query_as::<_, (i64,)>(&query), filters)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// List one window of products matching every filter.
    pub async fn list(
        pool: &PgPool,
        filters: &[ProductFilter],
        sort: SortOrder,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ProductRow>, sqlx::Error> {
        let limit_idx = filters.len() + 1;
        let query = format!(
            "SELECT {COLUMNS} FROM products {where_clause} \
             {order_by} \
             LIMIT ${limit_idx} OFFSET ${offset_idx}",
            where_clause = where_clause(filters),
            order_by = order_by_clause(sort),
            offset_idx = limit_idx + 1,
        );

        let q = bind_filters(sqlx::query_as::<_, ProductRow>(&query), filters);

        tracing::debug!(filters = filters.len(), %sort, limit, offset, "Listing products");
        q.bind(limit).bind(offset).fetch_all(pool).await
    }
}

/// Build `WHERE ...` with `$1..$n` placeholders in filter order.
fn where_clause(filters: &[ProductFilter]) -> String {
    if filters.is_empty() {
        return String::new();
    }
    let conditions: Vec<String> = filters
        .iter()
        .enumerate()
        .map(|(i, filter)| {
            let idx = i + 1;
            match filter {
                ProductFilter::CategoryEq(_) => format!("category = ${idx}"),
                ProductFilter::PriceAtLeast(_) => format!("price >= ${idx}"),
                ProductFilter::PriceAtMost(_) => format!("price <= ${idx}"),
                ProductFilter::CreatedSince(_) => format!("created_at >= ${idx}"),
            }
        })
        .collect();
    format!("WHERE {}", conditions.join(" AND "))
}

/// Bind filter values in the order [`where_clause`] numbers them.
fn bind_filters<'q, O>(
    mut q: QueryAs<'q, Postgres, O, PgArguments>,
    filters: &'q [ProductFilter],
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for filter in filters {
        q = match filter {
            ProductFilter::CategoryEq(category) => q.bind(category.as_str()),
            ProductFilter::PriceAtLeast(price) | ProductFilter::PriceAtMost(price) => q.bind(*price),
            ProductFilter::CreatedSince(since) => q.bind(*since),
        };
    }
    q
}

fn sort_column(field: SortField) -> &'static str {
    match field {
        SortField::Id => "id",
        SortField::Name => "name",
        SortField::Price => "price",
        SortField::Category => "category",
        SortField::CreatedAt => "created_at",
        SortField::QuantitySold => "quantity_sold",
        SortField::AvailableQuantity => "available_quantity",
    }
}

fn order_by_clause(sort: SortOrder) -> String {
    let direction = if sort.is_descending() { "DESC" } else { "ASC" };
    format!("ORDER BY {} {direction}, id ASC", sort_column(sort.field))
}

// ---------------------------------------------------------------------------
// ProductReader implementation
// ---------------------------------------------------------------------------

/// [`ProductReader`] backed by the PostgreSQL pool.
#[derive(Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductReader for PgProductStore {
    type Error = sqlx::Error;

    async fn count(&self, filters: &[ProductFilter]) -> Result<i64, sqlx::Error> {
        ProductRepo::count(&self.pool, filters).await
    }

    async fn fetch_page(
        &self,
        filters: &[ProductFilter],
        sort: SortOrder,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let rows = ProductRepo::list(&self.pool, filters, sort, limit, offset).await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        Ok(ProductRepo::find_by_id(&self.pool, id)
            .await?
            .map(Product::from))
    }
}
