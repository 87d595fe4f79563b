//! Catalog query translation.
//!
//! [`CatalogParams`] holds the raw, optional query-string values shared by
//! the HTML listing and the JSON endpoint. [`CatalogQuery::from_params`]
//! turns them into a list of filters and a validated sort order;
//! malformed values never fail, they simply leave their filter out.
//! [`list_products`] runs the query against a [`ProductReader`] and
//! paginates the result.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CoreError};
use crate::filter::ProductFilter;
use crate::pagination::{PageInfo, PAGE_SIZE};
use crate::product::Product;
use crate::reader::ProductReader;
use crate::sorting::SortOrder;
use crate::types::{DbId, Price, Timestamp};

/// Raw listing parameters as received from the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CatalogParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<String>,
    /// Number of days back from now.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
}

impl CatalogParams {
    /// Copy of these parameters pointing at another page.
    pub fn with_page(&self, page: i64) -> Self {
        Self {
            page: Some(page.to_string()),
            ..self.clone()
        }
    }

    /// Copy of these parameters with blank values dropped and no page.
    ///
    /// Used for links and forms that should keep the active filters.
    pub fn active_filters(&self) -> Self {
        Self {
            category: non_blank(&self.category).map(str::to_string),
            min_price: non_blank(&self.min_price).map(str::to_string),
            max_price: non_blank(&self.max_price).map(str::to_string),
            date_range: non_blank(&self.date_range).map(str::to_string),
            sort_by: non_blank(&self.sort_by).map(str::to_string),
            page: None,
        }
    }
}

/// A translated listing query.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogQuery {
    /// Applied in order: category, min price, max price, date range.
    pub filters: Vec<ProductFilter>,
    pub sort: SortOrder,
    /// Raw page value, resolved once the result size is known.
    pub page: Option<String>,
}

impl CatalogQuery {
    /// Translate raw parameters. `now` anchors the `date_range` window.
    pub fn from_params(params: &CatalogParams, now: Timestamp) -> Self {
        let mut filters = Vec::new();

        if let Some(category) = non_blank(&params.category) {
            filters.push(ProductFilter::CategoryEq(category.to_string()));
        }
        if let Some(min) = non_blank(&params.min_price).and_then(parse_price) {
            filters.push(ProductFilter::PriceAtLeast(min));
        }
        if let Some(max) = non_blank(&params.max_price).and_then(parse_price) {
            filters.push(ProductFilter::PriceAtMost(max));
        }
        if let Some(since) = non_blank(&params.date_range).and_then(|raw| created_since(raw, now)) {
            filters.push(ProductFilter::CreatedSince(since));
        }

        Self {
            filters,
            sort: SortOrder::from_param(non_blank(&params.sort_by)),
            page: params.page.clone(),
        }
    }
}

/// One page of a catalog listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub page: PageInfo,
    /// The sort order actually applied.
    pub sort: SortOrder,
}

/// Filter, sort and paginate the catalog.
pub async fn list_products<R>(
    reader: &R,
    params: &CatalogParams,
    now: Timestamp,
) -> Result<ProductPage, CatalogError<R::Error>>
where
    R: ProductReader + ?Sized,
{
    let query = CatalogQuery::from_params(params, now);

    let count = reader
        .count(&query.filters)
        .await
        .map_err(CatalogError::Store)?;
    let page = PageInfo::resolve(count, PAGE_SIZE, query.page.as_deref());

    let products = reader
        .fetch_page(&query.filters, query.sort, page.per_page, page.offset())
        .await
        .map_err(CatalogError::Store)?;

    Ok(ProductPage {
        products,
        page,
        sort: query.sort,
    })
}

/// Look up a single product, failing with `NotFound` when it does not exist.
pub async fn get_product<R>(reader: &R, id: DbId) -> Result<Product, CatalogError<R::Error>>
where
    R: ProductReader + ?Sized,
{
    reader
        .find_by_id(id)
        .await
        .map_err(CatalogError::Store)?
        .ok_or(CatalogError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Parse a price bound, accepting plain and scientific notation.
///
/// Numbers outside the `Decimal` range still bound the result: they clamp to
/// the extreme (or smallest non-zero) value of the same sign.
fn parse_price(raw: &str) -> Option<Price> {
    if let Ok(price) = Price::from_str(raw).or_else(|_| Price::from_scientific(raw)) {
        return Some(price);
    }

    let value: f64 = raw.parse().ok().filter(|v: &f64| !v.is_nan())?;
    let magnitude = if value == 0.0 {
        Price::ZERO
    } else if value.abs() >= 1.0 {
        Price::MAX
    } else {
        Price::new(1, 28)
    };
    Some(if value.is_sign_negative() { -magnitude } else { magnitude })
}

fn created_since(raw: &str, now: Timestamp) -> Option<Timestamp> {
    let days: i64 = raw.parse().ok()?;
    let window = chrono::Duration::try_days(days)?;
    now.checked_sub_signed(window)
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone, Utc};

    use super::*;
    use crate::filter::matches_all;
    use crate::product::tests::product;

    /// Reader over a fixed product list, evaluating filters in memory.
    struct MemoryReader {
        products: Vec<Product>,
    }

    #[async_trait]
    impl ProductReader for MemoryReader {
        type Error = Infallible;

        async fn count(&self, filters: &[ProductFilter]) -> Result<i64, Infallible> {
            Ok(self
                .products
                .iter()
                .filter(|p| matches_all(filters, p))
                .count() as i64)
        }

        async fn fetch_page(
            &self,
            filters: &[ProductFilter],
            sort: SortOrder,
            limit: i64,
            offset: i64,
        ) -> Result<Vec<Product>, Infallible> {
            let mut matching: Vec<Product> = self
                .products
                .iter()
                .filter(|p| matches_all(filters, p))
                .cloned()
                .collect();
            matching.sort_by(|a, b| sort.compare(a, b));
            Ok(matching
                .into_iter()
                .skip(offset as usize)
                .take(limit as usize)
                .collect())
        }

        async fn find_by_id(&self, id: DbId) -> Result<Option<Product>, Infallible> {
            Ok(self.products.iter().find(|p| p.id == id).cloned())
        }
    }

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    /// 25 products cycling through categories, prices 1..=25, sold = id % 7,
    /// created `id` days before `now()`.
    fn catalog() -> MemoryReader {
        let categories = ["bouquet", "single", "composition"];
        let products = (1..=25)
            .map(|id| {
                let mut p = product(
                    id,
                    &format!("Product {id}"),
                    &format!("{id}.00"),
                    categories[(id % 3) as usize],
                );
                p.quantity_sold = (id % 7) as i32;
                p.available_quantity = (id % 2) as i32;
                p.created_at = now() - Duration::days(id);
                p
            })
            .collect();
        MemoryReader { products }
    }

    fn params() -> CatalogParams {
        CatalogParams::default()
    }

    // -- translation ---------------------------------------------------------

    #[test]
    fn blank_params_produce_no_filters() {
        let p = CatalogParams {
            category: Some("  ".into()),
            min_price: Some(String::new()),
            ..params()
        };
        let query = CatalogQuery::from_params(&p, now());
        assert!(query.filters.is_empty());
        assert_eq!(query.sort, SortOrder::DEFAULT);
    }

    #[test]
    fn filters_follow_processing_order() {
        let p = CatalogParams {
            date_range: Some("7".into()),
            max_price: Some("20".into()),
            min_price: Some("5".into()),
            category: Some("single".into()),
            ..params()
        };
        let query = CatalogQuery::from_params(&p, now());
        assert_eq!(
            query.filters,
            vec![
                ProductFilter::CategoryEq("single".into()),
                ProductFilter::PriceAtLeast(Price::from(5)),
                ProductFilter::PriceAtMost(Price::from(20)),
                ProductFilter::CreatedSince(now() - Duration::days(7)),
            ]
        );
    }

    #[test]
    fn malformed_numbers_are_skipped() {
        let p = CatalogParams {
            min_price: Some("abc".into()),
            max_price: Some("12,5".into()),
            date_range: Some("week".into()),
            ..params()
        };
        assert!(CatalogQuery::from_params(&p, now()).filters.is_empty());
    }

    #[test]
    fn scientific_price_is_accepted() {
        let p = CatalogParams {
            min_price: Some("1e1".into()),
            ..params()
        };
        assert_eq!(
            CatalogQuery::from_params(&p, now()).filters,
            vec![ProductFilter::PriceAtLeast(Price::from(10))]
        );
    }

    #[test]
    fn out_of_range_prices_clamp_by_sign() {
        let bounds = |min: &str, max: &str| {
            let p = CatalogParams {
                min_price: Some(min.into()),
                max_price: Some(max.into()),
                ..params()
            };
            CatalogQuery::from_params(&p, now()).filters
        };

        assert_eq!(
            bounds("1e30", "-1e30"),
            vec![
                ProductFilter::PriceAtLeast(Price::MAX),
                ProductFilter::PriceAtMost(Price::MIN),
            ]
        );
        assert_eq!(
            bounds("-1e30", "1e30"),
            vec![
                ProductFilter::PriceAtLeast(Price::MIN),
                ProductFilter::PriceAtMost(Price::MAX),
            ]
        );
        assert_eq!(
            bounds("123456789012345678901234567890", "NaN"),
            vec![ProductFilter::PriceAtLeast(Price::MAX)]
        );
    }

    #[test]
    fn tiny_prices_keep_their_sign() {
        let p = CatalogParams {
            min_price: Some("1e-40".into()),
            max_price: Some("-1e-40".into()),
            ..params()
        };
        let filters = CatalogQuery::from_params(&p, now()).filters;
        assert_matches!(
            filters.as_slice(),
            [ProductFilter::PriceAtLeast(min), ProductFilter::PriceAtMost(max)]
                if *min > Price::ZERO && *max < Price::ZERO
        );
    }

    #[test]
    fn overflowing_date_range_is_skipped() {
        let p = CatalogParams {
            date_range: Some(i64::MAX.to_string()),
            ..params()
        };
        assert!(CatalogQuery::from_params(&p, now()).filters.is_empty());
    }

    #[test]
    fn active_filters_drop_blanks_and_page() {
        let p = CatalogParams {
            category: Some(" bouquet ".into()),
            min_price: Some("".into()),
            page: Some("3".into()),
            ..params()
        };
        assert_eq!(
            p.active_filters(),
            CatalogParams {
                category: Some("bouquet".into()),
                ..params()
            }
        );
        assert_eq!(p.with_page(2).page.as_deref(), Some("2"));
    }

    // -- listing -------------------------------------------------------------

    #[tokio::test]
    async fn pages_hold_at_most_ten_products() {
        let reader = catalog();
        let page = list_products(&reader, &params(), now()).await.unwrap();
        assert_eq!(page.products.len(), 10);
        assert_eq!(page.page.number, 1);
        assert_eq!(page.page.num_pages, 3);
        assert!(!page.page.has_previous());
        assert!(page.page.has_next());

        let last = list_products(&reader, &params().with_page(3), now())
            .await
            .unwrap();
        assert_eq!(last.products.len(), 5);
        assert!(last.page.has_previous());
        assert!(!last.page.has_next());
    }

    #[tokio::test]
    async fn default_sort_is_best_sellers_first() {
        let reader = catalog();
        let page = list_products(&reader, &params(), now()).await.unwrap();
        let sold: Vec<i32> = page.products.iter().map(|p| p.quantity_sold).collect();
        let mut sorted = sold.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(sold, sorted);
        assert_eq!(page.products[0].quantity_sold, 6);
    }

    #[tokio::test]
    async fn category_filter_returns_only_that_category() {
        let reader = catalog();
        let p = CatalogParams {
            category: Some("bouquet".into()),
            ..params()
        };
        let page = list_products(&reader, &p, now()).await.unwrap();
        assert_eq!(page.page.count, 8);
        assert!(page.products.iter().all(|p| p.category == "bouquet"));
    }

    #[tokio::test]
    async fn price_bounds_are_respected() {
        let reader = catalog();
        let p = CatalogParams {
            min_price: Some("5".into()),
            max_price: Some("9.50".into()),
            ..params()
        };
        let page = list_products(&reader, &p, now()).await.unwrap();
        assert_eq!(page.page.count, 5);
        assert!(page
            .products
            .iter()
            .all(|p| p.price >= Price::from(5) && p.price <= Price::from_str("9.50").unwrap()));
    }

    #[tokio::test]
    async fn huge_min_price_matches_nothing() {
        let reader = catalog();
        let p = CatalogParams {
            min_price: Some("1e30".into()),
            ..params()
        };
        let page = list_products(&reader, &p, now()).await.unwrap();
        assert_eq!(page.page.count, 0);
        assert!(page.products.is_empty());

        let p = CatalogParams {
            max_price: Some("-1e30".into()),
            ..params()
        };
        assert_eq!(list_products(&reader, &p, now()).await.unwrap().page.count, 0);
    }

    #[tokio::test]
    async fn malformed_min_price_matches_absent_min_price() {
        let reader = catalog();
        let with_junk = CatalogParams {
            min_price: Some("abc".into()),
            ..params()
        };
        let a = list_products(&reader, &with_junk, now()).await.unwrap();
        let b = list_products(&reader, &params(), now()).await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn date_range_keeps_recent_products() {
        let reader = catalog();
        let p = CatalogParams {
            date_range: Some("3".into()),
            ..params()
        };
        let page = list_products(&reader, &p, now()).await.unwrap();
        let mut ids: Vec<DbId> = page.products.iter().map(|p| p.id).collect();
        ids.sort();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn explicit_sort_is_applied() {
        let reader = catalog();
        let p = CatalogParams {
            sort_by: Some("-price".into()),
            ..params()
        };
        let page = list_products(&reader, &p, now()).await.unwrap();
        assert_eq!(page.products[0].id, 25);
        assert_eq!(page.sort.to_string(), "-price");
    }

    #[tokio::test]
    async fn unknown_sort_falls_back_to_default() {
        let reader = catalog();
        let p = CatalogParams {
            sort_by: Some("description".into()),
            ..params()
        };
        let page = list_products(&reader, &p, now()).await.unwrap();
        assert_eq!(page.sort, SortOrder::DEFAULT);
        let default = list_products(&reader, &params(), now()).await.unwrap();
        assert_eq!(page.products, default.products);
    }

    #[tokio::test]
    async fn page_past_the_end_shows_last_page() {
        let reader = catalog();
        let page = list_products(&reader, &params().with_page(40), now())
            .await
            .unwrap();
        assert_eq!(page.page.number, 3);
        assert_eq!(page.products.len(), 5);
    }

    #[tokio::test]
    async fn no_matches_yields_single_empty_page() {
        let reader = catalog();
        let p = CatalogParams {
            category: Some("succulent".into()),
            ..params()
        };
        let page = list_products(&reader, &p, now()).await.unwrap();
        assert!(page.products.is_empty());
        assert_eq!(page.page.num_pages, 1);
        assert!(!page.page.has_next());
    }

    // -- detail --------------------------------------------------------------

    #[tokio::test]
    async fn get_product_returns_the_row() {
        let reader = catalog();
        let p = get_product(&reader, 4).await.unwrap();
        assert_eq!(p.id, 4);
        assert_eq!(p.availability_status(), "Не доступен");
    }

    #[tokio::test]
    async fn get_missing_product_is_not_found() {
        let reader = catalog();
        let err = get_product(&reader, 999).await.unwrap_err();
        assert_matches!(
            err,
            CatalogError::Core(CoreError::NotFound {
                entity: "Product",
                id: 999
            })
        );
    }
}
