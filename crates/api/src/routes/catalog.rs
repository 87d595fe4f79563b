//! Route definitions for catalog browsing.

use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Catalog routes mounted at the root.
///
/// ```text
/// GET /                     -> product_list (HTML)
/// GET /product/{id}/        -> product_detail (HTML)
/// GET /ajax-product-list/   -> ajax_product_list (JSON)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::product_list))
        .route("/product/{id}/", get(catalog::product_detail))
        .route("/ajax-product-list/", get(catalog::ajax_product_list))
}
