//! Handlers for catalog browsing.
//!
//! The HTML listing and the JSON listing share one query translation
//! (`bloom_core::catalog::list_products`) and differ only in presentation.

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, RawQuery, State};
use axum::response::Html;
use axum::Json;
use bloom_core::catalog::{get_product, list_products, CatalogParams, ProductPage};
use bloom_core::types::DbId;
use chrono::Utc;

use crate::error::{AppError, AppResult, PageError};
use crate::query::catalog_params;
use crate::render;
use crate::response::ProductListResponse;
use crate::state::AppState;

async fn load_page(
    state: &AppState,
    params: &CatalogParams,
) -> AppResult<ProductPage> {
    let page = list_products(&state.products(), params, Utc::now()).await?;
    tracing::debug!(
        page = page.page.number,
        num_pages = page.page.num_pages,
        count = page.page.count,
        sort = %page.sort,
        "Catalog page loaded",
    );
    Ok(page)
}

/// GET /
///
/// Server-rendered product listing with filters, sorting and pagination.
pub async fn product_list(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Html<String>, PageError> {
    let params = catalog_params(query.as_deref());
    let page = load_page(&state, &params).await?;
    Ok(Html(render::product_list_page(&page, &params)))
}

/// GET /ajax-product-list/
///
/// Same listing as `/`, serialized as JSON for client-side rendering.
pub async fn ajax_product_list(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> AppResult<Json<ProductListResponse>> {
    let params = catalog_params(query.as_deref());
    let page = load_page(&state, &params).await?;
    Ok(Json(ProductListResponse::from(&page)))
}

/// GET /product/{id}/
///
/// Product detail page. Unknown or non-numeric ids render a 404 page.
pub async fn product_detail(
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
) -> Result<Html<String>, PageError> {
    let Path(id) = id.map_err(|rejection| {
        AppError::NotFound(format!("No product at this address ({rejection})"))
    })?;

    let product = get_product(&state.products(), id).await?;
    Ok(Html(render::product_detail_page(&product)))
}
