//! Query-string parsing for catalog endpoints.
//!
//! Listing parameters are read from the raw query string rather than through
//! a typed `Query` extractor, so repeated keys, unknown keys or malformed
//! encoding never reject the request. The last occurrence of a key wins.

use bloom_core::catalog::CatalogParams;

/// Build [`CatalogParams`] from a raw query string.
pub fn catalog_params(raw: Option<&str>) -> CatalogParams {
    let pairs: Vec<(String, String)> = match raw {
        Some(raw) => serde_urlencoded::from_str(raw).unwrap_or_else(|err| {
            tracing::debug!(error = %err, "Ignoring undecodable query string");
            Vec::new()
        }),
        None => Vec::new(),
    };

    let mut params = CatalogParams::default();
    for (key, value) in pairs {
        let slot = match key.as_str() {
            "category" => &mut params.category,
            "min_price" => &mut params.min_price,
            "max_price" => &mut params.max_price,
            "date_range" => &mut params.date_range,
            "sort_by" => &mut params.sort_by,
            "page" => &mut params.page,
            _ => continue,
        };
        *slot = Some(value);
    }
    params
}

/// Encode parameters back into a query string (without the leading `?`).
pub fn encode_params(params: &CatalogParams) -> String {
    serde_urlencoded::to_string(params).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "Failed to encode catalog parameters");
        String::new()
    })
}
