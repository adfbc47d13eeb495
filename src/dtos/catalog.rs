use serde::{Deserialize, Serialize};

use crate::catalog::facets::{BrandCount, CategoryTree, PriceBounds, PriceRange};

/// Query parameters of `GET /api/categories`. The include flags mirror the
/// storefront's string booleans: `includeSubcategories` defaults to on,
/// everything else to off.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoriesQuery {
    pub include_subcategories: Option<String>,
    pub include_brands: Option<String>,
    pub include_price_ranges: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<CategoryTree>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brands: Option<Vec<BrandCount>>,
    #[serde(rename = "priceRanges", skip_serializing_if = "Option::is_none")]
    pub price_ranges: Option<PriceBounds>,
    pub meta: CategoriesMeta,
}

#[derive(Debug, Serialize)]
pub struct CategoriesMeta {
    pub response_time_ms: u128,
    pub total_products: usize,
    pub filtered_products: usize,
}

/// Query parameters of `GET /api/filters`.
#[derive(Debug, Deserialize)]
pub struct FiltersQuery {
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FiltersResponse {
    pub success: bool,
    pub data: FiltersData,
}

#[derive(Debug, Serialize)]
pub struct FiltersData {
    pub brands: Vec<BrandCount>,
    pub price_range: PriceRange,
    pub category: Option<String>,
}
