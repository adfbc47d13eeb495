use serde::{Deserialize, Serialize};

use crate::catalog::facets::{BrandCount, PriceRange};
use crate::models::product::Product;

/// Query parameters of `GET /api/products`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListQuery {
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub search: Option<String>,
    pub brand: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

/// Query parameters of `GET /api/products/search`; `q` is accepted as an
/// alias of `search`, and `includeFilters=true` embeds the facet blocks.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSearchQuery {
    pub search: Option<String>,
    pub q: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub include_filters: Option<String>,
}

/// Frontend-facing product shape.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDisplay {
    pub id: i64,
    pub title: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// RON.
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_price: Option<f64>,
    pub discount_percent: i32,
    pub image_url: String,
    pub category_name: String,
    pub category_slug: String,
    pub in_stock: bool,
    pub affiliate_link: String,
    pub cashback_percent: i32,
}

impl From<Product> for ProductDisplay {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            title: product.title,
            slug: product.slug,
            brand: product.brand,
            price: product.price_cents as f64 / 100.0,
            old_price: product.old_price_cents.map(|cents| cents as f64 / 100.0),
            discount_percent: product.discount_percent,
            image_url: product.image_url,
            category_name: product.category.name.to_string(),
            category_slug: product.category.slug.to_string(),
            in_stock: product.in_stock,
            affiliate_link: product.affiliate_link,
            cashback_percent: product.commission_percent,
        }
    }
}

/// `GET /api/products` response.
#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<ProductDisplay>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    #[serde(rename = "hasMore")]
    pub has_more: bool,
    pub meta: ListMeta,
}

#[derive(Debug, Serialize)]
pub struct ListMeta {
    pub response_time_ms: u128,
    pub filters_applied: FiltersApplied,
}

#[derive(Debug, Serialize)]
pub struct FiltersApplied {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub search: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    pub price_range: [Option<f64>; 2],
    pub sort: String,
}

/// `GET /api/products/search` response envelope.
#[derive(Debug, Serialize)]
pub struct SearchEnvelope {
    pub success: bool,
    pub data: SearchData,
    pub meta: SearchMeta,
}

#[derive(Debug, Serialize)]
pub struct SearchData {
    pub products: Vec<ProductDisplay>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub has_more: bool,
    pub filters: SearchFilters,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_filters: Option<AvailableFilters>,
}

#[derive(Debug, Serialize)]
pub struct SearchFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_range: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    pub sort: String,
}

#[derive(Debug, Serialize)]
pub struct AvailableFilters {
    pub brands: Vec<BrandCount>,
    pub price_range: PriceRange,
}

#[derive(Debug, Serialize)]
pub struct SearchMeta {
    pub response_time_ms: u128,
    pub cache_hit: bool,
}
