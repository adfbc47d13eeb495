use std::time::Instant;

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use http::header;
use tracing::instrument;

use crate::catalog::facets;
use crate::dtos::catalog::{CategoriesMeta, CategoriesQuery, CategoriesResponse};
use crate::models::product::RawProduct;
use crate::state::AppState;

// GET /categories - category tree plus optional brand/price facet blocks
#[instrument(skip(state))]
pub async fn get_categories(
    State(state): State<AppState>,
    Query(params): Query<CategoriesQuery>,
) -> impl IntoResponse {
    let started = Instant::now();
    let catalog = state.catalog.load().await;

    let include_subcategories = params.include_subcategories.as_deref() != Some("false");
    let include_brands = params.include_brands.as_deref() == Some("true");
    let include_price_ranges = params.include_price_ranges.as_deref() == Some("true");
    let category = params.category.clone().filter(|c| c != "All");

    // brands and the meta count are scoped to the category; the tree is not
    let filter = category.as_deref().map(str::to_lowercase);
    let in_scope = |p: &&RawProduct| match &filter {
        Some(needle) => p.category.to_lowercase().contains(needle),
        None => true,
    };
    let filtered_products = catalog.iter().filter(in_scope).count();

    let categories = include_subcategories.then(|| facets::build_category_tree(&catalog));
    let brands = include_brands.then(|| facets::extract_brands(catalog.iter().filter(in_scope)));
    let price_ranges =
        include_price_ranges.then(|| facets::price_ranges(&catalog, category.as_deref()));

    let body = CategoriesResponse {
        categories,
        brands,
        price_ranges,
        meta: CategoriesMeta {
            response_time_ms: started.elapsed().as_millis(),
            total_products: catalog.len(),
            filtered_products,
        },
    };

    (
        [(
            header::CACHE_CONTROL,
            "public, s-maxage=600, stale-while-revalidate=1200",
        )],
        Json(body),
    )
}
