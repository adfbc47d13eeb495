use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use http::header;
use tracing::instrument;

use crate::catalog::facets;
use crate::dtos::catalog::{FiltersData, FiltersQuery, FiltersResponse};
use crate::state::AppState;

// GET /filters - available brands and price range for a category
#[instrument(skip(state))]
pub async fn get_filters(
    State(state): State<AppState>,
    Query(params): Query<FiltersQuery>,
) -> impl IntoResponse {
    let catalog = state.catalog.load().await;

    let body = FiltersResponse {
        success: true,
        data: FiltersData {
            brands: facets::available_brands(&catalog, params.category.as_deref()),
            price_range: facets::price_range(&catalog, params.category.as_deref()),
            category: params.category,
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
