use std::time::Instant;

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use http::{header, HeaderName};
use tracing::instrument;

use crate::catalog::facets;
use crate::catalog::search::{self, SearchParams, SortKey};
use crate::dtos::product::{
    AvailableFilters, FiltersApplied, ListMeta, ProductDisplay, ProductListQuery,
    ProductListResponse, ProductSearchQuery, SearchData, SearchEnvelope, SearchFilters,
    SearchMeta,
};
use crate::state::AppState;

const X_RESPONSE_TIME: HeaderName = HeaderName::from_static("x-response-time");

// GET /products - filtered, paginated product listing
#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ProductListQuery>,
) -> impl IntoResponse {
    let started = Instant::now();
    let catalog = state.catalog.load().await;

    // "All" means no category filter
    let category = params.category.clone().filter(|c| c != "All");
    let sort = params.sort.clone().unwrap_or_else(|| "relevant".to_string());

    let search_params = SearchParams {
        category: category.clone(),
        subcategory: params.subcategory.clone(),
        search: params.search.clone(),
        brand: params.brand.clone(),
        min_price: params.min_price,
        max_price: params.max_price,
        sort: SortKey::parse(&sort),
        page: params.page.unwrap_or(1),
        limit: params.limit.unwrap_or(search::DEFAULT_PAGE_SIZE),
    };

    let outcome = search::search(&catalog, &search_params);
    let products: Vec<ProductDisplay> = outcome.products.into_iter().map(Into::into).collect();

    let response_time_ms = started.elapsed().as_millis();
    let body = ProductListResponse {
        products,
        total: outcome.total,
        page: search_params.page,
        limit: search_params.limit,
        has_more: outcome.has_more,
        meta: ListMeta {
            response_time_ms,
            filters_applied: FiltersApplied {
                category,
                search: params.search.unwrap_or_default(),
                brand: params.brand,
                price_range: [params.min_price, params.max_price],
                sort,
            },
        },
    };

    (
        [
            (
                header::CACHE_CONTROL,
                "public, max-age=10, stale-while-revalidate=30".to_string(),
            ),
            (X_RESPONSE_TIME, format!("{response_time_ms}ms")),
        ],
        Json(body),
    )
}

// GET /products/search - search with envelope and optional facet blocks
#[instrument(skip(state))]
pub async fn search_products(
    State(state): State<AppState>,
    Query(params): Query<ProductSearchQuery>,
) -> impl IntoResponse {
    let started = Instant::now();
    let catalog = state.catalog.load().await;

    let search_term = params.search.clone().or_else(|| params.q.clone());
    let sort = params.sort.clone().unwrap_or_else(|| "relevant".to_string());

    let search_params = SearchParams {
        category: params.category.clone(),
        subcategory: None,
        search: search_term.clone(),
        brand: params.brand.clone(),
        min_price: params.min_price,
        max_price: params.max_price,
        sort: SortKey::parse(&sort),
        page: params.page.unwrap_or(1),
        limit: params.limit.unwrap_or(search::DEFAULT_PAGE_SIZE),
    };

    let outcome = search::search(&catalog, &search_params);
    let products: Vec<ProductDisplay> = outcome.products.into_iter().map(Into::into).collect();

    let available_filters = if params.include_filters.as_deref() == Some("true") {
        Some(AvailableFilters {
            brands: facets::available_brands(&catalog, params.category.as_deref()),
            price_range: facets::price_range(&catalog, params.category.as_deref()),
        })
    } else {
        None
    };

    let price_range = (params.min_price.is_some() || params.max_price.is_some()).then(|| {
        [
            params.min_price.unwrap_or(0.0),
            params.max_price.unwrap_or(10000.0),
        ]
    });

    let response_time_ms = started.elapsed().as_millis();
    let body = SearchEnvelope {
        success: true,
        data: SearchData {
            products,
            total: outcome.total,
            page: search_params.page,
            per_page: search_params.limit,
            has_more: outcome.has_more,
            filters: SearchFilters {
                category: params.category,
                brand: params.brand,
                price_range,
                search: search_term,
                sort,
            },
            available_filters,
        },
        meta: SearchMeta {
            response_time_ms,
            cache_hit: false,
        },
    };

    (
        [
            (
                header::CACHE_CONTROL,
                "public, s-maxage=300, stale-while-revalidate=600".to_string(),
            ),
            (X_RESPONSE_TIME, format!("{response_time_ms}ms")),
        ],
        Json(body),
    )
}
