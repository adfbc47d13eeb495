//! End-to-end tests driving the API router over a temp-file catalog.

use std::io::Write;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::NamedTempFile;
use tower::ServiceExt;

use vitrina_backend::catalog::store::CatalogStore;
use vitrina_backend::routes;
use vitrina_backend::state::AppState;

fn sample_products() -> Value {
    json!([
        {
            "id": 1,
            "title": "Laptop ASUS VivoBook 15",
            "price": 2499.0,
            "imageURL": "https://img/1.jpg",
            "category": "Electronics",
            "affiliateLink": "https://partner.example/track/1"
        },
        {
            "id": 2,
            "title": "Laptop Lenovo IdeaPad 3",
            "price": "1899 RON",
            "imageURL": "https://img/2.jpg",
            "category": "Electronics",
            "affiliateLink": "https://partner.example/track/2"
        },
        {
            "id": 3,
            "title": "Smartphone Samsung Galaxy A54",
            "price": 1599,
            "imageURL": "https://img/3.jpg",
            "category": "Electronics",
            "affiliateLink": "https://partner.example/track/3",
            "description": "Telefon cu ecran AMOLED"
        },
        {
            "id": 4,
            "title": "Rochie de vara",
            "price": 149.0,
            "imageURL": "https://img/4.jpg",
            "category": "Fashion",
            "affiliateLink": ""
        },
        {
            "id": 5,
            "title": "Canapea extensibila gri",
            "price": 3299.0,
            "imageURL": "https://img/5.jpg",
            "category": "Home",
            "affiliateLink": "https://partner.example/track/5"
        }
    ])
}

/// Router over a catalog file; the temp file must outlive the requests.
fn test_app(products: &Value) -> (Router, NamedTempFile) {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{products}").unwrap();
    file.flush().unwrap();

    let catalog = CatalogStore::new(file.path(), Duration::from_secs(300));
    let app = Router::new()
        .nest("/api", routes::create_router())
        .with_state(AppState::new(catalog));
    (app, file)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_products_listing_and_pagination() {
    let (app, _file) = test_app(&sample_products());

    let (status, body) = get(app.clone(), "/api/products?limit=2&page=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 5);
    assert_eq!(body["products"].as_array().unwrap().len(), 2);
    assert_eq!(body["hasMore"], true);
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 2);

    let (_, body) = get(app, "/api/products?limit=2&page=3").await;
    assert_eq!(body["products"].as_array().unwrap().len(), 1);
    assert_eq!(body["hasMore"], false);
}

#[tokio::test]
async fn test_products_category_filter() {
    let (app, _file) = test_app(&sample_products());

    let (_, body) = get(app.clone(), "/api/products?category=Electronics").await;
    assert_eq!(body["total"], 3);
    assert_eq!(body["meta"]["filters_applied"]["category"], "Electronics");

    // "All" is the same as no filter, and is not echoed back
    let (_, body) = get(app, "/api/products?category=All").await;
    assert_eq!(body["total"], 5);
    assert!(body["meta"]["filters_applied"].get("category").is_none());
}

#[tokio::test]
async fn test_products_search_and_price_bounds() {
    let (app, _file) = test_app(&sample_products());

    // matches title of #3 and description of nothing else
    let (_, body) = get(app.clone(), "/api/products?search=galaxy").await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["products"][0]["id"], 3);

    // string price "1899 RON" participates in bounds
    let (_, body) = get(app, "/api/products?minPrice=1599&maxPrice=2000").await;
    assert_eq!(body["total"], 2);
}

#[tokio::test]
async fn test_products_sort_price_asc() {
    let (app, _file) = test_app(&sample_products());

    let (_, body) = get(app, "/api/products?sort=price-asc").await;
    let prices: Vec<f64> = body["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["price"].as_f64().unwrap())
        .collect();
    let mut sorted = prices.clone();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(prices, sorted);
    assert_eq!(prices[0], 149.0);
}

#[tokio::test]
async fn test_products_display_shape() {
    let (app, _file) = test_app(&sample_products());

    let (_, body) = get(app, "/api/products?search=Canapea").await;
    let product = &body["products"][0];
    assert_eq!(product["id"], 5);
    assert_eq!(product["brand"], "Canapea"); // first-word fallback
    assert_eq!(product["slug"], "canapea-canapea-extensibila-gri");
    assert_eq!(product["categoryName"], "Casa & Grădina");
    assert_eq!(product["inStock"], true);
    assert_eq!(product["discountPercent"], 0);
    assert_eq!(product["cashbackPercent"], 5);
}

#[tokio::test]
async fn test_search_envelope_with_filters() {
    let (app, _file) = test_app(&sample_products());

    let (status, body) = get(app, "/api/products/search?q=laptop&includeFilters=true").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["total"], 2);
    assert_eq!(body["data"]["has_more"], false);
    assert_eq!(body["meta"]["cache_hit"], false);

    let available = &body["data"]["available_filters"];
    assert!(available["brands"].is_array());
    assert!(available["price_range"]["min"].is_number());
}

#[tokio::test]
async fn test_search_envelope_brand_filter() {
    let (app, _file) = test_app(&sample_products());

    let (_, body) = get(app, "/api/products/search?brand=samsung").await;
    let products = body["data"]["products"].as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["brand"], "Samsung");
    // total counts the pre-brand filtered set
    assert_eq!(body["data"]["total"], 5);
}

#[tokio::test]
async fn test_categories_tree() {
    let (app, _file) = test_app(&sample_products());

    let (status, body) = get(app.clone(), "/api/categories").await;
    assert_eq!(status, StatusCode::OK);
    let categories = body["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 3);
    assert_eq!(categories[0]["name"], "Electronics");
    assert_eq!(categories[0]["count"], 3);
    let subcategories = categories[0]["subcategories"].as_array().unwrap();
    assert_eq!(subcategories[0]["name"], "Laptops");
    assert_eq!(subcategories[0]["count"], 2);
    assert_eq!(body["meta"]["total_products"], 5);

    // tree can be switched off
    let (_, body) = get(app, "/api/categories?includeSubcategories=false").await;
    assert!(body.get("categories").is_none());
}

#[tokio::test]
async fn test_categories_with_brands_scoped() {
    let (app, _file) = test_app(&sample_products());

    let (_, body) = get(app, "/api/categories?includeBrands=true&category=Electronics").await;
    assert!(body["brands"].is_array());
    assert_eq!(body["meta"]["filtered_products"], 3);
}

#[tokio::test]
async fn test_filters_endpoint() {
    let (app, _file) = test_app(&sample_products());

    let (status, body) = get(app, "/api/filters?category=electronice-it").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["category"], "electronice-it");
    assert!(body["data"]["brands"].is_array());
    assert!(body["data"]["price_range"]["max"].is_number());
}

#[tokio::test]
async fn test_redirect_to_affiliate_link() {
    let (app, _file) = test_app(&sample_products());

    let response = app
        .oneshot(Request::builder().uri("/api/go/1").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers()[header::LOCATION],
        "https://partner.example/track/1"
    );
}

#[tokio::test]
async fn test_redirect_error_cases() {
    let (app, _file) = test_app(&sample_products());

    let (status, body) = get(app.clone(), "/api/go/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid product ID. Must be a number.");

    let (status, body) = get(app.clone(), "/api/go/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Product not found");

    // product 4 exists but has an empty affiliate link
    let (status, body) = get(app, "/api/go/4").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Affiliate link not available for this product");
}

#[tokio::test]
async fn test_missing_catalog_degrades_to_empty() {
    let catalog = CatalogStore::new("/nonexistent/products.json", Duration::from_secs(300));
    let app = Router::new()
        .nest("/api", routes::create_router())
        .with_state(AppState::new(catalog));

    let (status, body) = get(app, "/api/products").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0);
    assert_eq!(body["products"].as_array().unwrap().len(), 0);
    assert_eq!(body["hasMore"], false);
}

#[tokio::test]
async fn test_response_headers() {
    let (app, _file) = test_app(&sample_products());

    let response = app
        .oneshot(Request::builder().uri("/api/products").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(
        response.headers()[header::CACHE_CONTROL],
        "public, max-age=10, stale-while-revalidate=30"
    );
    assert!(response.headers().contains_key("x-response-time"));
}
