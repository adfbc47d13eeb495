use axum::{
    extract::{Path, State},
    response::Redirect,
};
use tracing::instrument;

use crate::error::AppError;
use crate::state::AppState;

// GET /go/{id} - 307 redirect to the product's affiliate link
#[instrument(skip(state))]
pub async fn go_to_affiliate(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let id: i64 = id
        .parse()
        .map_err(|_| AppError::validation("Invalid product ID. Must be a number."))?;

    let catalog = state.catalog.load().await;
    let product = catalog
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| AppError::not_found("Product not found"))?;

    if product.affiliate_link.is_empty() {
        return Err(AppError::not_found(
            "Affiliate link not available for this product",
        ));
    }

    // 307 keeps the method
    Ok(Redirect::temporary(&product.affiliate_link))
}
