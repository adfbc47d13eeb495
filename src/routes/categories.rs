use axum::{routing::get, Router};

use crate::handlers::category::get_categories;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/categories", get(get_categories))
}
