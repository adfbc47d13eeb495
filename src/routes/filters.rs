use axum::{routing::get, Router};

use crate::handlers::filters::get_filters;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/filters", get(get_filters))
}
