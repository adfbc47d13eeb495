use axum::{routing::get, Router};

use crate::handlers::redirect::go_to_affiliate;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/go/{id}", get(go_to_affiliate))
}
