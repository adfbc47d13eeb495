pub mod categories;
pub mod filters;
pub mod products;
pub mod redirect;

use axum::Router;

use crate::state::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(products::routes())
        .merge(categories::routes())
        .merge(filters::routes())
        .merge(redirect::routes())
}
