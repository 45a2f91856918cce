use axum::{routing::get, Router};
use tower_http::services::ServeDir;

use crate::handlers::{export_batch, genotype_page, index};
use crate::state::AppState;

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/genotypes", get(genotype_page))
        .route("/export", get(export_batch))
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
}
