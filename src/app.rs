use crate::handlers;
use crate::state::AppState;
use axum::{Router, routing::get};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route(
            "/api/daily-data",
            get(handlers::list_daily_data).post(handlers::upsert_daily_data),
        )
        .route("/api/metrics/:metric", get(handlers::get_metric))
        .route("/api/summary", get(handlers::get_summary))
        .route("/api/charts/weight", get(handlers::get_weight_chart))
        .with_state(state)
}
