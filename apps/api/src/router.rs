use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use monitoring_cell::create_monitoring_router;
use shared_config::AppConfig;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(|| async { "Membership Platform API is running!" }))
        .nest("/api/monitoring", create_monitoring_router(state.clone()))
}
