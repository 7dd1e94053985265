// =====================================================================================
// MONITORING CELL ROUTER
// =====================================================================================

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::handlers::{
    get_dashboard, get_recent_metrics, get_sessions, get_system_stats, list_alerts,
    mutate_alert, record_metric, record_session_error, remove_alert, track_session,
    MonitoringHandlers,
};
use shared_config::AppConfig;

pub fn create_monitoring_router(config: Arc<AppConfig>) -> Router {
    let handlers = Arc::new(MonitoringHandlers::new(config));

    Router::new()
        .route(
            "/alerts",
            get(list_alerts).post(mutate_alert).delete(remove_alert),
        )
        .route("/dashboard", get(get_dashboard))
        .route("/stats", get(get_system_stats))
        .route("/metrics", get(get_recent_metrics).post(record_metric))
        .route("/sessions", get(get_sessions).post(track_session))
        .route("/sessions/errors", post(record_session_error))
        .layer(CorsLayer::permissive())
        .with_state(handlers)
}
