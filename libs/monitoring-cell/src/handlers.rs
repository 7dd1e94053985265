// =====================================================================================
// MONITORING CELL HANDLERS
// =====================================================================================

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::instrument;

use crate::models::{
    now_ms, AckResponse, AlertActionRequest, AlertCreatedResponse, AlertFilter,
    AlertListQuery, AlertListResponse, AlertResolvedResponse, AppliedFilters,
    MetricsWindowQuery, MonitoringError, RecentMetricsResponse, RecordMetricRequest,
    SessionErrorRequest, SessionListResponse, SystemStatsResponse, TrackSessionRequest,
};
use crate::services::alerts::DEFAULT_ALERT_LIMIT;
use crate::services::MonitoringService;
use shared_config::AppConfig;

pub const SYSTEM_CLEANUP_ACTOR: &str = "system_cleanup";

pub struct MonitoringHandlers {
    monitoring: Arc<MonitoringService>,
}

impl MonitoringHandlers {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self {
            monitoring: Arc::new(MonitoringService::new(&config)),
        }
    }

    pub fn monitoring(&self) -> Arc<MonitoringService> {
        self.monitoring.clone()
    }
}

// =====================================================================================
// ALERT ENDPOINTS
// =====================================================================================

#[instrument(skip(handlers))]
pub async fn list_alerts(
    State(handlers): State<Arc<MonitoringHandlers>>,
    Query(query): Query<AlertListQuery>,
) -> Result<Json<AlertListResponse>, MonitoringError> {
    let resolved = match query.resolved.as_deref() {
        Some("false") => Some(false),
        Some("true") => Some(true),
        _ => None,
    };

    let filter = AlertFilter {
        resolved,
        severity: query.severity,
        alert_type: query.alert_type,
        limit: query.limit,
    };

    let alerts = handlers.monitoring.query_alerts(&filter).await;
    let stats = handlers.monitoring.alert_stats().await;

    Ok(Json(AlertListResponse {
        success: true,
        alerts,
        stats,
        filters: AppliedFilters {
            resolved,
            severity: query.severity,
            alert_type: query.alert_type,
            limit: filter.limit.unwrap_or(DEFAULT_ALERT_LIMIT),
        },
        timestamp: now_ms(),
    }))
}

#[instrument(skip(handlers, request))]
pub async fn mutate_alert(
    State(handlers): State<Arc<MonitoringHandlers>>,
    Json(request): Json<AlertActionRequest>,
) -> Result<axum::response::Response, MonitoringError> {
    match request {
        AlertActionRequest::Resolve {
            alert_id,
            resolved_by,
        } => {
            let alert_id = alert_id
                .filter(|id| !id.is_empty())
                .ok_or_else(|| MonitoringError::Validation(vec!["alertId".to_string()]))?;

            let alert = handlers
                .monitoring
                .resolve_alert(&alert_id, resolved_by.as_deref())
                .await?;

            Ok(Json(AlertResolvedResponse {
                success: true,
                action: "alert_resolved".to_string(),
                alert_id: alert.id,
                resolved_by: alert.resolved_by,
                timestamp: now_ms(),
            })
            .into_response())
        }
        AlertActionRequest::Create { alert } => {
            let draft = alert.unwrap_or_default();
            let stored = handlers.monitoring.add_alert(draft).await?;

            Ok(Json(AlertCreatedResponse {
                success: true,
                action: "alert_created".to_string(),
                alert: stored,
                timestamp: now_ms(),
            })
            .into_response())
        }
    }
}

/// Soft removal: the alert is resolved under a system actor rather than
/// deleted, so it stays visible in resolved history.
#[instrument(skip(handlers))]
pub async fn remove_alert(
    State(handlers): State<Arc<MonitoringHandlers>>,
    Query(params): Query<std::collections::HashMap<String, String>>,
) -> Result<Json<AlertResolvedResponse>, MonitoringError> {
    let alert_id = params
        .get("alertId")
        .filter(|id| !id.is_empty())
        .ok_or_else(|| MonitoringError::Validation(vec!["alertId".to_string()]))?;

    let alert = handlers
        .monitoring
        .resolve_alert(alert_id, Some(SYSTEM_CLEANUP_ACTOR))
        .await?;

    Ok(Json(AlertResolvedResponse {
        success: true,
        action: "alert_removed".to_string(),
        alert_id: alert.id,
        resolved_by: alert.resolved_by,
        timestamp: now_ms(),
    }))
}

// =====================================================================================
// DASHBOARD & STATS ENDPOINTS
// =====================================================================================

#[instrument(skip(handlers))]
pub async fn get_dashboard(
    State(handlers): State<Arc<MonitoringHandlers>>,
) -> Result<Json<crate::models::DashboardSnapshot>, MonitoringError> {
    Ok(Json(handlers.monitoring.dashboard_snapshot().await))
}

#[instrument(skip(handlers))]
pub async fn get_system_stats(
    State(handlers): State<Arc<MonitoringHandlers>>,
) -> Result<Json<SystemStatsResponse>, MonitoringError> {
    let stats = handlers.monitoring.get_system_stats().await;
    Ok(Json(SystemStatsResponse {
        success: true,
        stats,
        timestamp: now_ms(),
    }))
}

// =====================================================================================
// METRIC ENDPOINTS
// =====================================================================================

#[instrument(skip(handlers, request))]
pub async fn record_metric(
    State(handlers): State<Arc<MonitoringHandlers>>,
    Json(request): Json<RecordMetricRequest>,
) -> Result<(StatusCode, Json<AckResponse>), MonitoringError> {
    let mut missing = Vec::new();
    if request.metric_id.as_deref().map_or(true, str::is_empty) {
        missing.push("metricId".to_string());
    }
    if request.value.is_none() {
        missing.push("value".to_string());
    }
    if !missing.is_empty() {
        return Err(MonitoringError::Validation(missing));
    }

    let metric_id = request.metric_id.unwrap_or_default();
    let value = request.value.unwrap_or_default();
    handlers
        .monitoring
        .record_metric(&metric_id, value, request.timestamp)
        .await;

    Ok((
        StatusCode::CREATED,
        Json(AckResponse {
            success: true,
            timestamp: now_ms(),
        }),
    ))
}

#[instrument(skip(handlers))]
pub async fn get_recent_metrics(
    State(handlers): State<Arc<MonitoringHandlers>>,
    Query(query): Query<MetricsWindowQuery>,
) -> Result<Json<RecentMetricsResponse>, MonitoringError> {
    let (window_ms, metrics) = handlers.monitoring.get_recent_metrics(query.window_ms).await;
    Ok(Json(RecentMetricsResponse {
        success: true,
        window_ms,
        metrics,
        timestamp: now_ms(),
    }))
}

// =====================================================================================
// SESSION ENDPOINTS
// =====================================================================================

#[instrument(skip(handlers, request))]
pub async fn track_session(
    State(handlers): State<Arc<MonitoringHandlers>>,
    Json(request): Json<TrackSessionRequest>,
) -> Result<Json<AckResponse>, MonitoringError> {
    let session_id = request
        .session_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| MonitoringError::Validation(vec!["sessionId".to_string()]))?;

    handlers
        .monitoring
        .touch_session(&session_id, request.user_id, request.page_view, request.device)
        .await;

    Ok(Json(AckResponse {
        success: true,
        timestamp: now_ms(),
    }))
}

#[instrument(skip(handlers, request))]
pub async fn record_session_error(
    State(handlers): State<Arc<MonitoringHandlers>>,
    Json(request): Json<SessionErrorRequest>,
) -> Result<Json<AckResponse>, MonitoringError> {
    let mut missing = Vec::new();
    if request.session_id.as_deref().map_or(true, str::is_empty) {
        missing.push("sessionId".to_string());
    }
    if request.message.as_deref().map_or(true, str::is_empty) {
        missing.push("message".to_string());
    }
    if !missing.is_empty() {
        return Err(MonitoringError::Validation(missing));
    }

    let session_id = request.session_id.unwrap_or_default();
    let message = request.message.unwrap_or_default();
    handlers
        .monitoring
        .record_session_error(&session_id, &message)
        .await;

    Ok(Json(AckResponse {
        success: true,
        timestamp: now_ms(),
    }))
}

#[instrument(skip(handlers))]
pub async fn get_sessions(
    State(handlers): State<Arc<MonitoringHandlers>>,
) -> Result<Json<SessionListResponse>, MonitoringError> {
    let sessions = handlers.monitoring.get_active_sessions().await;
    let aggregates = handlers.monitoring.get_session_aggregates().await;
    Ok(Json(SessionListResponse {
        success: true,
        sessions,
        aggregates,
        timestamp: now_ms(),
    }))
}

// =====================================================================================
// ERROR RESPONSE IMPLEMENTATION
// =====================================================================================

impl IntoResponse for MonitoringError {
    fn into_response(self) -> axum::response::Response {
        match self {
            MonitoringError::Validation(missing) => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({
                    "success": false,
                    "error": "Missing required fields",
                    "missingFields": missing,
                    "timestamp": now_ms(),
                })),
            )
                .into_response(),
            MonitoringError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({
                    "success": false,
                    "error": message,
                    "timestamp": now_ms(),
                })),
            )
                .into_response(),
            MonitoringError::Internal(detail) => {
                tracing::error!("internal monitoring error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({
                        "success": false,
                        "error": "Internal server error",
                        "timestamp": now_ms(),
                    })),
                )
                    .into_response()
            }
        }
    }
}
