// =====================================================================================
// MONITORING CELL MODELS
// =====================================================================================

use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// Engine-wide clock read. All timestamps are epoch milliseconds.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertType {
    Performance,
    Error,
    Security,
    Capacity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Critical,
    Warning,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSample {
    pub timestamp: i64,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    #[serde(default = "unknown_bucket")]
    pub browser: String,
    #[serde(default = "unknown_bucket")]
    pub os: String,
    #[serde(default = "unknown_bucket")]
    pub device_type: String,
}

pub fn unknown_bucket() -> String {
    "Unknown".to_string()
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionError {
    pub message: String,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub session_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub started_at: i64,
    pub last_seen_at: i64,
    pub page_views: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<DeviceInfo>,
    pub errors: Vec<SessionError>,
}

impl Session {
    // Invariant: last_seen_at >= started_at, maintained by the tracker.
    pub fn duration_ms(&self) -> i64 {
        self.last_seen_at - self.started_at
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    pub title: String,
    pub description: String,
    pub timestamp: i64,
    pub resolved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<i64>,
    pub actions: Vec<String>,
}

/// Inbound alert payload. Everything is optional so that missing required
/// fields can be reported back as an enumerated list instead of a
/// deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertDraft {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub alert_type: Option<AlertType>,
    pub severity: Option<AlertSeverity>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub timestamp: Option<i64>,
    pub resolved: Option<bool>,
    pub actions: Option<Vec<String>>,
}

impl AlertDraft {
    pub fn missing_fields(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if self.alert_type.is_none() {
            missing.push("type".to_string());
        }
        if self.severity.is_none() {
            missing.push("severity".to_string());
        }
        if self.title.as_deref().map_or(true, str::is_empty) {
            missing.push("title".to_string());
        }
        if self.description.as_deref().map_or(true, str::is_empty) {
            missing.push("description".to_string());
        }
        missing
    }
}

#[derive(Debug, Clone, Default)]
pub struct AlertFilter {
    pub resolved: Option<bool>,
    pub severity: Option<AlertSeverity>,
    pub alert_type: Option<AlertType>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeverityCounts {
    pub critical: usize,
    pub warning: usize,
    pub info: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeCounts {
    pub performance: usize,
    pub error: usize,
    pub security: usize,
    pub capacity: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertStats {
    pub total: usize,
    pub by_severity: SeverityCounts,
    pub by_type: TypeCounts,
    pub resolved: usize,
    pub unresolved: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionAggregates {
    pub count: usize,
    pub average_duration_ms: f64,
    pub total_page_views: u64,
    pub total_errors: u64,
    pub error_rate: f64,
    pub device_breakdown: HashMap<String, u64>,
    pub browser_breakdown: HashMap<String, u64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricStoreStats {
    pub tracked_metrics: usize,
    pub total_samples: usize,
    pub error_count: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStats {
    pub uptime_ms: i64,
    pub total_errors: u64,
    pub total_sessions: usize,
    pub total_alerts: usize,
    pub tracked_metrics: usize,
    pub metrics: HashMap<String, f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: HealthStatus,
    pub score: i32,
    pub issues: Vec<String>,
}

// =====================================================================================
// DASHBOARD SNAPSHOT
// =====================================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub overview: DashboardOverview,
    pub performance: DashboardPerformance,
    pub sessions: DashboardSessions,
    pub alerts: DashboardAlerts,
    pub real_time_metrics: RealTimeMetrics,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    pub system_health: HealthReport,
    pub total_sessions: usize,
    pub total_errors: u64,
    pub total_alerts: usize,
    pub uptime: i64,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPerformance {
    pub response_time: Option<f64>,
    pub memory_usage: Option<f64>,
    pub cache_hit_rate: Option<f64>,
    pub error_rate: f64,
    pub trends: HashMap<String, Trend>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSessions {
    pub active: usize,
    pub average_duration: f64,
    pub total_page_views: u64,
    pub device_breakdown: HashMap<String, u64>,
    pub browser_breakdown: HashMap<String, u64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardAlerts {
    pub total: usize,
    pub critical: usize,
    pub warning: usize,
    pub recent: Vec<Alert>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RealTimeMetrics {
    pub metrics: HashMap<String, Vec<MetricSample>>,
    pub last_update: i64,
}

// =====================================================================================
// REQUEST / RESPONSE MODELS
// =====================================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertListQuery {
    pub resolved: Option<String>,
    pub severity: Option<AlertSeverity>,
    #[serde(rename = "type")]
    pub alert_type: Option<AlertType>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedFilters {
    pub resolved: Option<bool>,
    pub severity: Option<AlertSeverity>,
    #[serde(rename = "type")]
    pub alert_type: Option<AlertType>,
    pub limit: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertListResponse {
    pub success: bool,
    pub alerts: Vec<Alert>,
    pub stats: AlertStats,
    pub filters: AppliedFilters,
    pub timestamp: i64,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum AlertActionRequest {
    Resolve {
        alert_id: Option<String>,
        resolved_by: Option<String>,
    },
    Create {
        alert: Option<AlertDraft>,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertResolvedResponse {
    pub success: bool,
    pub action: String,
    pub alert_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_by: Option<String>,
    pub timestamp: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertCreatedResponse {
    pub success: bool,
    pub action: String,
    pub alert: Alert,
    pub timestamp: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMetricRequest {
    pub metric_id: Option<String>,
    pub value: Option<f64>,
    pub timestamp: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsWindowQuery {
    pub window_ms: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentMetricsResponse {
    pub success: bool,
    pub window_ms: i64,
    pub metrics: HashMap<String, Vec<MetricSample>>,
    pub timestamp: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackSessionRequest {
    pub session_id: Option<String>,
    pub user_id: Option<String>,
    #[serde(default)]
    pub page_view: bool,
    pub device: Option<DeviceInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionErrorRequest {
    pub session_id: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionListResponse {
    pub success: bool,
    pub sessions: Vec<Session>,
    pub aggregates: SessionAggregates,
    pub timestamp: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AckResponse {
    pub success: bool,
    pub timestamp: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatsResponse {
    pub success: bool,
    pub stats: SystemStats,
    pub timestamp: i64,
}

// =====================================================================================
// ERRORS
// =====================================================================================

#[derive(Debug, thiserror::Error)]
pub enum MonitoringError {
    #[error("Missing required fields: {}", .0.join(", "))]
    Validation(Vec<String>),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Internal monitoring error: {0}")]
    Internal(String),
}
