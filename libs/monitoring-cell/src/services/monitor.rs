// =====================================================================================
// MONITORING SERVICE (FACADE)
// =====================================================================================

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument};

use crate::models::{
    now_ms, Alert, AlertDraft, AlertFilter, DashboardAlerts, DashboardOverview,
    DashboardPerformance, DashboardSessions, DashboardSnapshot, DeviceInfo, MetricSample,
    MonitoringError, RealTimeMetrics, Session, SessionAggregates, SystemStats, Trend,
};
use crate::services::{
    analyze_trend, score_health, AlertManagerService, MetricStoreService, SessionTrackerService,
};
use shared_config::AppConfig;

pub const DEFAULT_METRICS_WINDOW_MS: i64 = 5 * 60 * 1000;
const RECENT_ALERT_COUNT: usize = 5;

/// Single entry point for the route layer. Owns the process-wide monitoring
/// state and its NotStarted -> Running lifecycle; every operation starts the
/// engine if needed, so a cold process never fails a read.
///
/// All state is in-memory and tied to one long-lived process. Under a
/// request-scoped or serverless runtime it silently resets per invocation.
pub struct MonitoringService {
    metrics: Arc<MetricStoreService>,
    sessions: Arc<SessionTrackerService>,
    alerts: Arc<AlertManagerService>,
    started_at_ms: RwLock<Option<i64>>,
    dashboard_points: usize,
}

impl MonitoringService {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_components(
            Arc::new(MetricStoreService::new(config)),
            Arc::new(SessionTrackerService::new()),
            Arc::new(AlertManagerService::new()),
            config.dashboard_points,
        )
    }

    pub fn with_components(
        metrics: Arc<MetricStoreService>,
        sessions: Arc<SessionTrackerService>,
        alerts: Arc<AlertManagerService>,
        dashboard_points: usize,
    ) -> Self {
        Self {
            metrics,
            sessions,
            alerts,
            started_at_ms: RwLock::new(None),
            dashboard_points,
        }
    }

    /// Idempotent: the first call records the process start time, later calls
    /// are no-ops.
    pub async fn start_monitoring(&self) {
        let mut started = self.started_at_ms.write().await;
        if started.is_none() {
            *started = Some(now_ms());
            info!("monitoring started");
        }
    }

    pub async fn is_running(&self) -> bool {
        self.started_at_ms.read().await.is_some()
    }

    async fn uptime_ms(&self) -> i64 {
        match *self.started_at_ms.read().await {
            Some(started) => now_ms() - started,
            None => 0,
        }
    }

    // =================================================================================
    // INGESTION
    // =================================================================================

    pub async fn record_metric(&self, metric_id: &str, value: f64, timestamp: Option<i64>) {
        self.start_monitoring().await;
        self.metrics.record(metric_id, value, timestamp).await;
    }

    pub async fn touch_session(
        &self,
        session_id: &str,
        user_id: Option<String>,
        page_view: bool,
        device: Option<DeviceInfo>,
    ) {
        self.start_monitoring().await;
        self.sessions.touch(session_id, user_id, page_view, device).await;
    }

    pub async fn record_session_error(&self, session_id: &str, message: &str) {
        self.start_monitoring().await;
        self.sessions.record_error(session_id, message).await;
        self.metrics.note_error();
    }

    // =================================================================================
    // ALERT LIFECYCLE
    // =================================================================================

    #[instrument(skip(self, draft))]
    pub async fn add_alert(&self, draft: AlertDraft) -> Result<Alert, MonitoringError> {
        self.start_monitoring().await;
        self.alerts.add(draft).await
    }

    pub async fn resolve_alert(
        &self,
        id: &str,
        resolved_by: Option<&str>,
    ) -> Result<Alert, MonitoringError> {
        self.start_monitoring().await;
        self.alerts
            .resolve(id, resolved_by)
            .await
            .ok_or_else(|| MonitoringError::NotFound(format!("Alert not found: {}", id)))
    }

    pub async fn get_unresolved_alerts(&self) -> Vec<Alert> {
        self.start_monitoring().await;
        self.alerts.unresolved().await
    }

    pub async fn query_alerts(&self, filter: &AlertFilter) -> Vec<Alert> {
        self.start_monitoring().await;
        self.alerts.query(filter).await
    }

    pub async fn alert_stats(&self) -> crate::models::AlertStats {
        self.alerts.stats().await
    }

    // =================================================================================
    // READS
    // =================================================================================

    pub async fn get_system_stats(&self) -> SystemStats {
        self.start_monitoring().await;
        let store_stats = self.metrics.stats().await;

        SystemStats {
            uptime_ms: self.uptime_ms().await,
            total_errors: store_stats.error_count,
            total_sessions: self.sessions.count().await,
            total_alerts: self.alerts.count().await,
            tracked_metrics: store_stats.tracked_metrics,
            metrics: self.metrics.latest_values().await,
        }
    }

    pub async fn get_recent_metrics(
        &self,
        window_ms: Option<i64>,
    ) -> (i64, HashMap<String, Vec<MetricSample>>) {
        self.start_monitoring().await;
        let window = window_ms.unwrap_or(DEFAULT_METRICS_WINDOW_MS);
        (window, self.metrics.query_window(window).await)
    }

    pub async fn get_active_sessions(&self) -> Vec<Session> {
        self.start_monitoring().await;
        self.sessions.sessions().await
    }

    pub async fn get_session_aggregates(&self) -> SessionAggregates {
        self.start_monitoring().await;
        self.sessions.aggregates().await
    }

    // =================================================================================
    // DASHBOARD COMPOSITION
    // =================================================================================

    /// Composes the dashboard from the live stores. Health and trends are
    /// derived on read and never persisted.
    #[instrument(skip(self))]
    pub async fn dashboard_snapshot(&self) -> DashboardSnapshot {
        self.start_monitoring().await;
        let now = now_ms();

        let latest = self.metrics.latest_values().await;
        let unresolved = self.alerts.unresolved().await;
        let alert_stats = self.alerts.stats().await;
        let aggregates = self.sessions.aggregates().await;
        let error_count = self.metrics.error_count();

        let system_health = score_health(error_count, &latest, &unresolved);

        let recent_points = self.metrics.tail(self.dashboard_points).await;
        let trends: HashMap<String, Trend> = recent_points
            .iter()
            .map(|(id, samples)| (id.clone(), analyze_trend(samples)))
            .collect();

        let recent_alerts = self
            .alerts
            .query(&AlertFilter {
                limit: Some(RECENT_ALERT_COUNT),
                ..AlertFilter::default()
            })
            .await;

        DashboardSnapshot {
            overview: DashboardOverview {
                system_health,
                total_sessions: aggregates.count,
                total_errors: error_count,
                total_alerts: alert_stats.total,
                uptime: self.uptime_ms().await,
                timestamp: now,
            },
            performance: DashboardPerformance {
                response_time: latest.get("page_load_time").copied(),
                memory_usage: latest.get("js_heap_used").copied(),
                cache_hit_rate: latest.get("cache_hit_rate").copied(),
                error_rate: aggregates.error_rate,
                trends,
            },
            sessions: DashboardSessions {
                active: aggregates.count,
                average_duration: aggregates.average_duration_ms,
                total_page_views: aggregates.total_page_views,
                device_breakdown: aggregates.device_breakdown,
                browser_breakdown: aggregates.browser_breakdown,
            },
            alerts: DashboardAlerts {
                total: alert_stats.total,
                critical: alert_stats.by_severity.critical,
                warning: alert_stats.by_severity.warning,
                recent: recent_alerts,
            },
            real_time_metrics: RealTimeMetrics {
                metrics: recent_points,
                last_update: now,
            },
        }
    }
}
