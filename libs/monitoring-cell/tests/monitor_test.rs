// =====================================================================================
// MONITORING FACADE TESTS
// =====================================================================================

use monitoring_cell::{AlertDraft, AlertSeverity, AlertType, MonitoringService, Trend};
use shared_config::AppConfig;

fn service() -> MonitoringService {
    MonitoringService::new(&AppConfig::default())
}

fn critical_draft(title: &str) -> AlertDraft {
    AlertDraft {
        alert_type: Some(AlertType::Error),
        severity: Some(AlertSeverity::Critical),
        title: Some(title.to_string()),
        description: Some("something broke".to_string()),
        ..AlertDraft::default()
    }
}

#[tokio::test]
async fn test_start_monitoring_is_idempotent() {
    let monitoring = service();
    assert!(!monitoring.is_running().await);

    monitoring.start_monitoring().await;
    assert!(monitoring.is_running().await);

    let stats_before = monitoring.get_system_stats().await;
    monitoring.start_monitoring().await;
    let stats_after = monitoring.get_system_stats().await;

    // Second start must not reset the clock.
    assert!(stats_after.uptime_ms >= stats_before.uptime_ms);
}

#[tokio::test]
async fn test_operations_auto_start_the_engine() {
    let monitoring = service();
    assert!(!monitoring.is_running().await);

    monitoring.record_metric("page_load_time", 500.0, None).await;
    assert!(monitoring.is_running().await);
}

#[tokio::test]
async fn test_session_errors_feed_the_error_counter() {
    let monitoring = service();

    monitoring.touch_session("s1", None, true, None).await;
    monitoring.record_session_error("s1", "ReferenceError").await;
    monitoring.record_session_error("s1", "TypeError").await;

    let stats = monitoring.get_system_stats().await;
    assert_eq!(stats.total_errors, 2);
    assert_eq!(stats.total_sessions, 1);
}

#[tokio::test]
async fn test_resolve_unknown_alert_is_not_found() {
    let monitoring = service();
    let result = monitoring.resolve_alert("alert_missing", Some("ops")).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_unresolved_alerts_shrink_on_resolution() {
    let monitoring = service();

    let a = monitoring.add_alert(critical_draft("first")).await.unwrap();
    monitoring.add_alert(critical_draft("second")).await.unwrap();
    assert_eq!(monitoring.get_unresolved_alerts().await.len(), 2);

    monitoring.resolve_alert(&a.id, Some("ops")).await.unwrap();
    assert_eq!(monitoring.get_unresolved_alerts().await.len(), 1);
}

#[tokio::test]
async fn test_dashboard_reflects_latest_page_load_time() {
    let monitoring = service();

    // Slow page loads arriving after a fast one must win the "latest" slot.
    monitoring.record_metric("page_load_time", 500.0, None).await;
    monitoring.record_metric("page_load_time", 4000.0, None).await;

    let stats = monitoring.get_system_stats().await;
    assert_eq!(stats.metrics.get("page_load_time"), Some(&4000.0));

    let dashboard = monitoring.dashboard_snapshot().await;
    assert_eq!(dashboard.performance.response_time, Some(4000.0));

    // The scorer deducts 10 for the slow page load.
    assert_eq!(dashboard.overview.system_health.score, 90);
    assert!(dashboard
        .overview
        .system_health
        .issues
        .contains(&"Slow page load times".to_string()));
}

#[tokio::test]
async fn test_dashboard_trends_classify_each_metric() {
    let monitoring = service();

    for value in [10.0, 10.0, 10.0, 10.0, 12.0] {
        monitoring.record_metric("page_load_time", value, None).await;
    }
    for value in [100.0, 100.0, 100.0] {
        monitoring.record_metric("cache_hit_rate", value, None).await;
    }

    let dashboard = monitoring.dashboard_snapshot().await;
    assert_eq!(dashboard.performance.trends.get("page_load_time"), Some(&Trend::Up));
    assert_eq!(dashboard.performance.trends.get("cache_hit_rate"), Some(&Trend::Stable));
}

#[tokio::test]
async fn test_dashboard_recent_alerts_are_top_five_newest() {
    let monitoring = service();

    for i in 0..7 {
        monitoring
            .add_alert(AlertDraft {
                timestamp: Some(1_000 + i),
                ..critical_draft(&format!("alert-{}", i))
            })
            .await
            .unwrap();
    }

    let dashboard = monitoring.dashboard_snapshot().await;
    assert_eq!(dashboard.alerts.total, 7);
    assert_eq!(dashboard.alerts.recent.len(), 5);
    assert_eq!(dashboard.alerts.recent[0].timestamp, 1_006);
    assert_eq!(dashboard.alerts.recent[4].timestamp, 1_002);
}

#[tokio::test]
async fn test_dashboard_real_time_metrics_cap_points() {
    let config = AppConfig {
        dashboard_points: 20,
        ..AppConfig::default()
    };
    let monitoring = MonitoringService::new(&config);

    for i in 0..50 {
        monitoring.record_metric("js_heap_used", i as f64, None).await;
    }

    let dashboard = monitoring.dashboard_snapshot().await;
    let points = dashboard
        .real_time_metrics
        .metrics
        .get("js_heap_used")
        .expect("metric should be present");
    assert_eq!(points.len(), 20);
    assert_eq!(points.last().map(|s| s.value), Some(49.0));
}

#[tokio::test]
async fn test_dashboard_error_rate_is_zero_without_sessions() {
    let monitoring = service();
    let dashboard = monitoring.dashboard_snapshot().await;
    assert_eq!(dashboard.performance.error_rate, 0.0);
    assert!(dashboard.performance.error_rate.is_finite());
}

#[tokio::test]
async fn test_recent_metrics_default_window() {
    let monitoring = service();
    monitoring.record_metric("cpu", 1.0, None).await;

    let (window_ms, metrics) = monitoring.get_recent_metrics(None).await;
    assert_eq!(window_ms, 5 * 60 * 1000);
    assert!(metrics.contains_key("cpu"));
}
