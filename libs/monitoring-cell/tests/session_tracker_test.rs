// =====================================================================================
// SESSION TRACKER TESTS
// =====================================================================================

use monitoring_cell::{DeviceInfo, SessionTrackerService};

fn desktop_chrome() -> DeviceInfo {
    DeviceInfo {
        browser: "Chrome".to_string(),
        os: "macOS".to_string(),
        device_type: "desktop".to_string(),
    }
}

#[tokio::test]
async fn test_touch_creates_session_on_first_sight() {
    let tracker = SessionTrackerService::new();

    tracker.touch("s1", Some("u1".to_string()), true, Some(desktop_chrome())).await;

    let sessions = tracker.sessions().await;
    assert_eq!(sessions.len(), 1);

    let session = &sessions[0];
    assert_eq!(session.session_id, "s1");
    assert_eq!(session.user_id.as_deref(), Some("u1"));
    assert_eq!(session.page_views, 1);
    assert!(session.last_seen_at >= session.started_at);
}

#[tokio::test]
async fn test_touch_updates_existing_session() {
    let tracker = SessionTrackerService::new();

    tracker.touch("s1", None, true, None).await;
    tracker.touch("s1", None, true, None).await;
    tracker.touch("s1", None, false, None).await;

    let sessions = tracker.sessions().await;
    assert_eq!(sessions.len(), 1, "touching must not create duplicates");
    assert_eq!(sessions[0].page_views, 2);
}

#[tokio::test]
async fn test_first_observed_device_wins() {
    let tracker = SessionTrackerService::new();

    tracker.touch("s1", None, false, Some(desktop_chrome())).await;
    tracker
        .touch(
            "s1",
            None,
            false,
            Some(DeviceInfo {
                browser: "Firefox".to_string(),
                os: "Linux".to_string(),
                device_type: "mobile".to_string(),
            }),
        )
        .await;

    let sessions = tracker.sessions().await;
    let device = sessions[0].device.as_ref().expect("device should be set");
    assert_eq!(device.browser, "Chrome");
}

#[tokio::test]
async fn test_record_error_creates_unseen_session() {
    let tracker = SessionTrackerService::new();

    tracker.record_error("ghost", "TypeError: x is undefined").await;

    let sessions = tracker.sessions().await;
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].errors.len(), 1);
    assert_eq!(sessions[0].errors[0].message, "TypeError: x is undefined");
}

#[tokio::test]
async fn test_aggregates_with_no_sessions_are_zeroed() {
    let tracker = SessionTrackerService::new();

    let aggregates = tracker.aggregates().await;
    assert_eq!(aggregates.count, 0);
    assert_eq!(aggregates.error_rate, 0.0);
    assert_eq!(aggregates.average_duration_ms, 0.0);
    assert!(aggregates.error_rate.is_finite());
}

#[tokio::test]
async fn test_aggregates_sum_page_views_and_errors() {
    let tracker = SessionTrackerService::new();

    tracker.touch("s1", None, true, Some(desktop_chrome())).await;
    tracker.touch("s1", None, true, None).await;
    tracker.touch("s2", None, true, None).await;
    tracker.record_error("s1", "boom").await;
    tracker.record_error("s2", "boom").await;
    tracker.record_error("s2", "boom again").await;

    let aggregates = tracker.aggregates().await;
    assert_eq!(aggregates.count, 2);
    assert_eq!(aggregates.total_page_views, 3);
    assert_eq!(aggregates.total_errors, 3);
    assert_eq!(aggregates.error_rate, 1.5);
}

#[tokio::test]
async fn test_breakdowns_bucket_missing_device_as_unknown() {
    let tracker = SessionTrackerService::new();

    tracker.touch("s1", None, false, Some(desktop_chrome())).await;
    tracker.touch("s2", None, false, None).await;
    tracker.touch("s3", None, false, None).await;

    let aggregates = tracker.aggregates().await;
    assert_eq!(aggregates.device_breakdown.get("desktop"), Some(&1));
    assert_eq!(aggregates.device_breakdown.get("Unknown"), Some(&2));
    assert_eq!(aggregates.browser_breakdown.get("Chrome"), Some(&1));
    assert_eq!(aggregates.browser_breakdown.get("Unknown"), Some(&2));
}
