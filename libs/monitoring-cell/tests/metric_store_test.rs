// =====================================================================================
// METRIC STORE TESTS
// =====================================================================================

use monitoring_cell::models::now_ms;
use monitoring_cell::MetricStoreService;
use shared_config::AppConfig;

fn store_with(retention_secs: u64, retention_samples: usize) -> MetricStoreService {
    MetricStoreService::new(&AppConfig {
        metric_retention_secs: retention_secs,
        metric_retention_samples: retention_samples,
        ..AppConfig::default()
    })
}

#[tokio::test]
async fn test_latest_returns_most_recent_value() {
    let store = store_with(3600, 500);

    assert_eq!(store.latest("page_load_time").await, None);

    store.record("page_load_time", 500.0, None).await;
    store.record("page_load_time", 4000.0, None).await;

    assert_eq!(store.latest("page_load_time").await, Some(4000.0));
}

#[tokio::test]
async fn test_query_window_filters_by_timestamp() {
    let store = store_with(3600, 500);
    let now = now_ms();

    store.record("cpu", 10.0, Some(now - 10_000)).await;
    store.record("cpu", 20.0, Some(now - 2_000)).await;
    store.record("cpu", 30.0, Some(now)).await;

    let windowed = store.query_window(5_000).await;
    let samples = windowed.get("cpu").expect("cpu should be present");

    assert_eq!(samples.len(), 2);
    assert_eq!(samples[0].value, 20.0);
    assert_eq!(samples[1].value, 30.0);
}

#[tokio::test]
async fn test_query_window_omits_metrics_with_no_recent_samples() {
    let store = store_with(3600, 500);
    let now = now_ms();

    store.record("stale_metric", 1.0, Some(now - 60_000)).await;
    store.record("fresh_metric", 2.0, Some(now)).await;

    let windowed = store.query_window(5_000).await;

    assert!(windowed.contains_key("fresh_metric"));
    assert!(!windowed.contains_key("stale_metric"));
}

#[tokio::test]
async fn test_retention_evicts_old_samples_beyond_sample_cap() {
    let store = store_with(1, 3);
    let now = now_ms();

    // Five samples, all well past the 1s retention age.
    for i in 0..5 {
        store.record("requests", i as f64, Some(now - 30_000 + i)).await;
    }

    let windowed = store.query_window(60_000).await;
    let samples = windowed.get("requests").expect("requests should be present");

    // Evicted down to the sample cap; newest survive.
    assert_eq!(samples.len(), 3);
    assert_eq!(samples[0].value, 2.0);
    assert_eq!(samples[2].value, 4.0);
}

#[tokio::test]
async fn test_recent_samples_survive_sample_cap() {
    let store = store_with(3600, 3);
    let now = now_ms();

    // More samples than the cap, but all within the retention age.
    for i in 0..5 {
        store.record("requests", i as f64, Some(now - 100 + i)).await;
    }

    let windowed = store.query_window(60_000).await;
    let samples = windowed.get("requests").expect("requests should be present");

    assert_eq!(samples.len(), 5, "fresh samples must not be evicted by count alone");
}

#[tokio::test]
async fn test_tail_returns_last_n_samples_in_order() {
    let store = store_with(3600, 500);
    let now = now_ms();

    for i in 0..30 {
        store.record("heap", i as f64, Some(now - 1_000 + i)).await;
    }

    let tails = store.tail(20).await;
    let samples = tails.get("heap").expect("heap should be present");

    assert_eq!(samples.len(), 20);
    assert_eq!(samples[0].value, 10.0);
    assert_eq!(samples[19].value, 29.0);
}

#[tokio::test]
async fn test_stats_counts_metrics_samples_and_errors() {
    let store = store_with(3600, 500);

    store.record("a", 1.0, None).await;
    store.record("a", 2.0, None).await;
    store.record("b", 3.0, None).await;
    store.note_error();
    store.note_error();

    let stats = store.stats().await;
    assert_eq!(stats.tracked_metrics, 2);
    assert_eq!(stats.total_samples, 3);
    assert_eq!(stats.error_count, 2);
}
