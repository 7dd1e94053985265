// =====================================================================================
// METRIC STORE SERVICE
// =====================================================================================

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::models::{now_ms, MetricSample, MetricStoreStats};
use shared_config::AppConfig;

/// Append-only, per-metric bounded time-series buffers.
///
/// A sample is evicted only once it is older than the retention age AND more
/// than the retention sample count of newer samples exist, so the horizon is
/// effectively max(retention age, retention samples). Eviction happens lazily
/// on the write path; reads never mutate.
#[derive(Debug)]
pub struct MetricStoreService {
    buffers: RwLock<HashMap<String, VecDeque<MetricSample>>>,
    error_count: AtomicU64,
    max_age_ms: i64,
    max_samples: usize,
}

impl MetricStoreService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            buffers: RwLock::new(HashMap::new()),
            error_count: AtomicU64::new(0),
            max_age_ms: config.metric_retention_secs as i64 * 1000,
            max_samples: config.metric_retention_samples,
        }
    }

    #[instrument(skip(self))]
    pub async fn record(&self, metric_id: &str, value: f64, timestamp: Option<i64>) {
        let now = now_ms();
        let sample = MetricSample {
            timestamp: timestamp.unwrap_or(now),
            value,
        };

        let mut buffers = self.buffers.write().await;
        let buffer = buffers.entry(metric_id.to_string()).or_default();
        buffer.push_back(sample);

        let horizon = now - self.max_age_ms;
        while buffer.len() > self.max_samples
            && buffer.front().map_or(false, |s| s.timestamp < horizon)
        {
            buffer.pop_front();
        }

        debug!(metric_id, value, "metric sample recorded");
    }

    /// Samples with `timestamp >= now - window_ms`, per metric. Metrics with
    /// nothing in the window are omitted entirely.
    pub async fn query_window(&self, window_ms: i64) -> HashMap<String, Vec<MetricSample>> {
        let cutoff = now_ms() - window_ms;
        let buffers = self.buffers.read().await;

        buffers
            .iter()
            .filter_map(|(id, buffer)| {
                let samples: Vec<MetricSample> = buffer
                    .iter()
                    .filter(|s| s.timestamp >= cutoff)
                    .copied()
                    .collect();
                if samples.is_empty() {
                    None
                } else {
                    Some((id.clone(), samples))
                }
            })
            .collect()
    }

    pub async fn latest(&self, metric_id: &str) -> Option<f64> {
        let buffers = self.buffers.read().await;
        buffers
            .get(metric_id)
            .and_then(|buffer| buffer.back())
            .map(|s| s.value)
    }

    /// Most recent value per metric, for health scoring and summaries.
    pub async fn latest_values(&self) -> HashMap<String, f64> {
        let buffers = self.buffers.read().await;
        buffers
            .iter()
            .filter_map(|(id, buffer)| buffer.back().map(|s| (id.clone(), s.value)))
            .collect()
    }

    /// Last `count` samples per metric, oldest first.
    pub async fn tail(&self, count: usize) -> HashMap<String, Vec<MetricSample>> {
        let buffers = self.buffers.read().await;
        buffers
            .iter()
            .filter_map(|(id, buffer)| {
                if buffer.is_empty() {
                    return None;
                }
                let skip = buffer.len().saturating_sub(count);
                Some((id.clone(), buffer.iter().skip(skip).copied().collect()))
            })
            .collect()
    }

    pub fn note_error(&self) {
        self.error_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn error_count(&self) -> u64 {
        self.error_count.load(Ordering::Relaxed)
    }

    pub async fn stats(&self) -> MetricStoreStats {
        let buffers = self.buffers.read().await;
        MetricStoreStats {
            tracked_metrics: buffers.len(),
            total_samples: buffers.values().map(VecDeque::len).sum(),
            error_count: self.error_count(),
        }
    }
}
