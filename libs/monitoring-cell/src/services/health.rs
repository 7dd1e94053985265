// =====================================================================================
// HEALTH SCORING
// =====================================================================================

use std::collections::HashMap;

use crate::models::{Alert, AlertSeverity, HealthReport, HealthStatus};

const CRITICAL_ALERT_PENALTY: i32 = 20;
const WARNING_ALERT_PENALTY: i32 = 10;
const ERROR_COUNT_THRESHOLD: u64 = 10;
const ERROR_COUNT_PENALTY: i32 = 15;
const PAGE_LOAD_THRESHOLD_MS: f64 = 3000.0;
const PAGE_LOAD_PENALTY: i32 = 10;
const HEAP_THRESHOLD_MB: f64 = 100.0;
const HEAP_PENALTY: i32 = 10;

/// Composite 0-100 health score from unresolved alerts, the running error
/// count, and the latest values of key metrics. Deterministic and
/// side-effect-free.
pub fn score_health(
    errors: u64,
    metrics: &HashMap<String, f64>,
    unresolved_alerts: &[Alert],
) -> HealthReport {
    let mut score: i32 = 100;
    let mut issues = Vec::new();

    for alert in unresolved_alerts {
        match alert.severity {
            AlertSeverity::Critical => {
                score -= CRITICAL_ALERT_PENALTY;
                issues.push(format!("Critical alert: {}", alert.title));
            }
            AlertSeverity::Warning => {
                score -= WARNING_ALERT_PENALTY;
                issues.push(format!("Warning alert: {}", alert.title));
            }
            AlertSeverity::Info => {}
        }
    }

    if errors > ERROR_COUNT_THRESHOLD {
        score -= ERROR_COUNT_PENALTY;
        issues.push("High error rate detected".to_string());
    }

    if metrics.get("page_load_time").copied().unwrap_or(0.0) > PAGE_LOAD_THRESHOLD_MS {
        score -= PAGE_LOAD_PENALTY;
        issues.push("Slow page load times".to_string());
    }

    if metrics.get("js_heap_used").copied().unwrap_or(0.0) > HEAP_THRESHOLD_MB {
        score -= HEAP_PENALTY;
        issues.push("High memory usage".to_string());
    }

    let score = score.clamp(0, 100);
    let status = if score >= 80 {
        HealthStatus::Healthy
    } else if score >= 60 {
        HealthStatus::Warning
    } else {
        HealthStatus::Critical
    };

    HealthReport {
        status,
        score,
        issues,
    }
}
