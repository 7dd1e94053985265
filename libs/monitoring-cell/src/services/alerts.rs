// =====================================================================================
// ALERT MANAGER SERVICE
// =====================================================================================

use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::models::{
    now_ms, Alert, AlertDraft, AlertFilter, AlertSeverity, AlertStats, AlertType,
    MonitoringError, SeverityCounts, TypeCounts,
};

pub const DEFAULT_ALERT_LIMIT: usize = 50;

/// Alert lifecycle storage. Alerts transition unresolved -> resolved exactly
/// once in steady state; re-resolving is idempotent. No deduplication is
/// performed; callers own not double-reporting identical conditions.
#[derive(Debug, Default)]
pub struct AlertManagerService {
    alerts: RwLock<HashMap<String, Alert>>,
}

impl AlertManagerService {
    pub fn new() -> Self {
        Self::default()
    }

    #[instrument(skip(self, draft))]
    pub async fn add(&self, draft: AlertDraft) -> Result<Alert, MonitoringError> {
        let missing = draft.missing_fields();
        if !missing.is_empty() {
            return Err(MonitoringError::Validation(missing));
        }

        let (alert_type, severity) = match (draft.alert_type, draft.severity) {
            (Some(alert_type), Some(severity)) => (alert_type, severity),
            // missing_fields() has already rejected these
            _ => return Err(MonitoringError::Validation(missing)),
        };

        // resolved == true always carries a resolution timestamp.
        let resolved = draft.resolved.unwrap_or(false);
        let alert = Alert {
            id: draft.id.unwrap_or_else(generate_alert_id),
            alert_type,
            severity,
            title: draft.title.unwrap_or_default(),
            description: draft.description.unwrap_or_default(),
            timestamp: draft.timestamp.unwrap_or_else(now_ms),
            resolved,
            resolved_by: None,
            resolved_at: resolved.then(now_ms),
            actions: draft.actions.unwrap_or_default(),
        };

        match alert.severity {
            AlertSeverity::Critical => {
                error!(
                    alert_id = %alert.id,
                    alert_type = ?alert.alert_type,
                    "CRITICAL ALERT: {}", alert.title
                );
            }
            AlertSeverity::Warning => {
                warn!(
                    alert_id = %alert.id,
                    alert_type = ?alert.alert_type,
                    "WARNING ALERT: {}", alert.title
                );
            }
            AlertSeverity::Info => {
                info!(alert_id = %alert.id, "INFO ALERT: {}", alert.title);
            }
        }

        let mut alerts = self.alerts.write().await;
        alerts.insert(alert.id.clone(), alert.clone());
        Ok(alert)
    }

    pub async fn unresolved(&self) -> Vec<Alert> {
        let alerts = self.alerts.read().await;
        let mut unresolved: Vec<Alert> = alerts
            .values()
            .filter(|a| !a.resolved)
            .cloned()
            .collect();
        unresolved.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        unresolved
    }

    /// Resolve by id. Unknown ids yield `None`. Resolving an already-resolved
    /// alert succeeds idempotently, refreshing `resolved_by`/`resolved_at`
    /// when an actor is given.
    #[instrument(skip(self))]
    pub async fn resolve(&self, id: &str, resolved_by: Option<&str>) -> Option<Alert> {
        let mut alerts = self.alerts.write().await;
        let alert = alerts.get_mut(id)?;

        alert.resolved = true;
        alert.resolved_at = Some(now_ms());
        if let Some(actor) = resolved_by {
            alert.resolved_by = Some(actor.to_string());
        }

        info!(alert_id = %id, resolved_by = ?resolved_by, "alert resolved");
        Some(alert.clone())
    }

    /// Presentation query: sort newest-first, then filter, then limit. Never
    /// mutates stored alerts.
    pub async fn query(&self, filter: &AlertFilter) -> Vec<Alert> {
        let alerts = self.alerts.read().await;
        let mut sorted: Vec<Alert> = alerts.values().cloned().collect();
        sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        let limit = filter.limit.unwrap_or(DEFAULT_ALERT_LIMIT);
        sorted
            .into_iter()
            .filter(|a| filter.resolved.map_or(true, |r| a.resolved == r))
            .filter(|a| filter.severity.map_or(true, |s| a.severity == s))
            .filter(|a| filter.alert_type.map_or(true, |t| a.alert_type == t))
            .take(limit)
            .collect()
    }

    pub async fn stats(&self) -> AlertStats {
        let alerts = self.alerts.read().await;
        let mut by_severity = SeverityCounts::default();
        let mut by_type = TypeCounts::default();
        let mut resolved = 0;

        for alert in alerts.values() {
            match alert.severity {
                AlertSeverity::Critical => by_severity.critical += 1,
                AlertSeverity::Warning => by_severity.warning += 1,
                AlertSeverity::Info => by_severity.info += 1,
            }
            match alert.alert_type {
                AlertType::Performance => by_type.performance += 1,
                AlertType::Error => by_type.error += 1,
                AlertType::Security => by_type.security += 1,
                AlertType::Capacity => by_type.capacity += 1,
            }
            if alert.resolved {
                resolved += 1;
            }
        }

        let total = alerts.len();
        AlertStats {
            total,
            by_severity,
            by_type,
            resolved,
            unresolved: total - resolved,
        }
    }

    pub async fn count(&self) -> usize {
        self.alerts.read().await.len()
    }
}

fn generate_alert_id() -> String {
    let token = Uuid::new_v4().simple().to_string();
    format!("alert_{}_{}", now_ms(), &token[..8])
}
