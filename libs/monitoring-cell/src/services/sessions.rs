// =====================================================================================
// SESSION TRACKER SERVICE
// =====================================================================================

use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::models::{now_ms, DeviceInfo, Session, SessionAggregates, SessionError};

/// Live set of observed user sessions. Sessions are created on first sight
/// and updated in place; they are never removed, only left to go stale.
#[derive(Debug, Default)]
pub struct SessionTrackerService {
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionTrackerService {
    pub fn new() -> Self {
        Self::default()
    }

    #[instrument(skip(self, device))]
    pub async fn touch(
        &self,
        session_id: &str,
        user_id: Option<String>,
        page_view: bool,
        device: Option<DeviceInfo>,
    ) {
        let now = now_ms();
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .entry(session_id.to_string())
            .or_insert_with(|| Session {
                session_id: session_id.to_string(),
                user_id: None,
                started_at: now,
                last_seen_at: now,
                page_views: 0,
                device: None,
                errors: Vec::new(),
            });

        session.last_seen_at = now;
        if page_view {
            session.page_views += 1;
        }
        // First observation wins; the device fingerprint is stable per session.
        if session.device.is_none() {
            session.device = device;
        }
        if session.user_id.is_none() {
            session.user_id = user_id;
        }
    }

    #[instrument(skip(self))]
    pub async fn record_error(&self, session_id: &str, message: &str) {
        let now = now_ms();
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .entry(session_id.to_string())
            .or_insert_with(|| Session {
                session_id: session_id.to_string(),
                user_id: None,
                started_at: now,
                last_seen_at: now,
                page_views: 0,
                device: None,
                errors: Vec::new(),
            });

        session.errors.push(SessionError {
            message: message.to_string(),
            timestamp: now,
        });
        debug!(session_id, "session error recorded");
    }

    /// All tracked sessions. There is no staleness cutoff; the tracked set is
    /// the active set.
    pub async fn sessions(&self) -> Vec<Session> {
        let sessions = self.sessions.read().await;
        sessions.values().cloned().collect()
    }

    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn aggregates(&self) -> SessionAggregates {
        let sessions = self.sessions.read().await;
        let count = sessions.len();

        let mut total_duration: i64 = 0;
        let mut total_page_views: u64 = 0;
        let mut total_errors: u64 = 0;
        let mut device_breakdown: HashMap<String, u64> = HashMap::new();
        let mut browser_breakdown: HashMap<String, u64> = HashMap::new();

        for session in sessions.values() {
            total_duration += session.duration_ms();
            total_page_views += session.page_views;
            total_errors += session.errors.len() as u64;

            let (device_type, browser) = match &session.device {
                Some(device) => (device.device_type.clone(), device.browser.clone()),
                None => ("Unknown".to_string(), "Unknown".to_string()),
            };
            *device_breakdown.entry(device_type).or_insert(0) += 1;
            *browser_breakdown.entry(browser).or_insert(0) += 1;
        }

        // Guard the zero-session case so the rates stay finite.
        let (average_duration_ms, error_rate) = if count > 0 {
            (
                total_duration as f64 / count as f64,
                total_errors as f64 / count as f64,
            )
        } else {
            (0.0, 0.0)
        };

        SessionAggregates {
            count,
            average_duration_ms,
            total_page_views,
            total_errors,
            error_rate,
            device_breakdown,
            browser_breakdown,
        }
    }
}
