// =====================================================================================
// MONITORING CELL - TELEMETRY, HEALTH & ALERTING ENGINE
// =====================================================================================
//
// This cell provides the platform's in-process monitoring services:
// - Bounded time-series storage for performance/error telemetry
// - User session tracking with device classification
// - Alert lifecycle management (creation, classification, resolution)
// - On-demand health scoring and trend analysis for the dashboard
//
// All state is in-memory and ephemeral; nothing survives a process restart.
//
// =====================================================================================

pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

// Re-export commonly used types
pub use models::{
    Alert, AlertDraft, AlertFilter, AlertSeverity, AlertStats, AlertType,
    DashboardSnapshot, DeviceInfo, HealthReport, HealthStatus, MetricSample,
    MonitoringError, Session, SessionAggregates, SystemStats, Trend,
};

pub use services::{
    analyze_trend, score_health, AlertManagerService, MetricStoreService,
    MonitoringService, SessionTrackerService,
};

pub use handlers::MonitoringHandlers;
pub use router::create_monitoring_router;
