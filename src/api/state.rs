//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use crate::config::ServerConfig;
use crate::dataset::{Dataset, DatasetFormat, ObservationTable};
use crate::view::{dashboard_layout, render_page, Layout};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Instant;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Observation table, read-only after startup
    pub table: Arc<ObservationTable>,
    /// Where and when the table was loaded
    pub source: Arc<SourceInfo>,
    /// Page layout
    pub layout: Arc<Layout>,
    /// Pre-rendered dashboard page
    pub page: Arc<String>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

/// Provenance of the loaded dataset
#[derive(Debug, Clone)]
pub struct SourceInfo {
    pub location: String,
    pub format: DatasetFormat,
    pub loaded_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(dataset: Dataset, config: ApiConfig) -> Self {
        let layout = dashboard_layout();
        let page = render_page(&layout);

        Self {
            table: Arc::new(dataset.table),
            source: Arc::new(SourceInfo {
                location: dataset.source,
                format: dataset.format,
                loaded_at: dataset.loaded_at,
            }),
            layout: Arc::new(layout),
            page: Arc::new(page),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Allowed CORS origins; empty allows any origin
    pub cors_origins: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ServerConfig::default().into()
    }
}

impl From<ServerConfig> for ApiConfig {
    fn from(server: ServerConfig) -> Self {
        Self {
            host: server.host,
            port: server.port,
            cors_origins: server.cors_origins,
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
