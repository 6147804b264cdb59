use std::fmt;
use tracing::{debug, warn};

use crate::backends::CatalogBackend;
use crate::events::{CatalogEvent, EventBus, EventPayload, EventType};

pub const OFFLINE_NOTICE: &str = "Offline mode. Data may be outdated.";

/// Server reachability as reported by `/health`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerStatus {
    Healthy { movies_count: Option<u64> },
    /// The server answered but reported a problem, usually with its database.
    Unhealthy { reason: String },
    /// The request did not complete.
    Offline { reason: String },
}

impl ServerStatus {
    pub fn is_online(&self) -> bool {
        !matches!(self, ServerStatus::Offline { .. })
    }

    pub fn is_healthy(&self) -> bool {
        matches!(self, ServerStatus::Healthy { .. })
    }

    /// Notice for the render layer, if any.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            ServerStatus::Offline { .. } => Some(OFFLINE_NOTICE),
            _ => None,
        }
    }
}

impl fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerStatus::Healthy {
                movies_count: Some(count),
            } => write!(f, "healthy ({} movies)", count),
            ServerStatus::Healthy { movies_count: None } => write!(f, "healthy"),
            ServerStatus::Unhealthy { reason } => write!(f, "unhealthy: {}", reason),
            ServerStatus::Offline { reason } => write!(f, "offline: {}", reason),
        }
    }
}

pub async fn check_health(backend: &dyn CatalogBackend, event_bus: &EventBus) -> ServerStatus {
    let status = match backend.health().await {
        Ok(report) if report.is_healthy() => ServerStatus::Healthy {
            movies_count: report.movies_count,
        },
        Ok(report) => ServerStatus::Unhealthy {
            reason: report
                .error
                .filter(|e| !e.trim().is_empty())
                .or(report.database)
                .unwrap_or(report.status),
        },
        Err(e) => ServerStatus::Offline {
            reason: e.user_message(),
        },
    };

    if status.is_healthy() {
        debug!("Catalog server is {}", status);
    } else {
        warn!("Catalog server is {}", status);
    }

    let movies_count = match &status {
        ServerStatus::Healthy { movies_count } => *movies_count,
        _ => None,
    };
    event_bus
        .publish(CatalogEvent::new(
            EventType::HealthChecked,
            EventPayload::Health {
                online: status.is_online(),
                movies_count,
            },
        ))
        .await;

    status
}
