//! Shared vocabulary for ports and their adapters
//!
//! ```text
//!   DirectoryService ──► BankRecordStore / BankRecordSession (domain_directory)
//!                               ▲                 ▲
//!                     PostgresBankStore     MockBankStore
//!                        (infra_db)        (mock feature)
//! ```
//!
//! Adapters report failures as [`PortError`], so the directory never sees
//! driver error types.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Failure reported by a port implementation
#[derive(Debug, Error)]
pub enum PortError {
    #[error("Not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    /// A unique key is already taken
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// The backing system could not be reached
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// A stored value no longer passes domain validation
    #[error("Transformation error: {message}")]
    Transformation { message: String },

    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },
}

impl PortError {
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        PortError::Conflict {
            message: message.into(),
        }
    }

    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
            source: None,
        }
    }

    pub fn transformation(message: impl Into<String>) -> Self {
        PortError::Transformation {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Whether retrying later might succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, PortError::Connection { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, PortError::Conflict { .. })
    }
}

/// Marker for adapters that can be shared across tasks
pub trait DomainPort: Send + Sync + 'static {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterHealth {
    Healthy,
    /// Serving, but slower or partially impaired
    Degraded,
    Unhealthy,
}

/// Outcome of probing an adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    pub adapter_id: String,
    pub status: AdapterHealth,
    pub latency_ms: u64,
    pub message: Option<String>,
    pub checked_at: chrono::DateTime<chrono::Utc>,
}

impl HealthCheckResult {
    /// True for healthy and degraded adapters
    pub fn is_operational(&self) -> bool {
        matches!(self.status, AdapterHealth::Healthy | AdapterHealth::Degraded)
    }
}

#[async_trait::async_trait]
pub trait HealthCheckable: Send + Sync {
    async fn health_check(&self) -> HealthCheckResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_names_the_code() {
        let error = PortError::not_found("SwiftCode", "CITIPLPPXXX");
        assert!(error.is_not_found());
        assert!(!error.is_transient());
        assert_eq!(
            error.to_string(),
            "Not found: SwiftCode with id CITIPLPPXXX"
        );
    }

    #[test]
    fn test_only_connection_errors_are_transient() {
        assert!(PortError::connection("refused").is_transient());

        let conflict = PortError::conflict("duplicate key");
        assert!(!conflict.is_transient());
        assert!(conflict.is_conflict());
        assert!(!PortError::internal("boom").is_transient());
    }

    #[test]
    fn test_degraded_adapter_is_operational() {
        let result = HealthCheckResult {
            adapter_id: "postgres-bank-store".to_string(),
            status: AdapterHealth::Degraded,
            latency_ms: 12,
            message: None,
            checked_at: chrono::Utc::now(),
        };
        assert!(result.is_operational());

        let down = HealthCheckResult {
            status: AdapterHealth::Unhealthy,
            ..result
        };
        assert!(!down.is_operational());
    }
}
