//! Error handling for the mock service.
//!
//! This module provides:
//! - Machine-readable error codes with HTTP status mapping
//! - Severity-based logging with tracing integration
//! - Error counters via the metrics facade
//! - An axum `IntoResponse` impl rendering the OData error envelope
//!
//! Evaluator-level anomalies (malformed filter clauses, unknown fields,
//! unparseable literals) never reach this module; they are absorbed at the
//! evaluation site and resolve to "no match". Only resource-level
//! preconditions and identifier resolution failures surface as errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use metrics::counter;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::odata::envelope::ODataError;

// ═══════════════════════════════════════════════════════════════════════════════
// Result Type Alias
// ═══════════════════════════════════════════════════════════════════════════════

/// A specialized Result type for mock-service operations.
pub type Result<T> = std::result::Result<T, SapMockError>;

// ═══════════════════════════════════════════════════════════════════════════════
// Error Codes
// ═══════════════════════════════════════════════════════════════════════════════

/// Machine-readable error codes.
///
/// These are stable and usable by clients for programmatic error handling;
/// `odata_code` is the spelling that appears in the wire envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Lookup errors
    EmployeeNotFound,
    RoleNotFound,

    // Validation errors
    InvalidInput,

    // Master-data preconditions
    NoRolesDefined,

    // Internal errors
    SerializationError,
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error.
    pub const fn http_status(&self) -> StatusCode {
        match self {
            Self::EmployeeNotFound | Self::RoleNotFound => StatusCode::NOT_FOUND,
            Self::InvalidInput => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NoRolesDefined | Self::SerializationError | Self::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// The error code string carried in the OData error envelope.
    pub const fn odata_code(&self) -> &'static str {
        match self {
            Self::EmployeeNotFound | Self::RoleNotFound => "NotFound",
            Self::InvalidInput => "InvalidInput",
            Self::NoRolesDefined => "MissingMasterData",
            Self::SerializationError => "SerializationError",
            Self::InternalError => "InternalError",
        }
    }

    /// Get the error category for grouping.
    pub const fn category(&self) -> &'static str {
        match self {
            Self::EmployeeNotFound | Self::RoleNotFound => "lookup",
            Self::InvalidInput => "validation",
            Self::NoRolesDefined => "master_data",
            Self::SerializationError | Self::InternalError => "internal",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Error Severity
// ═══════════════════════════════════════════════════════════════════════════════

/// Severity level for errors (affects logging).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Expected client-facing conditions (lookups, bad input)
    Low,
    /// Degraded operation
    Medium,
    /// Broken preconditions or internal faults
    High,
}

impl ErrorSeverity {
    pub const fn from_code(code: &ErrorCode) -> Self {
        match code {
            ErrorCode::EmployeeNotFound | ErrorCode::RoleNotFound | ErrorCode::InvalidInput => {
                Self::Low
            }
            ErrorCode::SerializationError => Self::Medium,
            ErrorCode::NoRolesDefined | ErrorCode::InternalError => Self::High,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Main Error Type
// ═══════════════════════════════════════════════════════════════════════════════

/// The central error type of the mock service.
#[derive(Error, Debug)]
#[error("[{code}] {message}")]
pub struct SapMockError {
    /// Machine-readable error code
    code: ErrorCode,

    /// Message rendered into the OData error envelope
    message: Cow<'static, str>,

    /// The source error that caused this error
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl SapMockError {
    // ─────────────────────────────────────────────────────────────────────────
    // Constructors
    // ─────────────────────────────────────────────────────────────────────────

    /// Create a new error with code and message.
    pub fn new(code: ErrorCode, message: impl Into<Cow<'static, str>>) -> Self {
        let error = Self {
            code,
            message: message.into(),
            source: None,
        };
        error.record_metrics();
        error
    }

    /// Create a not-found error for an entity.
    pub fn not_found(entity_type: impl fmt::Display, entity_id: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::EmployeeNotFound,
            format!("{} not found: {}", entity_type, entity_id),
        )
    }

    /// Create a validation error.
    pub fn invalid_input(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Create a missing-master-roles precondition error.
    pub fn no_roles(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorCode::NoRolesDefined, message)
    }

    /// Create an internal error (500).
    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Add a source error.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::from_code(&self.code)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Logging
    // ─────────────────────────────────────────────────────────────────────────

    /// Log this error with appropriate severity.
    pub fn log(&self) {
        let code = self.code.to_string();
        let category = self.code.category();
        let status = self.http_status().as_u16();

        match self.severity() {
            ErrorSeverity::High => {
                error!(
                    error_code = %code,
                    category = category,
                    http_status = status,
                    message = %self.message,
                    source = ?self.source,
                    "High severity error"
                );
            }
            ErrorSeverity::Medium => {
                warn!(
                    error_code = %code,
                    category = category,
                    http_status = status,
                    message = %self.message,
                    "Medium severity error"
                );
            }
            ErrorSeverity::Low => {
                debug!(
                    error_code = %code,
                    category = category,
                    http_status = status,
                    message = %self.message,
                    "Low severity error"
                );
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Metrics
    // ─────────────────────────────────────────────────────────────────────────

    fn record_metrics(&self) {
        counter!(
            "sapmock_errors_total",
            "code" => self.code.to_string(),
            "category" => self.code.category().to_string(),
        )
        .increment(1);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Axum Integration
// ═══════════════════════════════════════════════════════════════════════════════

impl IntoResponse for SapMockError {
    fn into_response(self) -> Response {
        self.log();

        let status = self.http_status();
        let body = ODataError::new(self.code.odata_code(), self.message.to_string());

        (status, Json(body)).into_response()
    }
}

impl From<serde_json::Error> for SapMockError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, "Failed to process JSON data").with_source(error)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════
