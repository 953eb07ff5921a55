//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with help text and
//! an exit code. Every error here ends the run.

use miette::Diagnostic;
use thiserror::Error;

use pollwatch_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to {url}")]
    #[diagnostic(
        code(pollwatch::connection_failed),
        help("Check that the API is running and reachable at the given HOST:PORT.")
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request to {url} timed out")]
    #[diagnostic(code(pollwatch::timeout))]
    Timeout { url: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("Request failed with status code: {status} {body}")]
    #[diagnostic(code(pollwatch::request_failed), help("URL: {url}"))]
    RequestFailed {
        status: u16,
        url: String,
        body: String,
    },

    #[error("Unexpected response from API: {message}")]
    #[diagnostic(code(pollwatch::invalid_response))]
    InvalidResponse { message: String },

    // ── Output ───────────────────────────────────────────────────────
    #[error("Failed to write report to stdout")]
    #[diagnostic(code(pollwatch::output))]
    Output(#[from] std::io::Error),

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(
        code(pollwatch::validation),
        help("please provide IP and port (i.e. 192.168.15.10:1660)")
    )]
    Validation { field: String, reason: String },
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. } => exit_code::USAGE,
            Self::RequestFailed { .. } | Self::InvalidResponse { .. } | Self::Output(_) => {
                exit_code::GENERAL
            }
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed { url, reason },
            CoreError::Timeout { url } => CliError::Timeout { url },
            CoreError::RequestFailed { status, url, body } => {
                CliError::RequestFailed { status, url, body }
            }
            CoreError::InvalidResponse { message } => CliError::InvalidResponse { message },
            CoreError::Config { message } => CliError::Validation {
                field: "HOST:PORT".into(),
                reason: message,
            },
        }
    }
}
