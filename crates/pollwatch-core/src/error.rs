// ── Core error types ──
//
// Every error here is fatal to the monitor run. Count mismatches are not
// errors; the reconciliation state machine absorbs them. The
// `From<pollwatch_api::Error>` impl translates transport-layer failures
// into these variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request to {url} timed out")]
    Timeout { url: String },

    // ── API errors ───────────────────────────────────────────────────
    #[error("Request failed with status code: {status} {body}")]
    RequestFailed {
        status: u16,
        url: String,
        body: String,
    },

    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<pollwatch_api::Error> for CoreError {
    fn from(err: pollwatch_api::Error) -> Self {
        let timed_out = err.is_timeout();
        let unreachable = err.is_connect();
        let transport_status = err.status();

        match err {
            pollwatch_api::Error::Status { status, url, body } => {
                CoreError::RequestFailed { status, url, body }
            }
            pollwatch_api::Error::Transport(e) => {
                let url = e
                    .url()
                    .map_or_else(|| "<unknown>".into(), ToString::to_string);
                match transport_status {
                    _ if timed_out => CoreError::Timeout { url },
                    Some(status) if !unreachable => CoreError::RequestFailed {
                        status,
                        url,
                        body: e.to_string(),
                    },
                    _ => CoreError::ConnectionFailed {
                        url,
                        reason: e.to_string(),
                    },
                }
            }
            pollwatch_api::Error::InvalidBaseUrl(url) => CoreError::Config {
                message: format!("Base URL cannot be used for API requests: {url}"),
            },
            pollwatch_api::Error::Deserialization { message, body: _ } => {
                CoreError::InvalidResponse { message }
            }
        }
    }
}
