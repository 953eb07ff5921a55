use thiserror::Error;

/// Top-level error type for the `pollwatch-api` crate.
///
/// Covers every failure mode of a single request: transport, an unusable
/// base URL, non-success status and response decoding.
/// `pollwatch-core` maps these into domain diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The base URL cannot carry path segments (e.g. `mailto:` style URLs).
    #[error("Base URL cannot be used for API requests: {0}")]
    InvalidBaseUrl(String),

    // ── API ─────────────────────────────────────────────────────────
    /// The server answered with a non-success status. The raw body is kept
    /// because the API reports its own failures as plain text.
    #[error("Request to {url} failed with status {status}: {body}")]
    Status { status: u16, url: String, body: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// HTTP status of the failed request, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if the request never completed in time.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }

    /// Returns `true` if the server could not be reached.
    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_connect())
    }
}
