// ── Core error types ──
//
// User-facing errors from civictranslate-core. Consumers never see HTTP
// status codes or JSON parse failures directly: the
// `From<civictranslate_api::Error>` impl translates transport-layer errors
// into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    // ── Transport errors ─────────────────────────────────────────────
    #[error("Network failure: {reason}")]
    NetworkFailure { reason: String },

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Unauthorized -- please log in again")]
    Unauthorized,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Request not found: {id}")]
    NotFound { id: String },

    // ── Session errors ───────────────────────────────────────────────
    #[error("Unknown role: {role} (expected 'admin' or 'client')")]
    UnknownRole { role: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Returns `true` for failures of the transport itself.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::NetworkFailure { .. } | Self::Timeout { .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<civictranslate_api::Error> for CoreError {
    fn from(err: civictranslate_api::Error) -> Self {
        use civictranslate_api::Error as ApiError;

        match err {
            ApiError::Unauthorized => CoreError::Unauthorized,
            ApiError::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.status().map(|s| s.as_u16()) == Some(401) {
                    CoreError::Unauthorized
                } else {
                    CoreError::NetworkFailure {
                        reason: e.to_string(),
                    }
                }
            }
            ApiError::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            ApiError::CannotBeABase { url } => CoreError::Config {
                message: format!("Base URL cannot carry a resource path: {url}"),
            },
            ApiError::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            ApiError::NotFound { path } => CoreError::NotFound {
                id: path.rsplit('/').next().unwrap_or_default().to_owned(),
            },
            ApiError::Api { status, message } => CoreError::Api { status, message },
            ApiError::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
            ApiError::TokenStorage(e) => CoreError::Internal(format!("Token storage error: {e}")),
        }
    }
}
