use thiserror::Error;

/// Top-level error type for the `civictranslate-api` crate.
///
/// Covers every failure mode of the REST surface: transport, HTTP status,
/// payload decoding, and the local token store. `civictranslate-core` maps
/// these into domain errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The server answered 401. The stored token has already been cleared
    /// and the session-expiry hook has run by the time the caller sees this.
    #[error("Unauthorized -- session expired or token rejected")]
    Unauthorized,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The base URL cannot carry path segments (e.g. `mailto:`).
    #[error("Base URL cannot carry a resource path: {url}")]
    CannotBeABase { url: String },

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── HTTP status ─────────────────────────────────────────────────
    /// The server answered 404 for the given path.
    #[error("Not found: {path}")]
    NotFound { path: String },

    /// Any other non-success status.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    // ── Token storage ───────────────────────────────────────────────
    /// Reading or writing the persisted bearer token failed.
    #[error("Token storage error: {0}")]
    TokenStorage(#[from] std::io::Error),
}

impl Error {
    /// Returns `true` if the server rejected our credentials.
    pub fn is_unauthorized(&self) -> bool {
        match self {
            Self::Unauthorized => true,
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::UNAUTHORIZED),
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { status: 404, .. } => true,
            _ => false,
        }
    }
}
