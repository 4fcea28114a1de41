//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use civictranslate_config::ConfigError;
use civictranslate_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the translation API")]
    #[diagnostic(
        code(civictranslate::connection_failed),
        help(
            "Check that the API is running and the base URL is correct.\n\
             Reason: {reason}\n\
             Try: civictranslate --api-url http://localhost:5173/api requests list"
        )
    )]
    ConnectionFailed { reason: String },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(civictranslate::timeout),
        help("Increase timeout with --timeout or check API responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── Authentication ───────────────────────────────────────────────
    #[error("The API rejected the stored credentials")]
    #[diagnostic(
        code(civictranslate::auth_failed),
        help(
            "The stored token has been cleared.\n\
             Store a fresh one with: civictranslate token set"
        )
    )]
    AuthFailed,

    #[error("Unknown role '{role}'")]
    #[diagnostic(
        code(civictranslate::unknown_role),
        help("Sign in with --as admin or --as client.")
    )]
    UnknownRole { role: String },

    #[error("Signing in is required to open the dashboard")]
    #[diagnostic(code(civictranslate::login_required))]
    LoginRequired,

    #[error("'{action}' requires the admin role (signed in as {role})")]
    #[diagnostic(
        code(civictranslate::permission_denied),
        help("Re-run with --as admin.")
    )]
    PermissionDenied { action: String, role: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("Request '{id}' not found")]
    #[diagnostic(
        code(civictranslate::not_found),
        help("Run: civictranslate requests list to see available requests")
    )]
    NotFound { id: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error (HTTP {status}): {message}")]
    #[diagnostic(code(civictranslate::api_error))]
    ApiError { status: u16, message: String },

    #[error("Unexpected response: {message}")]
    #[diagnostic(code(civictranslate::internal))]
    Internal { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(civictranslate::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(civictranslate::config),
        help("Inspect the resolved configuration with: civictranslate config show")
    )]
    Config(#[from] ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(civictranslate::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::AuthFailed | Self::LoginRequired | Self::PermissionDenied { .. } => {
                exit_code::AUTH
            }
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::UnknownRole { .. }
            | Self::Validation { .. }
            | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NetworkFailure { reason } => CliError::ConnectionFailed { reason },
            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },
            CoreError::Unauthorized => CliError::AuthFailed,
            CoreError::NotFound { id } => CliError::NotFound { id },
            CoreError::UnknownRole { role } => CliError::UnknownRole { role },
            CoreError::Api { status, message } => CliError::ApiError { status, message },
            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
            CoreError::Internal(message) => CliError::Internal { message },
        }
    }
}
