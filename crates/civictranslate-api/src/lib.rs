// civictranslate-api: Async Rust client for the translation-request REST API

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod requests;
pub mod transport;

pub use auth::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use client::{RestClient, UnauthorizedHook};
pub use error::Error;
pub use models::{CreateRequestBody, RequestRecord, StatusPatch};
pub use transport::TransportConfig;
