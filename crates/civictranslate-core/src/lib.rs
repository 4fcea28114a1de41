//! Reactive state layer between `civictranslate-api` and UI consumers.
//!
//! This crate owns the business logic, domain model, and reactive data
//! infrastructure for the translation-request dashboard:
//!
//! - **[`Dashboard`]**: Cheaply cloneable facade wiring every piece together
//!   from a [`DashboardConfig`], including the 401 session-expiry policy.
//!
//! - **[`RequestStore`]**: Owns the authoritative request collection, derives
//!   [`RequestStats`], and orchestrates create / update / delete actions
//!   against the [`DataAccess`] layer.
//!
//! - **[`DataAccess`]**: Either an injectable in-memory [`MockDataset`] with
//!   simulated latency, or the live REST client.
//!
//! - **[`Notifier`]**: Owned notification bus. Every message expires on a
//!   cancellable timer; consumers subscribe via [`Subscription`].
//!
//! - **[`SessionStore`]** / **[`Navigator`]**: Mock role-based login and the
//!   two route guard rules.

pub mod backend;
pub mod config;
pub mod convert;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod notify;
pub mod router;
pub mod session;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use backend::{DataAccess, DeleteAck, LiveBackend, MockBackend, MockDataset};
pub use config::{DashboardConfig, DataMode, MockLatency, TokenSource};
pub use dashboard::Dashboard;
pub use error::CoreError;
pub use notify::{NotificationStream, Notifier};
pub use router::{Navigator, Route};
pub use session::SessionStore;
pub use store::{RequestFilter, RequestStats, RequestStore, RequestStream};
pub use stream::Subscription;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    NewRequest, Notification, NotificationId, Priority, RequestId, RequestStatus, Role, Severity,
    TranslationRequest, UserProfile,
};
