// ── Domain model ──
//
// Canonical types shared by the store, the backends, and consumers.

mod notification;
mod request;
mod session;

pub use notification::{Notification, NotificationId, Severity};
pub use request::{NewRequest, Priority, RequestId, RequestStatus, TranslationRequest};
pub use session::{Role, UserProfile};
