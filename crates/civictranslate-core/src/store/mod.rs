// ── Request state ──

mod collection;
mod filter;
mod request_store;

pub use filter::RequestFilter;
pub use request_store::{FETCH_FAILED, RequestStats, RequestStore, RequestStream};
