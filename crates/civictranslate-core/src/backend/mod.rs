// ── Data access layer ──
//
// One enum with two variants instead of a trait object: there are exactly
// two backends and the store matches on them directly.

mod live;
mod mock;

use chrono::{NaiveDate, Utc};
use serde::Serialize;

pub use live::LiveBackend;
pub use mock::{MockBackend, MockDataset};

use crate::config::DataMode;
use crate::error::CoreError;
use crate::model::{NewRequest, RequestId, RequestStatus, TranslationRequest};

/// Result of a delete. Both backends report `success: true`; the mock
/// treats an absent id as already deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeleteAck {
    pub success: bool,
}

/// Uniform request CRUD over the configured backend.
#[derive(Debug, Clone)]
pub enum DataAccess {
    Mock(MockBackend),
    Live(LiveBackend),
}

impl DataAccess {
    pub fn mode(&self) -> DataMode {
        match self {
            Self::Mock(_) => DataMode::Mock,
            Self::Live(_) => DataMode::Live,
        }
    }

    /// All requests, newest first in mock mode, server order in live mode.
    pub async fn list_requests(&self) -> Result<Vec<TranslationRequest>, CoreError> {
        match self {
            Self::Mock(m) => Ok(m.list_requests().await),
            Self::Live(l) => l.list_requests().await,
        }
    }

    /// Create a `pending` request stamped with today's date.
    pub async fn create_request(&self, fields: NewRequest) -> Result<TranslationRequest, CoreError> {
        let today = today();
        match self {
            Self::Mock(m) => Ok(m.create_request(fields, today).await),
            Self::Live(l) => l.create_request(&fields, today).await,
        }
    }

    /// Set a request's status and bump its `updated_at`.
    pub async fn update_status(
        &self,
        id: &RequestId,
        status: RequestStatus,
    ) -> Result<TranslationRequest, CoreError> {
        let today = today();
        match self {
            Self::Mock(m) => m.update_status(id, status, today).await,
            Self::Live(l) => l.update_status(id, status, today).await,
        }
    }

    pub async fn delete_request(&self, id: &RequestId) -> Result<DeleteAck, CoreError> {
        match self {
            Self::Mock(m) => {
                m.delete_request(id).await;
            }
            Self::Live(l) => l.delete_request(id).await?,
        }
        Ok(DeleteAck { success: true })
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}
