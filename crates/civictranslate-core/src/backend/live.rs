// ── Live backend ──
//
// Thin adapter from the REST client to domain types. All HTTP concerns
// (bearer token, 401 handling, timeouts) live in `RestClient`.

use chrono::NaiveDate;
use tracing::debug;

use civictranslate_api::RestClient;

use crate::convert::{create_body, status_patch};
use crate::error::CoreError;
use crate::model::{NewRequest, RequestId, RequestStatus, TranslationRequest};

/// Data access over HTTP.
#[derive(Debug, Clone)]
pub struct LiveBackend {
    client: RestClient,
}

impl LiveBackend {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &RestClient {
        &self.client
    }

    pub(crate) async fn list_requests(&self) -> Result<Vec<TranslationRequest>, CoreError> {
        let records = self.client.list_requests().await?;
        debug!(count = records.len(), "live: listed requests");
        records.into_iter().map(TranslationRequest::try_from).collect()
    }

    pub(crate) async fn create_request(
        &self,
        fields: &NewRequest,
        today: NaiveDate,
    ) -> Result<TranslationRequest, CoreError> {
        let record = self
            .client
            .create_request(&create_body(fields, today))
            .await?;
        TranslationRequest::try_from(record)
    }

    pub(crate) async fn update_status(
        &self,
        id: &RequestId,
        status: RequestStatus,
        today: NaiveDate,
    ) -> Result<TranslationRequest, CoreError> {
        let record = self
            .client
            .update_status(id.as_str(), &status_patch(status, today))
            .await
            .map_err(|e| for_id(id, e))?;
        TranslationRequest::try_from(record)
    }

    pub(crate) async fn delete_request(&self, id: &RequestId) -> Result<(), CoreError> {
        self.client
            .delete_request(id.as_str())
            .await
            .map_err(|e| for_id(id, e))?;
        Ok(())
    }
}

/// A 404 on a single-record call names the requested id, not the
/// percent-encoded path segment.
fn for_id(id: &RequestId, err: civictranslate_api::Error) -> CoreError {
    match CoreError::from(err) {
        CoreError::NotFound { .. } => CoreError::NotFound { id: id.to_string() },
        other => other,
    }
}
