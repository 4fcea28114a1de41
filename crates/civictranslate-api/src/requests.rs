// `/requests` endpoints

use tracing::debug;

use crate::client::RestClient;
use crate::error::Error;
use crate::models::{CreateRequestBody, RequestRecord, StatusPatch};

impl RestClient {
    /// List every translation request.
    ///
    /// `GET /requests`
    pub async fn list_requests(&self) -> Result<Vec<RequestRecord>, Error> {
        let url = self.endpoint("requests")?;
        debug!("listing requests");
        self.get(url).await
    }

    /// Create a request; the server echoes the stored record.
    ///
    /// `POST /requests`
    pub async fn create_request(&self, body: &CreateRequestBody) -> Result<RequestRecord, Error> {
        let url = self.endpoint("requests")?;
        debug!(title = %body.title, "creating request");
        self.post(url, body).await
    }

    /// Change the status of one request.
    ///
    /// `PATCH /requests/{id}`
    pub async fn update_status(&self, id: &str, patch: &StatusPatch) -> Result<RequestRecord, Error> {
        let url = self.resource("requests", id)?;
        debug!(id, status = %patch.status, "updating request status");
        self.patch(url, patch).await
    }

    /// Delete one request.
    ///
    /// `DELETE /requests/{id}`
    pub async fn delete_request(&self, id: &str) -> Result<(), Error> {
        let url = self.resource("requests", id)?;
        debug!(id, "deleting request");
        self.delete(url).await
    }
}
