// REST API HTTP client
//
// Wraps `reqwest::Client` with base-URL joining, bearer-token injection, and
// the 401 session-expiry policy. Endpoint methods live in `requests.rs` as
// inherent methods to keep this module focused on transport mechanics.

use std::fmt;
use std::sync::Arc;

use reqwest::StatusCode;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::auth::TokenStore;
use crate::error::Error;
use crate::transport::TransportConfig;

/// Callback invoked after a 401 once the stored token has been cleared.
///
/// The dashboard uses it to drop the session and navigate to `/login`.
pub type UnauthorizedHook = Arc<dyn Fn() + Send + Sync>;

/// Raw HTTP client for the translation-request REST API.
///
/// All methods return decoded payloads; non-success statuses surface as
/// [`Error`] variants.
#[derive(Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: Url,
    timeout_secs: u64,
    tokens: Arc<dyn TokenStore>,
    on_unauthorized: Option<UnauthorizedHook>,
}

impl fmt::Debug for RestClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.base_url.as_str())
            .field("timeout_secs", &self.timeout_secs)
            .field("has_unauthorized_hook", &self.on_unauthorized.is_some())
            .finish_non_exhaustive()
    }
}

impl RestClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the API root, e.g. `http://localhost:5173/api`.
    pub fn new(
        base_url: Url,
        tokens: Arc<dyn TokenStore>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            timeout_secs: transport.timeout.as_secs(),
            tokens,
            on_unauthorized: None,
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            http,
            base_url,
            timeout_secs: crate::transport::DEFAULT_TIMEOUT.as_secs(),
            tokens,
            on_unauthorized: None,
        }
    }

    /// Register the callback run after a 401 response.
    pub fn on_unauthorized(mut self, hook: UnauthorizedHook) -> Self {
        self.on_unauthorized = Some(hook);
        self
    }

    /// The API root URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The token store consulted before every request.
    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for a resource path relative to the API root.
    ///
    /// `endpoint("requests/TRQ-001")` → `{base}/requests/TRQ-001`
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, Error> {
        let full = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Ok(Url::parse(&full)?)
    }

    /// URL of one resource in a collection, with `id` percent-encoded as a
    /// single path segment.
    ///
    /// `resource("requests", "TRQ-001")` → `{base}/requests/TRQ-001`
    pub(crate) fn resource(&self, collection: &str, id: &str) -> Result<Url, Error> {
        let mut url = self.endpoint(collection)?;
        url.path_segments_mut()
            .map_err(|()| Error::CannotBeABase {
                url: self.base_url.to_string(),
            })?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the JSON body.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);
        let resp = self.send(self.http.get(url)).await?;
        self.parse_json(resp).await
    }

    /// Send a POST request with JSON body and decode the response.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &impl Serialize,
    ) -> Result<T, Error> {
        debug!("POST {}", url);
        let resp = self.send(self.http.post(url).json(body)).await?;
        self.parse_json(resp).await
    }

    /// Send a PATCH request with JSON body and decode the response.
    pub(crate) async fn patch<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &impl Serialize,
    ) -> Result<T, Error> {
        debug!("PATCH {}", url);
        let resp = self.send(self.http.patch(url).json(body)).await?;
        self.parse_json(resp).await
    }

    /// Send a DELETE request. Any body in the response is ignored.
    pub(crate) async fn delete(&self, url: Url) -> Result<(), Error> {
        debug!("DELETE {}", url);
        let resp = self.send(self.http.delete(url)).await?;
        self.check_status(resp).await.map(|_| ())
    }

    /// Attach the bearer token (if any) and send.
    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::Response, Error> {
        let builder = match self.tokens.load() {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        };

        builder.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout {
                    timeout_secs: self.timeout_secs,
                }
            } else {
                Error::Transport(e)
            }
        })
    }

    /// Map non-success statuses to errors, running the 401 policy first.
    async fn check_status(&self, resp: reqwest::Response) -> Result<reqwest::Response, Error> {
        let status = resp.status();

        if status == StatusCode::UNAUTHORIZED {
            warn!("server rejected credentials; clearing stored token");
            self.tokens.clear();
            if let Some(hook) = &self.on_unauthorized {
                hook();
            }
            return Err(Error::Unauthorized);
        }

        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound {
                path: resp.url().path().to_owned(),
            });
        }

        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message: if message.is_empty() {
                    status.canonical_reason().unwrap_or("unknown").to_owned()
                } else {
                    message
                },
            });
        }

        Ok(resp)
    }

    async fn parse_json<T: DeserializeOwned>(&self, resp: reqwest::Response) -> Result<T, Error> {
        let resp = self.check_status(resp).await?;
        let body = resp.text().await.map_err(Error::Transport)?;

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }
}
