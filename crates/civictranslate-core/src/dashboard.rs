// ── Dashboard facade ──
//
// Wires the notifier, session, data access layer, and request store from a
// single `DashboardConfig`. In live mode the REST client is built with a
// 401 hook that expires the session, which sends the navigator to `/login`.

use std::sync::Arc;

use tracing::{debug, info};

use civictranslate_api::{
    FileTokenStore, MemoryTokenStore, RestClient, TokenStore, TransportConfig,
};
use secrecy::ExposeSecret;

use crate::backend::{DataAccess, LiveBackend, MockBackend, MockDataset};
use crate::config::{DashboardConfig, DataMode, TokenSource};
use crate::error::CoreError;
use crate::notify::Notifier;
use crate::router::Navigator;
use crate::session::SessionStore;
use crate::store::RequestStore;

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<DashboardInner>`.
#[derive(Clone)]
pub struct Dashboard {
    inner: Arc<DashboardInner>,
}

struct DashboardInner {
    config: DashboardConfig,
    notifier: Notifier,
    session: SessionStore,
    store: RequestStore,
    tokens: Option<Arc<dyn TokenStore>>,
}

impl Dashboard {
    /// Build a dashboard. Mock mode starts from the seeded dataset.
    pub fn new(config: DashboardConfig) -> Result<Self, CoreError> {
        Self::build(config, MockDataset::seeded())
    }

    /// Build a dashboard whose mock backend serves `dataset`.
    ///
    /// In live mode the dataset is ignored.
    pub fn with_mock_dataset(
        config: DashboardConfig,
        dataset: MockDataset,
    ) -> Result<Self, CoreError> {
        Self::build(config, dataset)
    }

    fn build(config: DashboardConfig, dataset: MockDataset) -> Result<Self, CoreError> {
        let notifier = Notifier::new(config.notification_ttl);
        let session = SessionStore::new();

        let (backend, tokens) = match config.mode {
            DataMode::Mock => {
                debug!(records = dataset.len(), "using mock backend");
                (
                    DataAccess::Mock(MockBackend::new(dataset, config.mock_latency)),
                    None,
                )
            }
            DataMode::Live => {
                let tokens = token_store(&config.token);
                let client = live_client(&config, Arc::clone(&tokens), &session)?;
                info!(api_url = %config.api_url, "using live backend");
                (DataAccess::Live(LiveBackend::new(client)), Some(tokens))
            }
        };

        let store = RequestStore::new(Arc::new(backend), notifier.clone());

        Ok(Self {
            inner: Arc::new(DashboardInner {
                config,
                notifier,
                session,
                store,
                tokens,
            }),
        })
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.inner.config
    }

    pub fn mode(&self) -> DataMode {
        self.inner.config.mode
    }

    pub fn store(&self) -> &RequestStore {
        &self.inner.store
    }

    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    pub fn navigator(&self) -> &Navigator {
        self.inner.session.navigator()
    }

    pub fn notifier(&self) -> &Notifier {
        &self.inner.notifier
    }

    /// Bearer token store (live mode only).
    pub fn tokens(&self) -> Option<&Arc<dyn TokenStore>> {
        self.inner.tokens.as_ref()
    }
}

fn token_store(source: &TokenSource) -> Arc<dyn TokenStore> {
    match source {
        TokenSource::Memory(Some(token)) => {
            Arc::new(MemoryTokenStore::with_token(token.expose_secret()))
        }
        TokenSource::Memory(None) => Arc::new(MemoryTokenStore::new()),
        TokenSource::File(path) => Arc::new(FileTokenStore::new(path)),
    }
}

fn live_client(
    config: &DashboardConfig,
    tokens: Arc<dyn TokenStore>,
    session: &SessionStore,
) -> Result<RestClient, CoreError> {
    let transport = TransportConfig::default().with_timeout(config.timeout);
    let session = session.clone();

    Ok(RestClient::new(config.api_url.clone(), tokens, &transport)?
        .on_unauthorized(Arc::new(move || session.expire())))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::MockLatency;
    use crate::model::Role;
    use crate::router::Route;

    fn mock_config() -> DashboardConfig {
        DashboardConfig {
            mock_latency: MockLatency::none(),
            ..DashboardConfig::default()
        }
    }

    #[tokio::test]
    async fn mock_dashboard_serves_seed() {
        let dash = Dashboard::new(mock_config()).unwrap();
        assert_eq!(dash.mode(), DataMode::Mock);
        assert!(dash.tokens().is_none());

        dash.store().fetch_requests().await;
        assert_eq!(dash.store().stats().total, 8);
    }

    #[tokio::test]
    async fn injected_dataset_is_used() {
        let dash = Dashboard::with_mock_dataset(mock_config(), MockDataset::empty()).unwrap();
        dash.store().fetch_requests().await;
        assert!(dash.store().is_empty());
    }

    #[tokio::test]
    async fn store_notifications_share_the_bus() {
        let dash = Dashboard::new(mock_config()).unwrap();
        dash.store()
            .delete_request(&"TRQ-001".into())
            .await
            .unwrap();
        assert_eq!(dash.notifier().len(), 1);
    }

    #[test]
    fn session_drives_navigator() {
        let dash = Dashboard::new(mock_config()).unwrap();
        assert_eq!(dash.navigator().current(), Route::Login);

        dash.session().login_as(Role::Admin);
        assert_eq!(dash.navigator().current(), Route::Dashboard);
    }

    #[test]
    fn live_mode_builds_memory_token_store() {
        let config = DashboardConfig {
            mode: DataMode::Live,
            token: TokenSource::Memory(Some("abc".to_owned().into())),
            ..DashboardConfig::default()
        };
        let dash = Dashboard::new(config).unwrap();
        let tokens = dash.tokens().unwrap();
        assert_eq!(tokens.load().unwrap().expose_secret(), "abc");
    }
}
