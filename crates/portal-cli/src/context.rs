use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use portal_config::PortalConfig;
use portal_db::PortalStore;
use portal_gateway::HttpGateway;
use portal_sync::SyncOrchestrator;

/// Everything a command handler needs, built once per invocation.
pub struct AppContext {
    pub config: PortalConfig,
    pub store: Arc<PortalStore>,
    pub orchestrator: SyncOrchestrator<HttpGateway>,
}

impl AppContext {
    pub async fn init() -> anyhow::Result<Self> {
        let config = PortalConfig::load_with_dotenv().context("failed to load configuration")?;
        if !config.gateway.has_session() {
            tracing::warn!("no session cookie configured; portal requests will be anonymous");
        }

        if !config.store.is_in_memory()
            && let Some(parent) = Path::new(&config.store.path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create store directory {}", parent.display())
            })?;
        }

        let store = PortalStore::open_local(&config.store.path)
            .await
            .with_context(|| format!("failed to open store at {}", config.store.path))?;
        let store = Arc::new(store);

        let gateway =
            HttpGateway::new(&config.gateway).context("failed to build portal HTTP client")?;
        let orchestrator = SyncOrchestrator::with_current_runtime(
            gateway,
            Arc::clone(&store),
            config.gateway.clone(),
        )?;

        Ok(Self {
            config,
            store,
            orchestrator,
        })
    }
}
