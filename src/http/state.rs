use std::sync::Arc;

use crate::adapters::{ConfiguredStores, InMemoryOrderManagement, InMemoryOrderRepository, EncryptedTokenCodec};
use crate::cancellation::{CancellationResolver, EligibilityPolicy, OrderLocator, StoreResolver, TokenCodec};
use crate::config::AppConfig;
use crate::metrics::Metrics;

/// Shared state handed to every HTTP worker
pub struct AppState {
    pub resolver: CancellationResolver,
    pub stores: Arc<dyn StoreResolver>,
    pub tokens: Arc<dyn TokenCodec>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    /// Wire the resolver against the in-memory order adapters
    pub fn in_memory(
        config: &AppConfig,
        repository: InMemoryOrderRepository,
        metrics: Arc<Metrics>,
    ) -> anyhow::Result<Self> {
        let stores: Arc<dyn StoreResolver> = Arc::new(ConfiguredStores::from_config(config));
        let tokens: Arc<dyn TokenCodec> =
            Arc::new(EncryptedTokenCodec::from_hex(&config.token.secret_key_hex)?);
        let management = Arc::new(InMemoryOrderManagement::new(&repository));

        let resolver = CancellationResolver::new(
            OrderLocator::new(Arc::new(repository), tokens.clone()),
            EligibilityPolicy::new(stores.clone()),
            management.clone(),
            management,
        );

        Ok(Self {
            resolver,
            stores,
            tokens,
            metrics,
        })
    }
}
