use std::collections::HashMap;

use crate::cancellation::ports::StoreResolver;
use crate::config::{AppConfig, StoreConfig};

/// Store lookup backed by the `stores` section of the configuration
#[derive(Debug, Clone)]
pub struct ConfiguredStores {
    by_code: HashMap<String, StoreConfig>,
    default_store_id: i64,
}

impl ConfiguredStores {
    pub fn from_config(config: &AppConfig) -> Self {
        let by_code: HashMap<String, StoreConfig> = config
            .stores
            .iter()
            .map(|s| (s.code.clone(), s.clone()))
            .collect();
        let default_store_id = by_code
            .get(&config.default_store)
            .map(|s| s.id)
            .unwrap_or(config.stores.first().map(|s| s.id).unwrap_or_default());

        Self {
            by_code,
            default_store_id,
        }
    }
}

impl StoreResolver for ConfiguredStores {
    fn resolve_store_id(&self, code: Option<&str>) -> Option<i64> {
        match code {
            None => Some(self.default_store_id),
            Some(code) => self.by_code.get(code).map(|s| s.id),
        }
    }

    fn is_cancellation_enabled(&self, store_id: i64) -> bool {
        self.by_code
            .values()
            .any(|s| s.id == store_id && s.cancellation_enabled)
    }
}
