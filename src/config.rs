use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

// ============================================================================
// Application Configuration
// ============================================================================
//
// Loaded from the YAML file named by ORDER_CANCELLATION_CONFIG, falling back
// to development defaults when the variable is unset.
//
// ============================================================================

pub const CONFIG_ENV_VAR: &str = "ORDER_CANCELLATION_CONFIG";

/// Key used when none is configured. Development only.
const DEV_SECRET_KEY_HEX: &str =
    "0101010101010101010101010101010101010101010101010101010101010101";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("At least one store must be configured")]
    NoStores,

    #[error("Duplicate store {0}")]
    DuplicateStore(String),

    #[error("Default store '{0}' is not configured")]
    UnknownDefaultStore(String),

    #[error("Token secret key must be 64 hex characters")]
    InvalidSecretKey,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub token: TokenConfig,
    pub stores: Vec<StoreConfig>,
    pub default_store: String,
    pub log_filter: String,
    /// Seed a few sample orders at startup
    pub demo_data: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TokenConfig {
    pub secret_key_hex: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StoreConfig {
    pub id: i64,
    pub code: String,
    #[serde(default = "enabled_by_default")]
    pub cancellation_enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            token: TokenConfig::default(),
            stores: vec![StoreConfig {
                id: 1,
                code: "default".to_string(),
                cancellation_enabled: true,
            }],
            default_store: "default".to_string(),
            log_filter: "info,order_cancellation=debug".to_string(),
            demo_data: false,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret_key_hex: DEV_SECRET_KEY_HEX.to_string(),
        }
    }
}

impl AppConfig {
    /// Load from the file named by the environment, or use defaults
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) => Self::from_file(&path),
            Err(_) => {
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stores.is_empty() {
            return Err(ConfigError::NoStores);
        }

        let mut ids = HashSet::new();
        let mut codes = HashSet::new();
        for store in &self.stores {
            if !ids.insert(store.id) {
                return Err(ConfigError::DuplicateStore(store.id.to_string()));
            }
            if !codes.insert(store.code.as_str()) {
                return Err(ConfigError::DuplicateStore(store.code.clone()));
            }
        }

        if !codes.contains(self.default_store.as_str()) {
            return Err(ConfigError::UnknownDefaultStore(self.default_store.clone()));
        }

        let key = self.token.secret_key_hex.trim();
        if key.len() != 64 || !key.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ConfigError::InvalidSecretKey);
        }

        Ok(())
    }

    pub fn uses_dev_secret_key(&self) -> bool {
        self.token.secret_key_hex.trim() == DEV_SECRET_KEY_HEX
    }
}
