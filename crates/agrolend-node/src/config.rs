//! Node configuration loading and management.
//!
//! Everything except secrets lives in a TOML file; the admin private key and
//! the Paystack secret key are read from the environment at startup and never
//! written to disk.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use agrolend_core::{TokenInfo, TokenRegistry};

/// Full configuration for the AgroLend settlement node.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NodeConfig {
    /// HTTP API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Chain RPC settings.
    #[serde(default)]
    pub chain: ChainConfig,

    /// Paystack settings (secret key comes from the environment).
    #[serde(default)]
    pub paystack: PaystackConfig,

    /// Storage settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Token/pool registry override. Empty means the default deployment.
    #[serde(default)]
    pub tokens: Vec<TokenInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API listen address.
    #[serde(default = "default_api_addr")]
    pub listen_addr: String,
    /// API port.
    #[serde(default = "default_api_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    /// HTTP JSON-RPC endpoint.
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    /// Seconds to wait for a transaction receipt.
    #[serde(default = "default_receipt_timeout_secs")]
    pub receipt_timeout_secs: u64,
    /// Confirmations required before a transaction counts as mined.
    #[serde(default = "default_confirmations")]
    pub confirmations: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaystackConfig {
    /// Paystack API base URL.
    #[serde(default = "default_paystack_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path to the data directory.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (text, json).
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_api_addr() -> String {
    "127.0.0.1".into()
}
fn default_api_port() -> u16 {
    8080
}
fn default_rpc_url() -> String {
    "http://127.0.0.1:8545".into()
}
fn default_receipt_timeout_secs() -> u64 {
    60
}
fn default_confirmations() -> u64 {
    1
}
fn default_paystack_base_url() -> String {
    agrolend_provider::DEFAULT_BASE_URL.into()
}
fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}
fn default_log_level() -> String {
    "info".into()
}
fn default_log_format() -> String {
    "text".into()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_api_addr(),
            port: default_api_port(),
        }
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            receipt_timeout_secs: default_receipt_timeout_secs(),
            confirmations: default_confirmations(),
        }
    }
}

impl Default for PaystackConfig {
    fn default() -> Self {
        Self {
            base_url: default_paystack_base_url(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl NodeConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            let config: NodeConfig = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save the current config to a TOML file.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// The token registry this node settles against.
    pub fn registry(&self) -> TokenRegistry {
        if self.tokens.is_empty() {
            TokenRegistry::default()
        } else {
            TokenRegistry::new(self.tokens.clone())
        }
    }

    /// The socket address the API binds.
    pub fn api_addr(&self) -> String {
        format!("{}:{}", self.api.listen_addr, self.api.port)
    }
}
