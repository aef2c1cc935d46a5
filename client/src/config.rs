//! Client configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

fn default_commitment() -> String {
    "confirmed".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// RPC URL for the Solana cluster
    pub rpc_url: String,

    /// Payer wallet keypair path
    pub keypair_path: String,

    /// Commitment level used for sending and confirming transactions
    #[serde(default = "default_commitment")]
    pub commitment: String,

    /// Abort an RPC request which has not completed after this many seconds.
    ///
    /// An unreachable or misconfigured endpoint fails observably instead of hanging.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl ClientConfig {
    /// Create a configuration from its two mandatory options
    pub fn new(rpc_url: impl Into<String>, keypair_path: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            keypair_path: keypair_path.into(),
            commitment: default_commitment(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }

    /// Load configuration from a TOML file
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("ORDERBOOK_CONFIG")
            .unwrap_or_else(|_| "orderbook-config.toml".to_string());

        let config_str = std::fs::read_to_string(&config_path)
            .context(format!("Failed to read config file: {}", config_path))?;

        let config: ClientConfig =
            toml::from_str(&config_str).context("Failed to parse config TOML")?;

        Ok(config)
    }

    /// Create default configuration
    pub fn default_devnet() -> Self {
        Self::new(
            "https://api.devnet.solana.com",
            "~/.config/solana/id.json",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_creation() {
        let config = ClientConfig::default_devnet();
        assert_eq!(config.rpc_url, "https://api.devnet.solana.com");
        assert_eq!(config.commitment, "confirmed");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_optional_fields_default() {
        let config: ClientConfig = toml::from_str(
            r#"
            rpc_url = "http://localhost:8899"
            keypair_path = "/tmp/id.json"
            "#,
        )
        .unwrap();
        assert_eq!(config.rpc_url, "http://localhost:8899");
        assert_eq!(config.commitment, "confirmed");
        assert_eq!(config.request_timeout_secs, 30);

        let config: ClientConfig = toml::from_str(
            r#"
            rpc_url = "http://localhost:8899"
            keypair_path = "/tmp/id.json"
            commitment = "finalized"
            request_timeout_secs = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.commitment, "finalized");
        assert_eq!(config.request_timeout_secs, 5);
    }
}
