//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the wrapper and its CLI.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct WrapperConfig {
    /// JSON-RPC connection settings.
    pub rpc: RpcConfig,

    /// Contract address overrides.
    pub contracts: ContractsConfig,

    /// Defaults applied to every transaction.
    pub tx_defaults: TxDefaultsConfig,

    /// Confirmation polling settings.
    pub confirmations: ConfirmationConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// JSON-RPC connection settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RpcConfig {
    /// JSON-RPC endpoint URL.
    pub url: String,

    /// RPC request timeout in seconds.
    pub timeout_secs: u64,

    /// Expected chain ID. Initialization fails if the node reports another.
    pub chain_id: Option<u64>,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8545".to_string(),
            timeout_secs: 10,
            chain_id: None,
        }
    }
}

/// Contract addresses that take precedence over the built-in tables.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ContractsConfig {
    /// WETH9 contract address.
    pub weth_address: Option<String>,

    /// Spender (asset proxy) address used for allowances.
    pub spender_address: Option<String>,
}

/// Transaction defaults, all optional.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TxDefaultsConfig {
    /// Sender address.
    pub from: Option<String>,

    /// Gas limit.
    pub gas: Option<u64>,

    /// Legacy gas price in wei.
    pub gas_price: Option<u128>,
}

/// Confirmation polling settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConfirmationConfig {
    /// Number of block confirmations required for finality.
    pub blocks: u32,

    /// Receipt polling interval in milliseconds.
    pub poll_interval_ms: u64,

    /// Give up waiting after this many seconds.
    pub timeout_secs: u64,
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            blocks: 1,
            poll_interval_ms: 2000,
            timeout_secs: 120,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WrapperConfig::default();
        assert_eq!(config.rpc.url, "http://localhost:8545");
        assert_eq!(config.rpc.timeout_secs, 10);
        assert!(config.rpc.chain_id.is_none());
        assert!(config.contracts.weth_address.is_none());
        assert_eq!(config.confirmations.blocks, 1);
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_partial_toml() {
        let config: WrapperConfig = toml::from_str(
            r#"
            [rpc]
            url = "http://node:8545"
            chain_id = 11155111

            [tx_defaults]
            gas = 60000
            "#,
        )
        .unwrap();
        assert_eq!(config.rpc.url, "http://node:8545");
        assert_eq!(config.rpc.timeout_secs, 10);
        assert_eq!(config.rpc.chain_id, Some(11155111));
        assert_eq!(config.tx_defaults.gas, Some(60000));
        assert!(config.tx_defaults.from.is_none());
    }
}
