//! Provider construction and bounded RPC calls.
//!
//! # Responsibilities
//! - Connect to the JSON-RPC endpoint, optionally with a local signer
//! - Bound every delegated call with the configured timeout
//! - Map transport and contract failures onto `WethError`

use std::fmt::Display;
use std::future::IntoFuture;
use std::time::Duration;

use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use tokio::time::timeout;

use crate::blockchain::types::{WethError, WethResult};
use crate::blockchain::wallet::Wallet;
use crate::config::RpcConfig;

/// Connect an HTTP provider for `config.url`.
///
/// With a wallet, transactions are signed locally and sent raw. Without one
/// they go out as `eth_sendTransaction` and the node signs with an unlocked
/// account.
pub fn connect(config: &RpcConfig, wallet: Option<&Wallet>) -> WethResult<DynProvider> {
    let url: url::Url = config.url.parse().map_err(|e| {
        WethError::InvalidConfig(format!("Invalid RPC URL '{}': {}", config.url, e))
    })?;

    let provider = match wallet {
        Some(wallet) => ProviderBuilder::new()
            .wallet(wallet.to_network_wallet())
            .connect_http(url)
            .erased(),
        None => ProviderBuilder::new().connect_http(url).erased(),
    };

    tracing::info!(
        rpc_url = %config.url,
        local_signer = wallet.is_some(),
        "Provider connected"
    );

    Ok(provider)
}

/// Await an RPC request, failing with [`WethError::Rpc`] or [`WethError::Timeout`].
pub(crate) async fn rpc_call<T, E, F>(limit: Duration, method: &'static str, fut: F) -> WethResult<T>
where
    F: IntoFuture<Output = Result<T, E>>,
    E: Display,
{
    bounded(limit, method, fut, WethError::Rpc).await
}

/// Await a contract call or submission, failing with [`WethError::Contract`] or
/// [`WethError::Timeout`].
pub(crate) async fn contract_call<T, E, F>(limit: Duration, method: &'static str, fut: F) -> WethResult<T>
where
    F: IntoFuture<Output = Result<T, E>>,
    E: Display,
{
    bounded(limit, method, fut, WethError::Contract).await
}

async fn bounded<T, E, F>(
    limit: Duration,
    method: &'static str,
    fut: F,
    wrap: fn(String) -> WethError,
) -> WethResult<T>
where
    F: IntoFuture<Output = Result<T, E>>,
    E: Display,
{
    match timeout(limit, fut).await {
        Ok(Ok(result)) => Ok(result),
        Ok(Err(e)) => {
            tracing::warn!(method, error = %e, "RPC error");
            Err(wrap(format!("{}: {}", method, e)))
        }
        Err(_) => {
            tracing::warn!(method, "RPC timeout");
            Err(WethError::Timeout(limit))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_rejects_bad_url() {
        let config = RpcConfig {
            url: "not a url".to_string(),
            ..RpcConfig::default()
        };
        let err = connect(&config, None).unwrap_err();
        assert!(matches!(err, WethError::InvalidConfig(_)));
        assert!(err.to_string().contains("Invalid RPC URL"));
    }

    #[test]
    fn test_connect_is_lazy() {
        // Nothing listens here; building the provider must not touch the network.
        let config = RpcConfig {
            url: "http://127.0.0.1:1".to_string(),
            ..RpcConfig::default()
        };
        assert!(connect(&config, None).is_ok());
    }

    #[tokio::test]
    async fn test_rpc_call_maps_errors() {
        let err = rpc_call(Duration::from_secs(1), "eth_chainId", async {
            Err::<u64, _>("connection refused")
        })
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "WethWrapper error: RPC error: eth_chainId: connection refused");

        let err = contract_call(Duration::from_secs(1), "deposit", async {
            Err::<u64, _>("execution reverted")
        })
        .await
        .unwrap_err();
        assert!(matches!(err, WethError::Contract(_)));
    }

    #[tokio::test]
    async fn test_rpc_call_times_out() {
        let err = rpc_call(Duration::from_millis(20), "eth_getBalance", async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<u64, String>(1)
        })
        .await
        .unwrap_err();
        assert!(matches!(err, WethError::Timeout(limit) if limit == Duration::from_millis(20)));
        assert_eq!(err.to_string(), "WethWrapper error: RPC timeout after 20ms");
    }
}
