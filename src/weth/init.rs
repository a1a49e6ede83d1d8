//! One-time resolution of network-derived state.
//!
//! The wrapper builds a single shared future at construction. Every public
//! operation awaits a clone of it, so concurrent callers fan in on the same
//! in-flight lookup and it runs at most once. The contract bindings are
//! built here too. The outcome, success or failure, is then fixed for the
//! lifetime of the wrapper.

use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::Address;
use alloy::providers::{DynProvider, Provider};
use futures_util::future::{BoxFuture, FutureExt, Shared};

use crate::blockchain::client::rpc_call;
use crate::blockchain::types::{ChainId, NetworkState, WethError, WethResult};
use crate::contracts::abi::IWETH9;
use crate::contracts::addresses;
use crate::contracts::token::Erc20Token;
use crate::observability::metrics;

/// Shared handle to the initialization outcome.
pub(crate) type Initialization = Shared<BoxFuture<'static, WethResult<Arc<Ready>>>>;

/// Network state plus the bindings for the resolved WETH contract.
pub(crate) struct Ready {
    pub network: Arc<NetworkState>,
    pub weth: IWETH9::IWETH9Instance<DynProvider>,
    pub token: Erc20Token,
}

/// Inputs to initialization, captured at construction.
#[derive(Clone)]
pub(crate) struct InitParams {
    pub provider: DynProvider,
    pub rpc_timeout: Duration,
    pub expected_chain_id: Option<u64>,
    pub weth_address: Option<Address>,
    pub spender_address: Option<Address>,
    /// Sender known without asking the node: `tx_defaults.from`, then the local signer.
    pub known_sender: Option<Address>,
}

/// Build the initialization future. Nothing runs until it is first polled.
pub(crate) fn initialization(params: InitParams) -> Initialization {
    async move {
        let result = resolve(&params).await;
        metrics::record_init(&result);
        match &result {
            Ok(state) => tracing::info!(
                chain_id = %state.chain_id,
                weth = %state.weth_address,
                spender = ?state.spender_address,
                default_sender = ?state.default_sender,
                "WETH wrapper ready"
            ),
            Err(e) => tracing::error!(error = %e, "WETH wrapper initialization failed"),
        }
        result.map(|network| {
            Arc::new(Ready {
                weth: IWETH9::new(network.weth_address, params.provider.clone()),
                token: Erc20Token::new(network.weth_address, params.provider.clone(), params.rpc_timeout),
                network: Arc::new(network),
            })
        })
    }
    .boxed()
    .shared()
}

async fn resolve(params: &InitParams) -> WethResult<NetworkState> {
    let limit = params.rpc_timeout;
    let chain_id = rpc_call(limit, "eth_chainId", params.provider.get_chain_id()).await?;

    if let Some(expected) = params.expected_chain_id {
        if expected != chain_id {
            return Err(WethError::ChainMismatch {
                expected,
                actual: chain_id,
            });
        }
    }

    let weth_address = params
        .weth_address
        .or_else(|| addresses::weth_address(chain_id))
        .ok_or(WethError::UnsupportedNetwork(chain_id))?;
    let spender_address = params
        .spender_address
        .or_else(|| addresses::spender_address(chain_id));

    let default_sender = match params.known_sender {
        Some(sender) => Some(sender),
        None => {
            let accounts = rpc_call(limit, "eth_accounts", params.provider.get_accounts()).await?;
            accounts.first().copied()
        }
    };

    Ok(NetworkState {
        chain_id: ChainId(chain_id),
        weth_address,
        spender_address,
        default_sender,
    })
}
