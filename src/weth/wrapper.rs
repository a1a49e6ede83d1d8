//! WETH9 wrapper: wrap, unwrap, balances and spender allowance.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::{DynProvider, Provider};
use alloy::rpc::types::{Filter, TransactionRequest};

use crate::blockchain::client::{self, rpc_call};
use crate::blockchain::transaction::{self, TxDefaults, TxOptions, TxParams};
use crate::blockchain::types::{ConfirmationStatus, NetworkState, WethError, WethResult};
use crate::blockchain::wallet::Wallet;
use crate::config::{ConfirmationConfig, WrapperConfig};
use crate::observability::metrics;
use crate::units::IntoBaseUnits;
use crate::weth::events::{self, WethLog};
use crate::weth::init::{self, InitParams, Initialization, Ready};

/// Allowance treated as unlimited by the spender.
pub const UNLIMITED_ALLOWANCE: U256 = U256::MAX;

/// Default bound on each RPC call.
pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(10);

/// Convenience wrapper around the canonical WETH9 contract.
///
/// Construction only validates its arguments. Network lookups (chain ID,
/// contract addresses, default sender) and contract binding happen once, the
/// first time any operation runs; every clone of the wrapper shares that
/// result.
#[derive(Clone)]
pub struct WethWrapper {
    provider: DynProvider,
    tx_defaults: TxDefaults,
    rpc_timeout: Duration,
    confirmations: ConfirmationConfig,
    init: Initialization,
}

/// Builder for [`WethWrapper`] with optional overrides.
pub struct WethWrapperBuilder {
    provider: DynProvider,
    tx_defaults: TxDefaults,
    rpc_timeout: Duration,
    confirmations: ConfirmationConfig,
    expected_chain_id: Option<u64>,
    weth_address: Option<Address>,
    spender_address: Option<Address>,
    signer: Option<Address>,
}

impl WethWrapperBuilder {
    /// Transaction defaults applied to every write.
    pub fn tx_defaults(mut self, tx_defaults: TxDefaults) -> Self {
        self.tx_defaults = tx_defaults;
        self
    }

    /// Bound on each RPC call.
    pub fn rpc_timeout(mut self, rpc_timeout: Duration) -> Self {
        self.rpc_timeout = rpc_timeout;
        self
    }

    /// Receipt polling settings for [`WethWrapper::await_transaction_mined`].
    pub fn confirmations(mut self, confirmations: ConfirmationConfig) -> Self {
        self.confirmations = confirmations;
        self
    }

    /// Fail initialization unless the node reports this chain.
    pub fn expected_chain_id(mut self, chain_id: u64) -> Self {
        self.expected_chain_id = Some(chain_id);
        self
    }

    /// Use this WETH contract instead of the built-in table.
    pub fn weth_address(mut self, address: Address) -> Self {
        self.weth_address = Some(address);
        self
    }

    /// Use this spender instead of the built-in table.
    pub fn spender_address(mut self, address: Address) -> Self {
        self.spender_address = Some(address);
        self
    }

    /// Address of the local signer attached to the provider.
    pub fn signer(mut self, address: Address) -> Self {
        self.signer = Some(address);
        self
    }

    /// Validate and build. Does not touch the network.
    pub fn build(self) -> WethResult<WethWrapper> {
        self.tx_defaults.validate()?;
        if self.rpc_timeout.is_zero() {
            return Err(WethError::InvalidConfig("RPC timeout must be greater than 0".to_string()));
        }
        if self.confirmations.poll_interval_ms == 0 {
            return Err(WethError::InvalidConfig(
                "confirmation poll interval must be greater than 0".to_string(),
            ));
        }

        let init = init::initialization(InitParams {
            provider: self.provider.clone(),
            rpc_timeout: self.rpc_timeout,
            expected_chain_id: self.expected_chain_id,
            weth_address: self.weth_address,
            spender_address: self.spender_address,
            known_sender: self.tx_defaults.from.or(self.signer),
        });

        Ok(WethWrapper {
            provider: self.provider,
            tx_defaults: self.tx_defaults,
            rpc_timeout: self.rpc_timeout,
            confirmations: self.confirmations,
            init,
        })
    }
}

/// Run one public operation, recording its outcome.
async fn observed<T>(op: &'static str, fut: impl Future<Output = WethResult<T>>) -> WethResult<T> {
    let result = fut.await;
    metrics::record_call(op, &result);
    if let Err(e) = &result {
        tracing::debug!(op, error = %e, "Operation failed");
    }
    result
}

impl WethWrapper {
    /// Wrapper over `provider` with the given transaction defaults.
    pub fn new(provider: DynProvider, tx_defaults: TxDefaults) -> WethResult<Self> {
        Self::builder(provider).tx_defaults(tx_defaults).build()
    }

    /// Start a builder over `provider`.
    pub fn builder(provider: DynProvider) -> WethWrapperBuilder {
        WethWrapperBuilder {
            provider,
            tx_defaults: TxDefaults::default(),
            rpc_timeout: DEFAULT_RPC_TIMEOUT,
            confirmations: ConfirmationConfig::default(),
            expected_chain_id: None,
            weth_address: None,
            spender_address: None,
            signer: None,
        }
    }

    /// Connect to `config.rpc.url` and build a wrapper from a loaded config.
    ///
    /// The signing key, if any, comes from `WETH_WRAPPER_PRIVATE_KEY`.
    pub fn from_config(config: &WrapperConfig) -> WethResult<Self> {
        let wallet = Wallet::from_env()?;
        let provider = client::connect(&config.rpc, wallet.as_ref())?;

        let mut builder = Self::builder(provider)
            .tx_defaults(TxOptions::from_config(&config.tx_defaults)?)
            .rpc_timeout(Duration::from_secs(config.rpc.timeout_secs))
            .confirmations(config.confirmations.clone());

        if let Some(chain_id) = config.rpc.chain_id {
            builder = builder.expected_chain_id(chain_id);
        }
        if let Some(raw) = &config.contracts.weth_address {
            builder = builder.weth_address(parse_address("contracts.weth_address", raw)?);
        }
        if let Some(raw) = &config.contracts.spender_address {
            builder = builder.spender_address(parse_address("contracts.spender_address", raw)?);
        }
        if let Some(wallet) = &wallet {
            builder = builder.signer(wallet.address());
        }

        builder.build()
    }

    /// Await initialization and return the network-derived state.
    pub async fn network(&self) -> WethResult<Arc<NetworkState>> {
        Ok(self.ready().await?.network.clone())
    }

    /// Whether initialization has completed successfully.
    pub fn is_ready(&self) -> bool {
        matches!(self.init.peek(), Some(Ok(_)))
    }

    /// Address of the WETH contract on the connected network.
    pub async fn weth_address(&self) -> WethResult<Address> {
        Ok(self.network().await?.weth_address)
    }

    /// Wrap `amount` wei into WETH by calling `deposit()` with it as value.
    pub async fn wrap(&self, amount: impl IntoBaseUnits, options: Option<TxOptions>) -> WethResult<TxHash> {
        let amount = amount.into_base_units();
        observed("wrap", async {
            let amount = amount?;
            let request = self.wrap_request(amount, options).await?;
            let tx_hash = transaction::send(&self.provider, request, "deposit", self.rpc_timeout).await?;

            tracing::info!(amount = %amount, tx_hash = %tx_hash, "Wrapped ether");
            Ok(tx_hash)
        })
        .await
    }

    /// Unwrap `amount` WETH back into ether by calling `withdraw(amount)`.
    pub async fn unwrap(&self, amount: impl IntoBaseUnits, options: Option<TxOptions>) -> WethResult<TxHash> {
        let amount = amount.into_base_units();
        observed("unwrap", async {
            let amount = amount?;
            let request = self.unwrap_request(amount, options).await?;
            let tx_hash = transaction::send(&self.provider, request, "withdraw", self.rpc_timeout).await?;

            tracing::info!(amount = %amount, tx_hash = %tx_hash, "Unwrapped ether");
            Ok(tx_hash)
        })
        .await
    }

    /// Ether balance of `address`, or of the default sender.
    pub async fn get_ether_balance(&self, address: Option<Address>) -> WethResult<U256> {
        observed("get_ether_balance", async {
            let network = self.network().await?;
            let owner = address.map_or_else(|| network.sender(), Ok)?;
            rpc_call(self.rpc_timeout, "eth_getBalance", self.provider.get_balance(owner)).await
        })
        .await
    }

    /// WETH balance of `address`, or of the default sender.
    pub async fn get_weth_balance(&self, address: Option<Address>) -> WethResult<U256> {
        observed("get_weth_balance", async {
            let ready = self.ready().await?;
            let owner = address.map_or_else(|| ready.network.sender(), Ok)?;
            ready.token.balance_of(owner).await
        })
        .await
    }

    /// WETH the spender may move on behalf of `owner`, or of the default sender.
    pub async fn get_proxy_allowance(&self, owner: Option<Address>) -> WethResult<U256> {
        observed("get_proxy_allowance", async {
            let ready = self.ready().await?;
            let spender = ready.network.spender()?;
            let owner = owner.map_or_else(|| ready.network.sender(), Ok)?;
            ready.token.allowance(owner, spender).await
        })
        .await
    }

    /// Allow the spender to move `amount` WETH from the sender.
    pub async fn set_proxy_allowance(
        &self,
        amount: impl IntoBaseUnits,
        options: Option<TxOptions>,
    ) -> WethResult<TxHash> {
        let amount = amount.into_base_units();
        observed("set_proxy_allowance", async {
            let request = self.allowance_request(amount?, options).await?;
            self.submit_approval(request).await
        })
        .await
    }

    /// Allow the spender to move any amount of WETH from the sender.
    pub async fn set_unlimited_proxy_allowance(&self, options: Option<TxOptions>) -> WethResult<TxHash> {
        observed("set_unlimited_proxy_allowance", async {
            let request = self.unlimited_allowance_request(options).await?;
            self.submit_approval(request).await
        })
        .await
    }

    /// Wait until `tx_hash` is mined with the configured number of confirmations.
    pub async fn await_transaction_mined(&self, tx_hash: TxHash) -> WethResult<ConfirmationStatus> {
        observed("await_transaction_mined", async {
            self.network().await?;
            transaction::wait_for_confirmation(&self.provider, tx_hash, &self.confirmations, self.rpc_timeout)
                .await
        })
        .await
    }

    /// Decoded WETH events between `from_block` and `to_block` (latest if `None`).
    pub async fn get_logs(&self, from_block: u64, to_block: Option<u64>) -> WethResult<Vec<WethLog>> {
        observed("get_logs", async {
            let network = self.network().await?;

            let mut filter = Filter::new()
                .address(network.weth_address)
                .event_signature(events::event_signatures())
                .from_block(from_block);
            if let Some(to_block) = to_block {
                filter = filter.to_block(to_block);
            }

            let logs = rpc_call(self.rpc_timeout, "eth_getLogs", self.provider.get_logs(&filter)).await?;
            Ok(logs.iter().filter_map(events::decode_log).collect())
        })
        .await
    }

    async fn wrap_request(&self, amount: U256, options: Option<TxOptions>) -> WethResult<TransactionRequest> {
        let (ready, params) = self.prepare(options).await?;
        let request = transaction::apply(ready.weth.deposit().value(amount), &params).into_transaction_request();
        Ok(request)
    }

    async fn unwrap_request(&self, amount: U256, options: Option<TxOptions>) -> WethResult<TransactionRequest> {
        let (ready, params) = self.prepare(options).await?;
        let request = transaction::apply(ready.weth.withdraw(amount), &params).into_transaction_request();
        Ok(request)
    }

    async fn allowance_request(&self, amount: U256, options: Option<TxOptions>) -> WethResult<TransactionRequest> {
        let (ready, params) = self.prepare(options).await?;
        let spender = ready.network.spender()?;
        Ok(ready.token.approve_request(spender, amount, &params))
    }

    async fn unlimited_allowance_request(&self, options: Option<TxOptions>) -> WethResult<TransactionRequest> {
        self.allowance_request(UNLIMITED_ALLOWANCE, options).await
    }

    async fn submit_approval(&self, request: TransactionRequest) -> WethResult<TxHash> {
        let tx_hash = transaction::send(&self.provider, request, "approve", self.rpc_timeout).await?;
        tracing::info!(tx_hash = %tx_hash, "Allowance set");
        Ok(tx_hash)
    }

    /// Validate call options, await initialization and resolve the sender.
    async fn prepare(&self, options: Option<TxOptions>) -> WethResult<(Arc<Ready>, TxParams)> {
        let options = options.unwrap_or_default();
        options.validate()?;
        let ready = self.ready().await?;
        let params = TxParams::resolve(&options.merged_over(&self.tx_defaults), ready.network.default_sender)?;
        Ok((ready, params))
    }

    async fn ready(&self) -> WethResult<Arc<Ready>> {
        self.init.clone().await
    }
}

impl std::fmt::Debug for WethWrapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WethWrapper")
            .field("tx_defaults", &self.tx_defaults)
            .field("rpc_timeout", &self.rpc_timeout)
            .field("ready", &self.is_ready())
            .finish()
    }
}

fn parse_address(field: &str, raw: &str) -> WethResult<Address> {
    raw.parse()
        .map_err(|e| WethError::InvalidConfig(format!("Invalid {} '{}': {}", field, raw, e)))
}
