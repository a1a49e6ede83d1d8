//! Transaction options, submission and confirmation monitoring.
//!
//! # Responsibilities
//! - Merge per-call options over the wrapper's defaults
//! - Apply sender and gas overrides to contract calls
//! - Submit built requests and hand back the transaction hash
//! - Poll receipts until the required confirmations are reached

use std::time::Duration;

use alloy::contract::{CallBuilder, CallDecoder};
use alloy::primitives::{Address, TxHash};
use alloy::providers::{DynProvider, Provider};
use alloy::rpc::types::TransactionRequest;
use tokio::time::{interval, timeout};

use crate::blockchain::client::{contract_call, rpc_call};
use crate::blockchain::types::{ConfirmationStatus, WethError, WethResult};
use crate::config::{ConfirmationConfig, TxDefaultsConfig};

/// Optional transaction overrides.
///
/// Used both as the wrapper-wide defaults and as per-call options; per-call
/// fields win over defaults field by field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TxOptions {
    /// Sender address.
    pub from: Option<Address>,
    /// Gas limit.
    pub gas: Option<u64>,
    /// Legacy gas price in wei.
    pub gas_price: Option<u128>,
}

/// Wrapper-wide transaction defaults.
pub type TxDefaults = TxOptions;

impl TxOptions {
    /// Reject overrides no node would accept.
    pub fn validate(&self) -> WethResult<()> {
        if self.gas == Some(0) {
            return Err(WethError::InvalidConfig("gas limit must be greater than 0".to_string()));
        }
        Ok(())
    }

    /// Fill unset fields from `defaults`.
    pub fn merged_over(&self, defaults: &TxOptions) -> TxOptions {
        TxOptions {
            from: self.from.or(defaults.from),
            gas: self.gas.or(defaults.gas),
            gas_price: self.gas_price.or(defaults.gas_price),
        }
    }

    /// Parse the `[tx_defaults]` section.
    pub fn from_config(config: &TxDefaultsConfig) -> WethResult<Self> {
        let from = config
            .from
            .as_deref()
            .map(|raw| {
                raw.parse::<Address>().map_err(|e| {
                    WethError::InvalidConfig(format!("Invalid tx_defaults.from '{}': {}", raw, e))
                })
            })
            .transpose()?;

        let options = Self {
            from,
            gas: config.gas,
            gas_price: config.gas_price,
        };
        options.validate()?;
        Ok(options)
    }
}

/// Fully resolved parameters for one transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxParams {
    pub from: Address,
    pub gas: Option<u64>,
    pub gas_price: Option<u128>,
}

impl TxParams {
    /// Resolve merged options, falling back to `default_sender` for `from`.
    pub fn resolve(options: &TxOptions, default_sender: Option<Address>) -> WethResult<Self> {
        let from = options.from.or(default_sender).ok_or(WethError::NoSender)?;
        Ok(Self {
            from,
            gas: options.gas,
            gas_price: options.gas_price,
        })
    }
}

/// Apply sender and gas overrides to a contract call.
pub(crate) fn apply<P, D>(call: CallBuilder<P, D>, params: &TxParams) -> CallBuilder<P, D>
where
    P: Provider,
    D: CallDecoder,
{
    let mut call = call.from(params.from);
    if let Some(gas) = params.gas {
        call = call.gas(gas);
    }
    if let Some(gas_price) = params.gas_price {
        call = call.gas_price(gas_price);
    }
    call
}

/// Submit a built request and return its transaction hash.
pub(crate) async fn send(
    provider: &DynProvider,
    request: TransactionRequest,
    method: &'static str,
    limit: Duration,
) -> WethResult<TxHash> {
    let pending = contract_call(limit, method, provider.send_transaction(request)).await?;
    let tx_hash = *pending.tx_hash();

    tracing::debug!(method, tx_hash = %tx_hash, "Transaction submitted");
    Ok(tx_hash)
}

/// Status of a mined transaction at `current_block`.
///
/// The block containing the transaction counts as its first confirmation.
pub fn confirmation_status(
    succeeded: bool,
    tx_block: u64,
    current_block: u64,
    required: u32,
) -> ConfirmationStatus {
    if !succeeded {
        return ConfirmationStatus::Failed("Transaction reverted".to_string());
    }

    let confirmations = current_block.saturating_sub(tx_block).saturating_add(1);
    let confirmations = u32::try_from(confirmations).unwrap_or(u32::MAX);
    if confirmations >= required {
        ConfirmationStatus::Confirmed { block_number: tx_block }
    } else {
        ConfirmationStatus::Confirming {
            current: confirmations,
            required,
        }
    }
}

/// Wait for a transaction to be mined and confirmed.
///
/// Returns `Confirmed` or `Failed`; gives up with
/// [`WethError::ConfirmationTimeout`] after `config.timeout_secs`.
pub async fn wait_for_confirmation(
    provider: &DynProvider,
    tx_hash: TxHash,
    config: &ConfirmationConfig,
    rpc_timeout: Duration,
) -> WethResult<ConfirmationStatus> {
    let required_confirmations = config.blocks;
    let timeout_duration = Duration::from_secs(config.timeout_secs);
    let poll_interval = Duration::from_millis(config.poll_interval_ms);

    let result = timeout(timeout_duration, async {
        let mut ticker = interval(poll_interval);

        loop {
            ticker.tick().await;

            let receipt = match rpc_call(
                rpc_timeout,
                "eth_getTransactionReceipt",
                provider.get_transaction_receipt(tx_hash),
            )
            .await?
            {
                Some(r) => r,
                None => {
                    tracing::debug!(tx_hash = %tx_hash, "Transaction pending");
                    continue;
                }
            };

            let current_block =
                rpc_call(rpc_timeout, "eth_blockNumber", provider.get_block_number()).await?;
            let tx_block = receipt.block_number.unwrap_or(current_block);

            match confirmation_status(receipt.status(), tx_block, current_block, required_confirmations) {
                ConfirmationStatus::Confirming { current, required } => {
                    tracing::debug!(
                        tx_hash = %tx_hash,
                        confirmations = current,
                        required = required,
                        "Waiting for confirmations"
                    );
                }
                status => return Ok(status),
            }
        }
    })
    .await;

    match result {
        Ok(status) => status,
        Err(_) => Err(WethError::ConfirmationTimeout(required_confirmations)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    const ALICE: Address = address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266");
    const BOB: Address = address!("70997970c51812dc3a010c7d01b50e0d17dc79c8");

    #[test]
    fn test_confirmation_status() {
        assert_eq!(
            confirmation_status(true, 100, 100, 1),
            ConfirmationStatus::Confirmed { block_number: 100 }
        );
        assert_eq!(
            confirmation_status(true, 100, 101, 3),
            ConfirmationStatus::Confirming { current: 2, required: 3 }
        );
        assert_eq!(
            confirmation_status(true, 100, 102, 3),
            ConfirmationStatus::Confirmed { block_number: 100 }
        );
        assert!(matches!(
            confirmation_status(false, 100, 200, 1),
            ConfirmationStatus::Failed(_)
        ));
    }

    #[test]
    fn test_merge_prefers_call_options() {
        let defaults = TxOptions {
            from: Some(ALICE),
            gas: Some(100_000),
            gas_price: Some(1_000_000_000),
        };
        let call = TxOptions {
            from: Some(BOB),
            gas: None,
            gas_price: Some(2_000_000_000),
        };
        let merged = call.merged_over(&defaults);
        assert_eq!(merged.from, Some(BOB));
        assert_eq!(merged.gas, Some(100_000));
        assert_eq!(merged.gas_price, Some(2_000_000_000));
    }

    #[test]
    fn test_resolve_sender() {
        let params = TxParams::resolve(&TxOptions::default(), Some(ALICE)).unwrap();
        assert_eq!(params.from, ALICE);

        let explicit = TxOptions { from: Some(BOB), ..TxOptions::default() };
        assert_eq!(TxParams::resolve(&explicit, Some(ALICE)).unwrap().from, BOB);

        let err = TxParams::resolve(&TxOptions::default(), None).unwrap_err();
        assert!(matches!(err, WethError::NoSender));
    }

    #[test]
    fn test_validate_rejects_zero_gas() {
        let options = TxOptions { gas: Some(0), ..TxOptions::default() };
        assert!(options.validate().is_err());
        assert!(TxOptions::default().validate().is_ok());
    }

    #[test]
    fn test_from_config() {
        let config = TxDefaultsConfig {
            from: Some("0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266".to_string()),
            gas: Some(50_000),
            gas_price: None,
        };
        let options = TxOptions::from_config(&config).unwrap();
        assert_eq!(options.from, Some(ALICE));
        assert_eq!(options.gas, Some(50_000));

        let bad = TxDefaultsConfig {
            from: Some("nope".to_string()),
            ..TxDefaultsConfig::default()
        };
        assert!(TxOptions::from_config(&bad).is_err());
    }
}
