//! Chain-specific types and error definitions.

use std::time::Duration;

use alloy::primitives::Address;
use thiserror::Error;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors surfaced by the wrapper.
///
/// Every message starts with the same `WethWrapper error:` prefix followed by
/// the underlying cause.
#[derive(Debug, Clone, Error)]
pub enum WethError {
    /// Amount is negative, fractional, non-numeric or out of range.
    #[error("WethWrapper error: invalid amount: {0}")]
    InvalidAmount(String),

    /// Constructor arguments or configuration rejected.
    #[error("WethWrapper error: invalid configuration: {0}")]
    InvalidConfig(String),

    /// No WETH address is known for the connected network.
    #[error("WethWrapper error: no WETH contract known for network {0}")]
    UnsupportedNetwork(u64),

    /// No spender address is known for the connected network.
    #[error("WethWrapper error: no spender configured for network {0}")]
    NoSpender(u64),

    /// Chain configuration mismatch.
    #[error("WethWrapper error: chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },

    /// No address was passed and no default sender could be resolved.
    #[error("WethWrapper error: no address given and no default sender available")]
    NoSender,

    /// RPC connection or request failed.
    #[error("WethWrapper error: RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("WethWrapper error: RPC timeout after {0:?}")]
    Timeout(Duration),

    /// Contract call or transaction submission failed.
    #[error("WethWrapper error: contract call failed: {0}")]
    Contract(String),

    /// Invalid private key format or signing error.
    #[error("WethWrapper error: wallet error: {0}")]
    Wallet(String),

    /// Transaction was not confirmed within expected time.
    #[error("WethWrapper error: transaction not confirmed after {0} blocks")]
    ConfirmationTimeout(u32),
}

/// Result type for wrapper operations.
pub type WethResult<T> = Result<T, WethError>;

/// Transaction confirmation status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationStatus {
    /// Transaction has been mined but not enough confirmations.
    Confirming { current: u32, required: u32 },
    /// Transaction is confirmed with required block depth.
    Confirmed { block_number: u64 },
    /// Transaction was mined but reverted.
    Failed(String),
}

/// Network-derived state resolved once during initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkState {
    /// Chain the provider is connected to.
    pub chain_id: ChainId,
    /// Canonical WETH9 contract on this chain.
    pub weth_address: Address,
    /// Contract allowed to move WETH on the owner's behalf, if known.
    pub spender_address: Option<Address>,
    /// Address used when a call omits one.
    pub default_sender: Option<Address>,
}

impl NetworkState {
    /// Default sender or [`WethError::NoSender`].
    pub fn sender(&self) -> WethResult<Address> {
        self.default_sender.ok_or(WethError::NoSender)
    }

    /// Spender address or [`WethError::NoSpender`].
    pub fn spender(&self) -> WethResult<Address> {
        self.spender_address.ok_or(WethError::NoSpender(self.chain_id.0))
    }
}
