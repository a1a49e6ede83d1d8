//! Blockchain plumbing shared by the contract wrappers.
//!
//! # Data Flow
//! ```text
//! Environment Variables (private key)  →  wallet.rs
//! Config (RPC URL, timeout)            →  client.rs (provider, bounded calls)
//! Call options + defaults              →  transaction.rs (apply, send, confirm)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts

pub mod client;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use transaction::{TxDefaults, TxOptions};
pub use types::{ChainId, ConfirmationStatus, NetworkState, WethError, WethResult};
pub use wallet::Wallet;
