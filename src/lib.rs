//! Convenience wrapper around the canonical WETH9 contract.
//!
//! Wrap and unwrap ether, read ether and WETH balances, and manage the
//! allowance of a spender contract over an `alloy` provider.

pub mod blockchain;
pub mod config;
pub mod contracts;
pub mod observability;
pub mod units;
pub mod weth;

pub use blockchain::{ConfirmationStatus, TxDefaults, TxOptions, WethError, WethResult};
pub use config::WrapperConfig;
pub use units::{from_base_units, to_base_units, IntoBaseUnits, DEFAULT_DECIMALS};
pub use weth::WethWrapper;
