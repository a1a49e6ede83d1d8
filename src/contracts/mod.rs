//! Contract bindings and addresses.
//!
//! # Data Flow
//! ```text
//! abi.rs       (sol! bindings for WETH9 and ERC-20)
//! addresses.rs (per-chain WETH / spender table)
//!     → token.rs (ERC-20 reads and approvals)
//!     → weth::WethWrapper (deposit / withdraw)
//! ```

pub mod abi;
pub mod addresses;
pub mod token;

pub use abi::{IERC20, IWETH9};
pub use token::Erc20Token;
