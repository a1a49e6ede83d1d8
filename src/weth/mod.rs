//! WETH wrapper.
//!
//! # Lifecycle
//! ```text
//! WethWrapper::new / builder / from_config   (validate only)
//!     → first operation polls init.rs          (chain ID, addresses, sender)
//!     → every operation awaits the same result
//!     → wrapper.rs validates input, then delegates to contracts/
//! ```

pub mod events;
mod init;
pub mod wrapper;

pub use events::{WethEvent, WethLog};
pub use wrapper::{WethWrapper, WethWrapperBuilder, DEFAULT_RPC_TIMEOUT, UNLIMITED_ALLOWANCE};
