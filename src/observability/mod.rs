//! Observability.
//!
//! # Data Flow
//! ```text
//! weth / contracts / blockchain
//!     → tracing events (logging.rs installs the subscriber in the binary)
//!     → metrics counters (metrics.rs)
//! ```

pub mod logging;
pub mod metrics;
