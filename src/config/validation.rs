//! Configuration validation.
//!
//! Serde handles syntax; this module checks values. Every problem is
//! reported, not just the first.

use alloy::primitives::Address;

use crate::config::schema::WrapperConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    /// What is wrong with it.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validate a parsed configuration.
pub fn validate_config(config: &WrapperConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = config.rpc.url.parse::<url::Url>() {
        errors.push(ValidationError {
            field: "rpc.url",
            message: format!("invalid URL '{}': {}", config.rpc.url, e),
        });
    }
    if config.rpc.timeout_secs == 0 {
        errors.push(ValidationError {
            field: "rpc.timeout_secs",
            message: "must be greater than 0".to_string(),
        });
    }

    check_address(&mut errors, "contracts.weth_address", &config.contracts.weth_address);
    check_address(&mut errors, "contracts.spender_address", &config.contracts.spender_address);
    check_address(&mut errors, "tx_defaults.from", &config.tx_defaults.from);

    if config.tx_defaults.gas == Some(0) {
        errors.push(ValidationError {
            field: "tx_defaults.gas",
            message: "must be greater than 0".to_string(),
        });
    }
    if config.confirmations.poll_interval_ms == 0 {
        errors.push(ValidationError {
            field: "confirmations.poll_interval_ms",
            message: "must be greater than 0".to_string(),
        });
    }
    if config.confirmations.timeout_secs == 0 {
        errors.push(ValidationError {
            field: "confirmations.timeout_secs",
            message: "must be greater than 0".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &Option<String>) {
    if let Some(raw) = value {
        if let Err(e) = raw.parse::<Address>() {
            errors.push(ValidationError {
                field,
                message: format!("invalid address '{}': {}", raw, e),
            });
        }
    }
}
