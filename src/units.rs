//! Base-unit conversion and amount validation.
//!
//! Amounts handed to contract calls are `U256` base units (wei). Anything
//! else has to pass through [`IntoBaseUnits`] first, which is where negative,
//! fractional, non-numeric and out-of-range input is rejected.

use alloy::primitives::utils::format_units;
use alloy::primitives::U256;

use crate::blockchain::types::{WethError, WethResult};

/// Decimals of ether and WETH.
pub const DEFAULT_DECIMALS: u8 = 18;

/// Conversion into a validated base-unit amount.
pub trait IntoBaseUnits {
    fn into_base_units(self) -> WethResult<U256>;
}

impl IntoBaseUnits for U256 {
    fn into_base_units(self) -> WethResult<U256> {
        Ok(self)
    }
}

impl IntoBaseUnits for u64 {
    fn into_base_units(self) -> WethResult<U256> {
        Ok(U256::from(self))
    }
}

impl IntoBaseUnits for u128 {
    fn into_base_units(self) -> WethResult<U256> {
        Ok(U256::from(self))
    }
}

impl IntoBaseUnits for i64 {
    fn into_base_units(self) -> WethResult<U256> {
        i128::from(self).into_base_units()
    }
}

impl IntoBaseUnits for i128 {
    fn into_base_units(self) -> WethResult<U256> {
        if self < 0 {
            return Err(WethError::InvalidAmount(format!("{} is negative", self)));
        }
        Ok(U256::from(self.unsigned_abs()))
    }
}

impl IntoBaseUnits for &str {
    fn into_base_units(self) -> WethResult<U256> {
        parse_integer(self)
    }
}

impl IntoBaseUnits for &String {
    fn into_base_units(self) -> WethResult<U256> {
        parse_integer(self)
    }
}

impl IntoBaseUnits for String {
    fn into_base_units(self) -> WethResult<U256> {
        parse_integer(&self)
    }
}

/// Parse a decimal integer string of base units.
fn parse_integer(raw: &str) -> WethResult<U256> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(WethError::InvalidAmount("empty amount".to_string()));
    }
    if value.starts_with('-') {
        return Err(WethError::InvalidAmount(format!("{} is negative", value)));
    }
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        let reason = if is_decimal(value) { "is not a whole number of base units" } else { "is not numeric" };
        return Err(WethError::InvalidAmount(format!("{} {}", value, reason)));
    }
    U256::from_str_radix(value, 10)
        .map_err(|_| WethError::InvalidAmount(format!("{} does not fit in 256 bits", value)))
}

fn is_decimal(value: &str) -> bool {
    split_decimal(value).is_some()
}

/// Split `int.frac` into its digit groups. Either side may be empty but not both.
fn split_decimal(value: &str) -> Option<(&str, &str)> {
    let (int_part, frac_part) = match value.split_once('.') {
        Some((i, f)) => (i, f),
        None => (value, ""),
    };
    let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (int_part.is_empty() && frac_part.is_empty()) || !digits(int_part) || !digits(frac_part) {
        return None;
    }
    Some((int_part, frac_part))
}

fn pow10(exp: usize) -> WethResult<U256> {
    U256::from(10u8)
        .checked_pow(U256::from(exp))
        .ok_or_else(|| WethError::InvalidAmount(format!("10^{} does not fit in 256 bits", exp)))
}

/// Scale a human-readable decimal amount up to base units.
///
/// `"1.5"` with 18 decimals becomes `1500000000000000000`. Input with more
/// fractional digits than `decimals` is rejected rather than truncated.
pub fn to_base_units(value: &str, decimals: u8) -> WethResult<U256> {
    let value = value.trim();
    if value.starts_with('-') {
        return Err(WethError::InvalidAmount(format!("{} is negative", value)));
    }
    let (int_part, frac_part) = split_decimal(value)
        .ok_or_else(|| WethError::InvalidAmount(format!("'{}' is not numeric", value)))?;

    let decimals = usize::from(decimals);
    if frac_part.len() > decimals {
        return Err(WethError::InvalidAmount(format!(
            "{} has more than {} decimal places",
            value, decimals
        )));
    }

    let overflow = || WethError::InvalidAmount(format!("{} does not fit in 256 bits", value));
    let parse = |digits: &str| -> WethResult<U256> {
        if digits.is_empty() {
            return Ok(U256::ZERO);
        }
        U256::from_str_radix(digits, 10).map_err(|_| overflow())
    };

    let integer = parse(int_part)?;
    let fraction = parse(frac_part)?
        .checked_mul(pow10(decimals - frac_part.len())?)
        .ok_or_else(overflow)?;

    integer
        .checked_mul(pow10(decimals)?)
        .and_then(|scaled| scaled.checked_add(fraction))
        .ok_or_else(overflow)
}

/// Scale base units down to a human-readable decimal string.
///
/// Trailing fractional zeros are dropped, so `1500000000000000000` with 18
/// decimals formats as `"1.5"` and whole amounts carry no decimal point.
pub fn from_base_units(value: impl IntoBaseUnits, decimals: u8) -> WethResult<String> {
    let value = value.into_base_units()?;
    let formatted = format_units(value, decimals)
        .map_err(|e| WethError::InvalidAmount(format!("cannot format with {} decimals: {}", decimals, e)))?;

    if formatted.contains('.') {
        Ok(formatted.trim_end_matches('0').trim_end_matches('.').to_string())
    } else {
        Ok(formatted)
    }
}
