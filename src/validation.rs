//! Integer/range checks for every chip amount entering the system (§4.13).

use crate::error::GameError;

/// Rounds to the nearest integer and clamps to `>= 0`; non-numeric or
/// non-finite inputs (NaN, +-inf) fall back to `default`.
pub fn sanitize(n: f64, default: i64) -> i64 {
    if !n.is_finite() {
        log::warn!("sanitize: non-finite input {n}, falling back to {default}");
        return default;
    }
    n.round().max(0.0) as i64
}

/// `is a number, is finite, is a non-negative integer`.
pub fn require_chip_amount(n: f64, field: &str) -> Result<i64, GameError> {
    if !n.is_finite() {
        return Err(GameError::invalid_chip_amount(format!("{field} is not finite")).with_field(field));
    }
    if n.fract() != 0.0 {
        return Err(GameError::invalid_chip_amount(format!("{field} is not an integer")).with_field(field));
    }
    if n < 0.0 {
        return Err(GameError::invalid_chip_amount(format!("{field} is negative")).with_field(field));
    }
    Ok(n as i64)
}

pub fn require_range(n: i64, lo: i64, hi: i64, field: &str) -> Result<i64, GameError> {
    if n < lo || n > hi {
        return Err(GameError::invalid_config(format!(
            "{field} = {n} out of range [{lo}, {hi}]"
        ))
        .with_field(field));
    }
    Ok(n)
}
