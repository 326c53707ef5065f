// src/common/utils.rs
use rust_decimal::Decimal;

/// Most fractional digits sent to the aggregator for an amount.
const AMOUNT_SCALE: u32 = 8;

// Canonical form of a coin ticker or network name: trimmed, lowercase
pub fn normalize_ticker(ticker: &str) -> String {
    ticker.trim().to_lowercase()
}

/// Render an amount as a plain decimal string for a query parameter.
///
/// Goes through `Decimal` so that `0.1` is sent as `0.1` rather than
/// `0.10000000000000001` or in exponent form. `None` when the amount has no
/// `Decimal` form (non-finite or out of range) or rounds to zero.
pub fn format_amount(amount: f64) -> Option<String> {
    Decimal::from_f64_retain(amount)
        .map(|d| d.round_dp(AMOUNT_SCALE).normalize())
        .filter(|d| !d.is_zero())
        .map(|d| d.to_string())
}
