//! Constant product swap math (x·y=k) with a proportional input fee

use primitive_types::U256;

use crate::{QuoteError, BPS_SCALE};

/// A swap quote: the exact expected output and the slippage-adjusted floor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    /// Exact output under the invariant, after the fee
    pub expected_out: u128,
    /// Minimum acceptable output under the slippage tolerance
    pub min_out: u128,
}

/// Calculate the exact output of a constant product swap
///
/// Fee is taken out of the input leg before the invariant:
/// - after_fee = ⌊amount_in · (10000 - fee_bps) / 10000⌋
/// - out = ⌊after_fee · reserve_out / (reserve_in + after_fee)⌋
///
/// Truncation always favors the pool: the post-trade product
/// `(reserve_in + after_fee) · (reserve_out - out)` never drops below
/// `reserve_in · reserve_out`.
///
/// A zero input amount or an empty pool side is a valid zero-output trade,
/// not an error. Every multiplication and the denominator are computed in
/// U256; quotients are bounded by a u128 input, so the casts back cannot
/// truncate.
///
/// # Arguments
/// * `amount_in` - Input amount in smallest units
/// * `reserve_in` - Pool reserve of the input asset
/// * `reserve_out` - Pool reserve of the output asset
/// * `fee_bps` - Fee in basis points (e.g., 30 = 0.30%), must be < 10000
///
/// # Returns
/// * Exact output amount, or `QuoteError::FeeTooHigh`
pub fn amount_out(
    amount_in: u128,
    reserve_in: u128,
    reserve_out: u128,
    fee_bps: u128,
) -> Result<u128, QuoteError> {
    let after_fee = amount_in_after_fee(amount_in, fee_bps)?;
    if after_fee == 0 || reserve_in == 0 || reserve_out == 0 {
        return Ok(0);
    }

    // out = after_fee * reserve_out / (reserve_in + after_fee)
    let numerator = U256::from(after_fee) * U256::from(reserve_out);
    let denominator = U256::from(reserve_in) + U256::from(after_fee);
    let out = numerator / denominator;

    Ok(out.as_u128())
}

/// Input amount remaining after the proportional fee
///
/// ⌊amount_in · (10000 - fee_bps) / 10000⌋; a tiny trade under a large fee
/// legitimately rounds to zero.
pub fn amount_in_after_fee(amount_in: u128, fee_bps: u128) -> Result<u128, QuoteError> {
    // A 100% fee is malformed configuration, checked even for zero trades
    // so callers can't mistake it for a degenerate quote.
    if fee_bps >= BPS_SCALE {
        return Err(QuoteError::FeeTooHigh);
    }

    let after_fee = U256::from(amount_in) * U256::from(BPS_SCALE - fee_bps) / U256::from(BPS_SCALE);
    Ok(after_fee.as_u128())
}

/// Calculate the minimum acceptable output under a slippage tolerance
///
/// min = ⌊expected_out · (10000 - slippage_bps) / 10000⌋, so the result is
/// always within `0..=expected_out`.
pub fn min_out(expected_out: u128, slippage_bps: u128) -> Result<u128, QuoteError> {
    if slippage_bps > BPS_SCALE {
        return Err(QuoteError::SlippageTooHigh);
    }
    if expected_out == 0 {
        return Ok(0);
    }

    let min =
        U256::from(expected_out) * U256::from(BPS_SCALE - slippage_bps) / U256::from(BPS_SCALE);

    Ok(min.as_u128())
}

/// Quote a trade end to end: expected output plus the slippage floor
pub fn quote(
    amount_in: u128,
    reserve_in: u128,
    reserve_out: u128,
    fee_bps: u128,
    slippage_bps: u128,
) -> Result<Quote, QuoteError> {
    let expected = amount_out(amount_in, reserve_in, reserve_out, fee_bps)?;
    let min = min_out(expected, slippage_bps)?;

    Ok(Quote {
        expected_out: expected,
        min_out: min,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_pool_quote() {
        // 50M / 5B pool, 30 bps fee, 1M in:
        // after_fee = 997_000, out = floor(997_000 * 5e9 / 50_997_000)
        let out = amount_out(1_000_000, 50_000_000, 5_000_000_000, 30).unwrap();
        assert_eq!(out, 97_750_848);

        let min = min_out(out, 10).unwrap();
        assert_eq!(min, 97_653_097);
    }

    #[test]
    fn test_zero_inputs_are_valid() {
        assert_eq!(amount_out(0, 50_000_000, 5_000_000_000, 30).unwrap(), 0);
        assert_eq!(amount_out(1_000, 0, 5_000_000_000, 30).unwrap(), 0);
        assert_eq!(amount_out(1_000, 50_000_000, 0, 30).unwrap(), 0);
        assert_eq!(min_out(0, 10).unwrap(), 0);
    }

    #[test]
    fn test_fee_consumes_tiny_trade() {
        // 10 units at 99.99% fee rounds the after-fee input to zero
        assert_eq!(amount_out(10, 50_000_000, 5_000_000_000, 9_999).unwrap(), 0);
    }

    #[test]
    fn test_full_fee_rejected() {
        assert_eq!(
            amount_out(1_000, 50_000_000, 5_000_000_000, 10_000),
            Err(QuoteError::FeeTooHigh)
        );
        // Rejected even when the trade itself is degenerate
        assert_eq!(
            amount_out(0, 50_000_000, 5_000_000_000, 10_000),
            Err(QuoteError::FeeTooHigh)
        );
    }

    #[test]
    fn test_excessive_slippage_rejected() {
        assert_eq!(min_out(1_000, 10_001), Err(QuoteError::SlippageTooHigh));
        // 100% slippage is allowed and floors to zero
        assert_eq!(min_out(1_000, 10_000).unwrap(), 0);
    }

    #[test]
    fn test_invariant_never_decreases() {
        let r_in: u128 = 50_000_000;
        let r_out: u128 = 5_000_000_000;
        let amount: u128 = 1_000_000;

        let out = amount_out(amount, r_in, r_out, 30).unwrap();
        let after_fee = amount * (BPS_SCALE - 30) / BPS_SCALE;

        let k0 = U256::from(r_in) * U256::from(r_out);
        let k1 = (U256::from(r_in) + U256::from(after_fee)) * U256::from(r_out - out);
        assert!(k1 >= k0, "pool must not lose value to a quote");
    }

    #[test]
    fn test_large_reserves_do_not_overflow() {
        // Reserves around 10^20 exceed u64; products exceed u128.
        let big: u128 = 100_000_000_000_000_000_000;
        let out = amount_out(big / 10, big, big, 30).unwrap();
        assert!(out > 0);
        assert!(out < big);
    }

    #[test]
    fn test_quote_pairs_expected_and_min() {
        let q = quote(1_000_000, 50_000_000, 5_000_000_000, 30, 10).unwrap();
        assert_eq!(q.expected_out, 97_750_848);
        assert_eq!(q.min_out, 97_653_097);
        assert!(q.min_out <= q.expected_out);
    }

    #[test]
    fn test_zero_fee_matches_plain_invariant() {
        let out = amount_out(1_000_000, 50_000_000, 5_000_000_000, 0).unwrap();
        // floor(1e6 * 5e9 / 51e6)
        assert_eq!(out, 98_039_215);
    }
}
