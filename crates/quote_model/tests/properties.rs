//! Property suite for the swap quote math
//!
//! Increase cases: PROPTEST_CASES=1000 cargo test -p quote_model

use primitive_types::U256;
use proptest::prelude::*;
use quote_model::{amount_out, min_out, quote, BPS_SCALE};

/// Realistic pool magnitudes, up to ~10^20 (beyond u64)
fn reserve_strategy() -> impl Strategy<Value = u128> {
    1u128..100_000_000_000_000_000_000
}

fn fee_strategy() -> impl Strategy<Value = u128> {
    0u128..BPS_SCALE
}

fn slippage_strategy() -> impl Strategy<Value = u128> {
    0u128..=BPS_SCALE
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // min_out is always within [0, expected_out]
    #[test]
    fn prop_min_out_bounded(
        amount in 1u128..10_000_000_000_000,
        r_in in reserve_strategy(),
        r_out in reserve_strategy(),
        fee in fee_strategy(),
        slippage in slippage_strategy()
    ) {
        let expected = amount_out(amount, r_in, r_out, fee).unwrap();
        let min = min_out(expected, slippage).unwrap();

        prop_assert!(min <= expected);
    }

    // Output never reaches the output reserve
    #[test]
    fn prop_output_below_reserve(
        amount in 1u128..10_000_000_000_000,
        r_in in reserve_strategy(),
        r_out in reserve_strategy(),
        fee in fee_strategy()
    ) {
        let out = amount_out(amount, r_in, r_out, fee).unwrap();

        prop_assert!(out < r_out);
    }

    // Growing the output reserve never shrinks the output
    #[test]
    fn prop_monotone_in_reserve_out(
        amount in 1u128..10_000_000_000_000,
        r_in in reserve_strategy(),
        r_out in 1u128..50_000_000_000_000_000_000,
        extra in 0u128..50_000_000_000_000_000_000,
        fee in fee_strategy()
    ) {
        let base = amount_out(amount, r_in, r_out, fee).unwrap();
        let grown = amount_out(amount, r_in, r_out + extra, fee).unwrap();

        prop_assert!(grown >= base);
    }

    // Raising the fee never raises the output
    #[test]
    fn prop_monotone_in_fee(
        amount in 1u128..10_000_000_000_000,
        r_in in reserve_strategy(),
        r_out in reserve_strategy(),
        fee_lo in fee_strategy(),
        fee_hi in fee_strategy()
    ) {
        let lo = fee_lo.min(fee_hi);
        let hi = fee_lo.max(fee_hi);

        let out_lo = amount_out(amount, r_in, r_out, lo).unwrap();
        let out_hi = amount_out(amount, r_in, r_out, hi).unwrap();

        prop_assert!(out_hi <= out_lo);
    }

    // Pure function law: identical inputs, identical outputs
    #[test]
    fn prop_deterministic(
        amount in 0u128..10_000_000_000_000,
        r_in in reserve_strategy(),
        r_out in reserve_strategy(),
        fee in fee_strategy(),
        slippage in slippage_strategy()
    ) {
        let a = quote(amount, r_in, r_out, fee, slippage).unwrap();
        let b = quote(amount, r_in, r_out, fee, slippage).unwrap();

        prop_assert_eq!(a, b);
    }

    // Truncation favors the pool: post-trade product never drops below k
    #[test]
    fn prop_invariant_non_decreasing(
        amount in 1u128..10_000_000_000_000,
        r_in in reserve_strategy(),
        r_out in reserve_strategy(),
        fee in fee_strategy()
    ) {
        let out = amount_out(amount, r_in, r_out, fee).unwrap();
        let after_fee = amount * (BPS_SCALE - fee) / BPS_SCALE;

        let k0 = U256::from(r_in) * U256::from(r_out);
        let k1 = (U256::from(r_in) + U256::from(after_fee)) * U256::from(r_out - out);

        prop_assert!(k1 >= k0);
    }
}
