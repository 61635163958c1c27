//! Quote Model - Pure constant product swap math (x·y=k)
//!
//! This crate contains the off-chain swap quote formulas that must agree
//! bit-for-bit with the on-chain program's integer results. It is consumed
//! by the `cpswap` CLI (fuzz harness and quote preview) and is safe to call
//! from any layer that needs a swap preview.
//!
//! All arithmetic is integer-only. Inputs are `u128`; every intermediate
//! product goes through `U256`, so no input can overflow the math.

#![no_std]

pub mod math;

pub use math::{amount_in_after_fee, amount_out, min_out, quote, Quote};

/// Basis points scale (10,000 bps = 100%)
pub const BPS_SCALE: u128 = 10_000;

/// Error types for quote operations
///
/// Malformed parameters are errors; degenerate trades (zero input or an
/// empty pool) are valid zero-output results, never errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteError {
    /// Fee at or above 100% (fee_bps >= 10_000)
    FeeTooHigh,
    /// Slippage tolerance above 100% (slippage_bps > 10_000)
    SlippageTooHigh,
}

impl core::fmt::Display for QuoteError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            QuoteError::FeeTooHigh => write!(f, "fee must be below 10000 bps"),
            QuoteError::SlippageTooHigh => write!(f, "slippage must be at most 10000 bps"),
        }
    }
}
