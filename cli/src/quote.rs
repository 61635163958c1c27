//! One-shot swap quote preview

use anyhow::Result;
use colored::Colorize;

/// Print the quote for a single hypothetical trade
pub fn show_quote(
    amount_in: u128,
    reserve_in: u128,
    reserve_out: u128,
    fee_bps: u128,
    slippage_bps: u128,
) -> Result<()> {
    let quote = quote_model::quote(amount_in, reserve_in, reserve_out, fee_bps, slippage_bps)
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    let after_fee = quote_model::amount_in_after_fee(amount_in, fee_bps)
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("{}", "=== Swap Quote ===".bright_green().bold());
    println!("{} {}", "Amount in:".bright_cyan(), amount_in);
    println!("{} {} ({} bps fee)", "After fee:".bright_cyan(), after_fee, fee_bps);
    println!("{} {} / {}", "Reserves:".bright_cyan(), reserve_in, reserve_out);
    println!("{} {}", "Expected out:".bright_cyan(), quote.expected_out);
    println!(
        "{} {} ({} bps tolerance)",
        "Minimum out:".bright_cyan(),
        quote.min_out,
        slippage_bps
    );

    if quote.expected_out == 0 {
        println!("\n{}", "Trade is degenerate: zero output".yellow());
    }

    Ok(())
}
