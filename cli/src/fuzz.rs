//! Randomized swap fuzz harness
//!
//! Each iteration samples a pool state and a trade size, derives the exact
//! and minimum outputs from the quote model, and submits them to the swap
//! boundary. Degenerate quotes are skipped; the first rejection halts the
//! run. Iterations are strictly sequential so the halt lands in order and
//! the chain is never flooded with concurrent submissions.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use colored::Colorize;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::boundary::{RpcBoundary, SwapBoundary};
use crate::config::{FuzzSettings, NetworkConfig};

/// Why an iteration was excluded rather than submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    ZeroExpectedOutput,
    ZeroMinimumOutput,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::ZeroExpectedOutput => write!(f, "zero expected output"),
            SkipReason::ZeroMinimumOutput => write!(f, "zero minimum output"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RunOutcome {
    Accepted { diagnostic: String },
    Rejected { exit_code: i32, diagnostic: String },
    Skipped { reason: SkipReason },
}

/// One fuzz iteration: inputs, derived quote, and the boundary's verdict.
/// Appended once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunRecord {
    pub iteration: u32,
    pub reserve_in: u64,
    pub reserve_out: u64,
    pub trade_in: u64,
    pub expected_out: u64,
    pub min_out: u64,
    pub outcome: RunOutcome,
}

#[derive(Debug, Serialize)]
pub struct FuzzReport {
    pub generated_at: DateTime<Utc>,
    pub requested: u32,
    pub run: u32,
    pub skipped: u32,
    pub failures: u32,
    pub records: Vec<RunRecord>,
}

/// Draw a reserve uniformly within ±pct% of its baseline, floored, minimum 1
fn perturb_reserve(rng: &mut StdRng, baseline: u64, pct: u64) -> u64 {
    let span = ((baseline as u128) * (pct as u128) / 100) as u64;
    let lo = baseline.saturating_sub(span).max(1);
    let hi = baseline.saturating_add(span);
    rng.gen_range(lo..=hi)
}

/// Run the fuzz loop against the given boundary
///
/// Every iteration that samples counts as run; skips and the fail-fast halt
/// are both visible in the report, so "completed cleanly", "completed with
/// skips", and "halted early" are distinguishable at a glance.
pub fn run_iterations(settings: &FuzzSettings, boundary: &dyn SwapBoundary) -> Result<FuzzReport> {
    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut records: Vec<RunRecord> = Vec::with_capacity(settings.iterations as usize);
    let mut skipped = 0u32;
    let mut failures = 0u32;

    for iteration in 0..settings.iterations {
        let reserve_in = perturb_reserve(&mut rng, settings.baseline_in, settings.perturbation_pct);
        let reserve_out = perturb_reserve(&mut rng, settings.baseline_out, settings.perturbation_pct);

        // Cap at a third of the input reserve so no single draw is a
        // pool-dominating whale trade
        let trade_in = rng.gen_range(1..=(reserve_in / 3).max(1));

        let quote = quote_model::quote(
            trade_in as u128,
            reserve_in as u128,
            reserve_out as u128,
            settings.fee_bps as u128,
            settings.slippage_bps as u128,
        )
        .map_err(|e| anyhow::anyhow!("quote engine rejected configuration: {}", e))?;

        // Outputs are bounded by reserve_out, so these cannot truncate
        let expected_out = u64::try_from(quote.expected_out).context("expected_out exceeds u64")?;
        let min_out = u64::try_from(quote.min_out).context("min_out exceeds u64")?;

        let outcome = if expected_out == 0 {
            skipped += 1;
            RunOutcome::Skipped { reason: SkipReason::ZeroExpectedOutput }
        } else if min_out == 0 {
            skipped += 1;
            RunOutcome::Skipped { reason: SkipReason::ZeroMinimumOutput }
        } else {
            let verdict = boundary.submit_swap(trade_in, min_out, expected_out)?;
            if verdict.accepted() {
                RunOutcome::Accepted { diagnostic: verdict.diagnostic }
            } else {
                failures += 1;
                RunOutcome::Rejected {
                    exit_code: verdict.exit_code,
                    diagnostic: verdict.diagnostic,
                }
            }
        };

        let halt = matches!(outcome, RunOutcome::Rejected { .. });

        records.push(RunRecord {
            iteration,
            reserve_in,
            reserve_out,
            trade_in,
            expected_out,
            min_out,
            outcome,
        });

        // Fail-fast: one rejection under in-tolerance parameters is a hard
        // signal, not noise to average away
        if halt {
            break;
        }
    }

    Ok(FuzzReport {
        generated_at: Utc::now(),
        requested: settings.iterations,
        run: records.len() as u32,
        skipped,
        failures,
        records,
    })
}

/// Run the fuzz harness against the deployed swap program
pub async fn run_fuzz(config: &NetworkConfig, settings: FuzzSettings, json: bool) -> Result<()> {
    if !json {
        println!("{}", "=== Swap Fuzz Run ===".bright_yellow().bold());
        println!(
            "{} {} iterations, fee {} bps, slippage {} bps, baselines {}/{}",
            "Plan:".bright_cyan(),
            settings.iterations,
            settings.fee_bps,
            settings.slippage_bps,
            settings.baseline_in,
            settings.baseline_out,
        );
        if let Some(seed) = settings.seed {
            println!("{} {}", "Seed:".bright_cyan(), seed);
        }
        println!();
    }

    let boundary = RpcBoundary::new(config, &settings.token_mint)?;
    let report = run_iterations(&settings, &boundary)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if report.failures > 0 {
        anyhow::bail!(
            "boundary rejected a swap; halted after {} of {} iterations",
            report.run,
            report.requested
        );
    }

    Ok(())
}

fn print_report(report: &FuzzReport) {
    for record in &report.records {
        match &record.outcome {
            RunOutcome::Accepted { diagnostic } => {
                println!(
                    "{} iter {}: {} -> {} (min {}) {}",
                    "✓".bright_green(),
                    record.iteration,
                    record.trade_in,
                    record.expected_out,
                    record.min_out,
                    diagnostic.dimmed(),
                );
            }
            RunOutcome::Rejected { exit_code, diagnostic } => {
                println!(
                    "{} iter {}: rejected (code {}): {}",
                    "✗".bright_red(),
                    record.iteration,
                    exit_code,
                    diagnostic,
                );
            }
            RunOutcome::Skipped { reason } => {
                println!(
                    "{} iter {}: skipped ({})",
                    "-".dimmed(),
                    record.iteration,
                    reason,
                );
            }
        }
    }

    println!("\n{}", "=== Fuzz Results ===".bright_cyan());
    println!("{} {} requested", "•".bright_cyan(), report.requested);
    println!("{} {} run", "•".bright_cyan(), report.run);
    println!("{} {} skipped", "•".bright_cyan(), report.skipped);

    if report.failures > 0 {
        println!("{} {} failed", "✗".bright_red(), report.failures);
    } else {
        println!("{}", "All submitted swaps accepted".green().bold());
    }
}
