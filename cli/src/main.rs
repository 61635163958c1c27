//! cpswap CLI - Swap quote preview and on-chain fuzz harness
//!
//! The `quote` subcommand is a synchronous preview of the constant product
//! quote math. The `fuzz` subcommand drives randomized pool/trade
//! configurations through the quote model and submits each derived quote to
//! the deployed swap program, halting on the first rejection.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

mod boundary;
mod client;
mod config;
mod fuzz;
mod quote;

use config::{FuzzSettings, NetworkConfig};

#[derive(Parser)]
#[command(name = "cpswap")]
#[command(about = "Constant product swap quotes and randomized on-chain verification", long_about = None)]
#[command(version)]
struct Cli {
    /// Network to connect to (localnet, devnet, mainnet-beta)
    #[arg(short, long, default_value = "localnet")]
    network: String,

    /// RPC URL (overrides network default)
    #[arg(short, long)]
    url: Option<String>,

    /// Path to keypair file
    #[arg(short, long)]
    keypair: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Quote a single swap without touching the chain
    Quote {
        /// Input amount in smallest units
        #[arg(short, long)]
        amount_in: u128,

        /// Pool reserve of the input asset
        #[arg(long)]
        reserve_in: u128,

        /// Pool reserve of the output asset
        #[arg(long)]
        reserve_out: u128,

        /// Fee in basis points
        #[arg(long, default_value = "30")]
        fee_bps: u128,

        /// Slippage tolerance in basis points
        #[arg(long, default_value = "10")]
        slippage_bps: u128,
    },

    /// Fuzz the swap program with randomized pools and trades
    Fuzz {
        /// Number of iterations (env: CPSWAP_ITERATIONS, default 25)
        #[arg(short, long)]
        iterations: Option<u32>,

        /// Slippage tolerance in bps (env: CPSWAP_SLIPPAGE_BPS, default 10)
        #[arg(long)]
        slippage_bps: Option<u64>,

        /// Fee in bps (env: CPSWAP_FEE_BPS, default 30)
        #[arg(long)]
        fee_bps: Option<u64>,

        /// Baseline input reserve (env: CPSWAP_BASELINE_IN)
        #[arg(long)]
        baseline_in: Option<u64>,

        /// Baseline output reserve (env: CPSWAP_BASELINE_OUT)
        #[arg(long)]
        baseline_out: Option<u64>,

        /// Per-iteration reserve jitter in percent (env: CPSWAP_PERTURBATION_PCT, default 30)
        #[arg(long)]
        perturbation_pct: Option<u64>,

        /// Token mint to trade (env: CPSWAP_TOKEN_MINT, default wrapped SOL)
        #[arg(long)]
        token_mint: Option<String>,

        /// RNG seed for reproducible runs (env: CPSWAP_SEED)
        #[arg(long)]
        seed: Option<u64>,

        /// Emit the full run report as JSON instead of colored text
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Quote { amount_in, reserve_in, reserve_out, fee_bps, slippage_bps } => {
            quote::show_quote(amount_in, reserve_in, reserve_out, fee_bps, slippage_bps)?;
        }
        Commands::Fuzz {
            iterations,
            slippage_bps,
            fee_bps,
            baseline_in,
            baseline_out,
            perturbation_pct,
            token_mint,
            seed,
            json,
        } => {
            // Only the fuzz path talks to the chain, so the keypair is
            // loaded here rather than for every subcommand
            let config = NetworkConfig::new(&cli.network, cli.url.clone(), cli.keypair.clone())?;

            if cli.verbose {
                println!("{} {}", "Network:".bright_cyan(), config.network);
                println!("{} {}", "RPC URL:".bright_cyan(), config.rpc_url);
                println!("{} {}", "Keypair:".bright_cyan(), config.keypair_path.display());
            }

            let settings = FuzzSettings::resolve(
                iterations,
                slippage_bps,
                fee_bps,
                baseline_in,
                baseline_out,
                perturbation_pct,
                token_mint,
                seed,
            )?;

            fuzz::run_fuzz(&config, settings, json).await?;
        }
    }

    Ok(())
}
