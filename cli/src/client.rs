//! Solana RPC client utilities and helpers

use colored::Colorize;
use solana_client::rpc_client::RpcClient;
use solana_sdk::{commitment_config::CommitmentConfig, signature::Signature};

use crate::config::NetworkConfig;

/// Create an RPC client from the network configuration
pub fn create_rpc_client(config: &NetworkConfig) -> RpcClient {
    RpcClient::new_with_commitment(
        config.rpc_url.clone(),
        CommitmentConfig::confirmed(),
    )
}

/// Pretty print a signature as a shortened explorer link
pub fn format_signature(signature: &Signature, network: &str) -> String {
    let sig_str = signature.to_string();
    let short = format!("{}...{}", &sig_str[0..8], &sig_str[sig_str.len() - 8..]);

    let explorer_url = match network {
        "mainnet-beta" | "mainnet" => format!("https://explorer.solana.com/tx/{}", sig_str),
        "devnet" => format!("https://explorer.solana.com/tx/{}?cluster=devnet", sig_str),
        "localnet" | "local" => format!("http://localhost:3000/tx/{}", sig_str),
        _ => sig_str.clone(),
    };

    format!("{} ({})", short.bright_blue(), explorer_url.dimmed())
}
