//! Swap execution boundary
//!
//! The harness never interprets on-chain state itself; it hands each derived
//! quote to a [`SwapBoundary`] and records the accept/reject verdict. The
//! production implementation submits a real swap transaction; tests plug in
//! stubs.

use log::debug;
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    transaction::Transaction,
};
use std::str::FromStr;
use thiserror::Error;

use crate::{client, config::NetworkConfig};

/// Swap instruction discriminator understood by the on-chain program
const SWAP_IX: u8 = 1;

/// Outcome of one boundary submission
///
/// A non-zero exit code is a rejection. The diagnostic is logged verbatim in
/// the run record and never parsed.
#[derive(Debug, Clone)]
pub struct SwapVerdict {
    pub exit_code: i32,
    pub diagnostic: String,
}

impl SwapVerdict {
    pub fn accepted(&self) -> bool {
        self.exit_code == 0
    }
}

/// Errors that prevent a verdict from being produced at all
///
/// Distinct from a rejection: a rejection is a verdict, these mean the
/// submission never reached the program.
#[derive(Debug, Error)]
pub enum BoundaryError {
    #[error("invalid token mint {0}: {1}")]
    InvalidMint(String, String),
    #[error("failed to fetch blockhash: {0}")]
    Blockhash(String),
}

pub trait SwapBoundary {
    /// Submit a swap with the derived quote as its parameters
    fn submit_swap(
        &self,
        trade_in: u64,
        min_out: u64,
        expected_out: u64,
    ) -> Result<SwapVerdict, BoundaryError>;
}

/// Boundary that executes swaps through the deployed on-chain program
pub struct RpcBoundary<'a> {
    config: &'a NetworkConfig,
    mint: Pubkey,
    pool: Pubkey,
}

impl<'a> RpcBoundary<'a> {
    pub fn new(config: &'a NetworkConfig, token_mint: &str) -> Result<Self, BoundaryError> {
        let mint = Pubkey::from_str(token_mint)
            .map_err(|e| BoundaryError::InvalidMint(token_mint.to_string(), e.to_string()))?;

        // Pool state lives at the program's per-mint PDA
        let (pool, _bump) =
            Pubkey::find_program_address(&[b"pool", mint.as_ref()], &config.swap_program_id);

        Ok(Self { config, mint, pool })
    }

    fn build_swap_instruction(&self, trade_in: u64, min_out: u64, expected_out: u64) -> Instruction {
        // Instruction data: [discriminator (1u8), amount_in, min_out, expected_out (u64 LE each)]
        let mut data = Vec::with_capacity(25);
        data.push(SWAP_IX);
        data.extend_from_slice(&trade_in.to_le_bytes());
        data.extend_from_slice(&min_out.to_le_bytes());
        data.extend_from_slice(&expected_out.to_le_bytes());

        Instruction {
            program_id: self.config.swap_program_id,
            accounts: vec![
                AccountMeta::new(self.pool, false),           // Pool state (writable)
                AccountMeta::new(self.config.pubkey(), true), // Trader (signer, writable)
                AccountMeta::new_readonly(self.mint, false),  // Token mint
            ],
            data,
        }
    }
}

impl SwapBoundary for RpcBoundary<'_> {
    fn submit_swap(
        &self,
        trade_in: u64,
        min_out: u64,
        expected_out: u64,
    ) -> Result<SwapVerdict, BoundaryError> {
        let rpc_client = client::create_rpc_client(self.config);

        let recent_blockhash = rpc_client
            .get_latest_blockhash()
            .map_err(|e| BoundaryError::Blockhash(e.to_string()))?;

        let swap_ix = self.build_swap_instruction(trade_in, min_out, expected_out);

        let mut transaction = Transaction::new_with_payer(&[swap_ix], Some(&self.config.pubkey()));
        transaction.sign(&[&self.config.keypair], recent_blockhash);

        debug!(
            "submitting swap: trade_in={} min_out={} expected_out={}",
            trade_in, min_out, expected_out
        );

        // The program enforces min_out on-chain; a simulation failure or a
        // slippage revert both come back as a send error and count as a
        // rejection, not a transport error.
        match rpc_client.send_and_confirm_transaction(&transaction) {
            Ok(signature) => Ok(SwapVerdict {
                exit_code: 0,
                diagnostic: client::format_signature(&signature, &self.config.network),
            }),
            Err(e) => Ok(SwapVerdict {
                exit_code: 1,
                diagnostic: e.to_string(),
            }),
        }
    }
}
