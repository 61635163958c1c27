//! Network configuration, keypair management, and fuzz settings

use anyhow::{Context, Result};
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signer},
};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub struct NetworkConfig {
    pub network: String,
    pub rpc_url: String,
    pub keypair: Keypair,
    pub keypair_path: PathBuf,
    pub swap_program_id: Pubkey,
}

impl NetworkConfig {
    pub fn new(network: &str, rpc_url: Option<String>, keypair_path: Option<PathBuf>) -> Result<Self> {
        let default_rpc = match network {
            "localnet" | "local" => "http://127.0.0.1:8899".to_string(),
            "devnet" => "https://api.devnet.solana.com".to_string(),
            "mainnet-beta" | "mainnet" => "https://api.mainnet-beta.solana.com".to_string(),
            _ => anyhow::bail!("Unknown network: {}. Use localnet, devnet, or mainnet-beta", network),
        };

        let rpc_url = rpc_url.unwrap_or(default_rpc);

        // Resolve keypair path
        let keypair_path = if let Some(path) = keypair_path {
            path
        } else {
            // Try default Solana CLI config location
            let home = std::env::var("HOME").context("HOME environment variable not set")?;
            PathBuf::from(home).join(".config/solana/id.json")
        };

        let keypair = load_keypair(&keypair_path)?;

        // SPL Token Swap program; pool accounts are PDAs of it per mint
        let swap_program_id = Pubkey::from_str("SwaPpA9LAaLfeLi3a68M4DjnLqgtticKg6CnyNwgAC8")
            .expect("Invalid swap program ID");

        Ok(Self {
            network: network.to_string(),
            rpc_url,
            keypair,
            keypair_path,
            swap_program_id,
        })
    }

    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }
}

/// Load a keypair from a JSON file
fn load_keypair(path: &Path) -> Result<Keypair> {
    if !path.exists() {
        anyhow::bail!(
            "Keypair file not found: {}\n\
             Create one with: solana-keygen new --outfile {}",
            path.display(),
            path.display()
        );
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read keypair file: {}", path.display()))?;

    let bytes: Vec<u8> = serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse keypair JSON: {}", path.display()))?;

    Keypair::from_bytes(&bytes)
        .with_context(|| format!("Invalid keypair data in: {}", path.display()))
}

/// Fuzz run parameters, resolved as CLI flag > environment > default
///
/// | field            | default       | env                     |
/// |------------------|---------------|-------------------------|
/// | iterations       | 25            | CPSWAP_ITERATIONS       |
/// | slippage_bps     | 10            | CPSWAP_SLIPPAGE_BPS     |
/// | fee_bps          | 30            | CPSWAP_FEE_BPS          |
/// | baseline_in      | 50_000_000    | CPSWAP_BASELINE_IN      |
/// | baseline_out     | 5_000_000_000 | CPSWAP_BASELINE_OUT     |
/// | perturbation_pct | 30            | CPSWAP_PERTURBATION_PCT |
/// | token_mint       | wrapped SOL   | CPSWAP_TOKEN_MINT       |
/// | seed             | OS entropy    | CPSWAP_SEED             |
#[derive(Debug, Clone)]
pub struct FuzzSettings {
    pub iterations: u32,
    pub slippage_bps: u64,
    pub fee_bps: u64,
    pub baseline_in: u64,
    pub baseline_out: u64,
    pub perturbation_pct: u64,
    pub token_mint: String,
    pub seed: Option<u64>,
}

impl Default for FuzzSettings {
    fn default() -> Self {
        Self {
            iterations: 25,
            slippage_bps: 10,
            fee_bps: 30,
            baseline_in: 50_000_000,
            baseline_out: 5_000_000_000,
            perturbation_pct: 30,
            token_mint: "So11111111111111111111111111111111111111112".to_string(),
            seed: None,
        }
    }
}

impl FuzzSettings {
    /// Resolve settings from defaults, CPSWAP_* environment variables, and
    /// CLI flags, in increasing order of precedence
    #[allow(clippy::too_many_arguments)]
    pub fn resolve(
        iterations: Option<u32>,
        slippage_bps: Option<u64>,
        fee_bps: Option<u64>,
        baseline_in: Option<u64>,
        baseline_out: Option<u64>,
        perturbation_pct: Option<u64>,
        token_mint: Option<String>,
        seed: Option<u64>,
    ) -> Result<Self> {
        let defaults = Self::default();

        let settings = Self {
            iterations: pick(iterations, "CPSWAP_ITERATIONS", defaults.iterations)?,
            slippage_bps: pick(slippage_bps, "CPSWAP_SLIPPAGE_BPS", defaults.slippage_bps)?,
            fee_bps: pick(fee_bps, "CPSWAP_FEE_BPS", defaults.fee_bps)?,
            baseline_in: pick(baseline_in, "CPSWAP_BASELINE_IN", defaults.baseline_in)?,
            baseline_out: pick(baseline_out, "CPSWAP_BASELINE_OUT", defaults.baseline_out)?,
            perturbation_pct: pick(perturbation_pct, "CPSWAP_PERTURBATION_PCT", defaults.perturbation_pct)?,
            token_mint: match token_mint {
                Some(mint) => mint,
                None => std::env::var("CPSWAP_TOKEN_MINT").unwrap_or(defaults.token_mint),
            },
            seed: match seed {
                Some(s) => Some(s),
                None => env_override("CPSWAP_SEED")?,
            },
        };

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.fee_bps >= 10_000 {
            anyhow::bail!("fee_bps must be below 10000 (got {})", self.fee_bps);
        }
        if self.slippage_bps > 10_000 {
            anyhow::bail!("slippage_bps must be at most 10000 (got {})", self.slippage_bps);
        }
        if self.perturbation_pct > 100 {
            anyhow::bail!("perturbation_pct must be at most 100 (got {})", self.perturbation_pct);
        }
        if self.baseline_in == 0 || self.baseline_out == 0 {
            anyhow::bail!("baseline reserves must be positive");
        }
        Ok(())
    }
}

fn pick<T: FromStr>(flag: Option<T>, env: &str, default: T) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    match flag {
        Some(v) => Ok(v),
        None => Ok(env_override(env)?.unwrap_or(default)),
    }
}

fn env_override<T: FromStr>(name: &str) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => {
            let parsed = raw
                .parse::<T>()
                .map_err(|e| anyhow::anyhow!("Invalid {}={}: {}", name, raw, e))?;
            Ok(Some(parsed))
        }
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_network_urls() {
        let config = NetworkConfig::new("localnet", None, None);
        assert!(config.is_ok() || config.as_ref().err().unwrap().to_string().contains("Keypair file not found"));
    }

    #[test]
    fn test_unknown_network_rejected() {
        let config = NetworkConfig::new("testnet-of-doom", None, None);
        assert!(config.is_err());
    }

    #[test]
    fn test_load_keypair_roundtrip() {
        let keypair = Keypair::new();
        let json = serde_json::to_string(&keypair.to_bytes().to_vec()).unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let loaded = load_keypair(file.path()).unwrap();
        assert_eq!(loaded.pubkey(), keypair.pubkey());
    }

    #[test]
    fn test_fuzz_defaults() {
        let s = FuzzSettings::default();
        assert_eq!(s.iterations, 25);
        assert_eq!(s.slippage_bps, 10);
        assert_eq!(s.fee_bps, 30);
        assert_eq!(s.perturbation_pct, 30);
        assert!(s.seed.is_none());
    }

    #[test]
    fn test_flag_beats_default() {
        let s = FuzzSettings::resolve(Some(5), None, Some(25), None, None, None, None, Some(42)).unwrap();
        assert_eq!(s.iterations, 5);
        assert_eq!(s.fee_bps, 25);
        assert_eq!(s.seed, Some(42));
        // Untouched fields keep their defaults
        assert_eq!(s.baseline_out, 5_000_000_000);
    }

    #[test]
    fn test_invalid_fee_rejected() {
        let err = FuzzSettings::resolve(None, None, Some(10_000), None, None, None, None, None);
        assert!(err.is_err());
    }

    #[test]
    fn test_invalid_slippage_rejected() {
        let err = FuzzSettings::resolve(None, Some(10_001), None, None, None, None, None, None);
        assert!(err.is_err());
    }
}
