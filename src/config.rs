//! Command line configuration for the signing tool.

use std::str::FromStr;

use clap::Parser;

use crate::crypto::{KeyError, Keypair};
use crate::logging::LogFormat;
use crate::transaction::AccountId;

/// Build, sign and validate an Ethereum-style transaction
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Sender private key as hex (0x prefix optional); a random key is used if omitted
    #[arg(short = 'k', long)]
    pub private_key: Option<String>,

    /// Receiving account (20 byte hex address)
    #[arg(short, long)]
    pub to: String,

    /// Amount to transfer
    #[arg(short = 'v', long, default_value = "0")]
    pub value: u64,

    /// Tip offered for inclusion
    #[arg(long, default_value = "0")]
    pub tip: u64,

    /// Sender nonce
    #[arg(short, long, default_value = "1")]
    pub nonce: u64,

    /// Chain the transaction is signed for
    #[arg(short, long, default_value = "1")]
    pub chain_id: u16,

    /// Chain to validate against (defaults to --chain-id)
    #[arg(long)]
    pub expected_chain_id: Option<u16>,

    /// Extra payload as hex (0x prefix optional)
    #[arg(short, long, default_value = "")]
    pub data: String,

    /// Price of one unit of gas for the ledger entry
    #[arg(long, default_value = "1")]
    pub gas_price: u64,

    /// Units of gas charged for the ledger entry
    #[arg(long, default_value = "21000")]
    pub gas_units: u64,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Log format: pretty or json
    #[arg(long, default_value = "pretty")]
    pub log_format: LogFormat,
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !AccountId::from(self.to.as_str()).is_account_id() {
            return Err(ConfigError::InvalidAccount(self.to.clone()));
        }

        self.payload()?;

        if let Some(key) = &self.private_key {
            Keypair::from_hex(key)?;
        }

        Ok(())
    }

    /// Returns the configured keypair, or a freshly generated one.
    pub fn keypair(&self) -> Result<Keypair, ConfigError> {
        match &self.private_key {
            Some(key) => Ok(Keypair::from_hex(key)?),
            None => Ok(Keypair::generate()),
        }
    }

    /// Returns the decoded `--data` payload.
    pub fn payload(&self) -> Result<Vec<u8>, ConfigError> {
        let data = self.data.strip_prefix("0x").unwrap_or(&self.data);
        hex::decode(data).map_err(|e| ConfigError::InvalidData(e.to_string()))
    }

    /// Returns the chain id to validate against.
    pub fn expected_chain_id(&self) -> u16 {
        self.expected_chain_id.unwrap_or(self.chain_id)
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid account: {0:?}")]
    InvalidAccount(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error(transparent)]
    InvalidKey(#[from] KeyError),
}
