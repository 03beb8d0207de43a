//! Transaction signing CLI
//!
//! Usage:
//!   eth_ledger_tx -t 0x5aae...beaed -v 1000                  # Sign with a random key
//!   eth_ledger_tx -k <hex> -t 0x5aae...beaed -v 250 -n 2     # Sign with a given key
//!   eth_ledger_tx -k <hex> -t 0x5aae...beaed --expected-chain-id 2  # Show a chain mismatch

use std::process;

use clap::Parser;
use tracing::{error, info};

use eth_ledger_tx::logging::init_logging;
use eth_ledger_tx::{Config, LedgerEntry, Transaction};

fn main() {
    let config = Config::parse();
    init_logging(&config.log_level, config.log_format);

    // Validate configuration
    if let Err(e) = config.validate() {
        eprintln!("Configuration error: {}", e);
        process::exit(1);
    }

    if let Err(e) = run(&config) {
        error!(error = %e, "transaction failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let keypair = config.keypair()?;
    if config.private_key.is_none() {
        info!(address = %keypair.address(), "generated a random signing key");
    }

    let tx = Transaction::new(
        config.chain_id,
        config.nonce,
        keypair.account_id(),
        config.to.as_str().into(),
        config.value,
        config.tip,
        config.payload()?,
    )?;
    let signed = tx.sign(&keypair)?;

    println!("Transaction Signer");
    println!("==================");
    println!("TX:     {}", String::from_utf8(signed.encode()?)?);
    println!("SIG:    {}", signed.signature_string());
    println!("PUB:    {}", signed.signer()?);
    println!(
        "V|R|S:  {} {} {}",
        signed.signature().v,
        signed.signature().r,
        signed.signature().s
    );
    println!();

    let expected_chain_id = config.expected_chain_id();
    match signed.validate(expected_chain_id) {
        Ok(()) => {
            println!("Validation (chain {}): ok", expected_chain_id);

            let entry = LedgerEntry::new(signed, config.gas_price, config.gas_units);
            println!("Entry hash: {}", entry.hash_hex()?);
            println!("Entry fee:  {}", entry.fee());
        }
        Err(e) => {
            println!("Validation (chain {}): {}", expected_chain_id, e);
        }
    }

    Ok(())
}
