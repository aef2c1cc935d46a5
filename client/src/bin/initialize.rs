//! Smoke harness: invoke the deployed program's initialize entry point once and report
//! the confirmed transaction signature.

use anyhow::Result;
use tiered_orderbook_client::{ClientConfig, OrderbookClient, OrderbookRpc};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ClientConfig::load().unwrap_or_else(|_| {
        log::warn!("Failed to load config, using default devnet config");
        ClientConfig::default_devnet()
    });
    log::info!("Using RPC endpoint: {}", config.rpc_url);

    let client = OrderbookClient::new(&config)?;
    log::info!("Payer wallet: {}", client.authority());

    let signature = client.initialize()?;
    println!("Transaction signature: {}", signature);
    Ok(())
}
