//! Typed handle over the deployed orderbook program.

use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use solana_client::rpc_client::RpcClient;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{read_keypair_file, Keypair, Signature, Signer},
    system_program,
    transaction::Transaction,
};

use tiered_orderbook::instruction as instructions;
use tiered_orderbook::state::{
    find_bucket_address, find_directory_address, find_orderbook_address, Side,
};

use crate::config::ClientConfig;

/// The remote operations exposed by the deployed orderbook program.
///
/// One method per on-chain instruction. Every method submits a single transaction signed
/// by the client's payer and returns the confirmed transaction signature.
pub trait OrderbookRpc {
    /// Confirm the deployed program is reachable
    fn initialize(&self) -> Result<Signature>;
    /// Create an orderbook for the payer's authority over the given pair
    fn create_orderbook(
        &self,
        base_mint: Pubkey,
        quote_mint: Pubkey,
        tick_size: u64,
        current_price: u64,
    ) -> Result<Signature>;
    /// Provision a price bucket and register its range in the payer's directory
    fn create_price_bucket(&self, side: Side, min_price: u64, tier_level: u8)
        -> Result<Signature>;
}

/// An RPC connection bound to a payer keypair and the orderbook program id
pub struct OrderbookClient {
    rpc: RpcClient,
    payer: Keypair,
    program_id: Pubkey,
}

impl OrderbookClient {
    /// Connect using the payer keypair named by the configuration
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let keypair_path = shellexpand::tilde(&config.keypair_path).into_owned();
        let payer = read_keypair_file(&keypair_path)
            .map_err(|e| anyhow!("Failed to read keypair {}: {}", keypair_path, e))?;
        Self::with_payer(config, payer)
    }

    /// Connect with an explicit payer keypair
    pub fn with_payer(config: &ClientConfig, payer: Keypair) -> Result<Self> {
        let commitment = CommitmentConfig::from_str(&config.commitment)
            .map_err(|_| anyhow!("Invalid commitment level: {}", config.commitment))?;
        let rpc = RpcClient::new_with_timeout_and_commitment(
            config.rpc_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
            commitment,
        );
        Ok(Self {
            rpc,
            payer,
            program_id: tiered_orderbook::ID,
        })
    }

    /// The payer's public key, which acts as the orderbook authority
    pub fn authority(&self) -> Pubkey {
        self.payer.pubkey()
    }

    fn send(&self, instruction: Instruction) -> Result<Signature> {
        let recent_blockhash = self
            .rpc
            .get_latest_blockhash()
            .context("Failed to fetch a recent blockhash")?;
        let transaction = Transaction::new_signed_with_payer(
            &[instruction],
            Some(&self.payer.pubkey()),
            &[&self.payer],
            recent_blockhash,
        );
        let signature = self
            .rpc
            .send_and_confirm_transaction(&transaction)
            .context("Transaction failed")?;
        log::info!("Transaction signature: {}", signature);
        Ok(signature)
    }

    fn initialize_instruction(&self) -> Instruction {
        instructions::initialize(self.program_id)
    }

    fn create_orderbook_instruction(
        &self,
        base_mint: Pubkey,
        quote_mint: Pubkey,
        tick_size: u64,
        current_price: u64,
    ) -> Instruction {
        let authority = self.authority();
        let (orderbook, _) = find_orderbook_address(&authority, &self.program_id);
        let (bid_directory, _) = find_directory_address(&authority, Side::Bid, &self.program_id);
        let (ask_directory, _) = find_directory_address(&authority, Side::Ask, &self.program_id);
        instructions::create_orderbook(
            self.program_id,
            instructions::create_orderbook::Accounts {
                system_program: &system_program::ID,
                authority: &authority,
                orderbook: &orderbook,
                bid_directory: &bid_directory,
                ask_directory: &ask_directory,
                base_mint: &base_mint,
                quote_mint: &quote_mint,
            },
            instructions::create_orderbook::Params {
                tick_size,
                current_price,
            },
        )
    }

    fn create_price_bucket_instruction(
        &self,
        side: Side,
        min_price: u64,
        tier_level: u8,
    ) -> Instruction {
        let authority = self.authority();
        let (orderbook, _) = find_orderbook_address(&authority, &self.program_id);
        let (directory, _) = find_directory_address(&authority, side, &self.program_id);
        let (bucket, _) = find_bucket_address(&orderbook, side, min_price, &self.program_id);
        instructions::create_price_bucket(
            self.program_id,
            instructions::create_price_bucket::Accounts {
                system_program: &system_program::ID,
                authority: &authority,
                orderbook: &orderbook,
                directory: &directory,
                bucket: &bucket,
            },
            instructions::create_price_bucket::Params {
                side,
                min_price,
                tier_level,
            },
        )
    }
}

impl OrderbookRpc for OrderbookClient {
    fn initialize(&self) -> Result<Signature> {
        log::info!("Invoking initialize on program {}", self.program_id);
        self.send(self.initialize_instruction())
    }

    fn create_orderbook(
        &self,
        base_mint: Pubkey,
        quote_mint: Pubkey,
        tick_size: u64,
        current_price: u64,
    ) -> Result<Signature> {
        log::info!("Creating orderbook for authority {}", self.authority());
        self.send(self.create_orderbook_instruction(base_mint, quote_mint, tick_size, current_price))
    }

    fn create_price_bucket(
        &self,
        side: Side,
        min_price: u64,
        tier_level: u8,
    ) -> Result<Signature> {
        log::info!(
            "Registering {:?} price range starting at {} (tier {})",
            side,
            min_price,
            tier_level
        );
        self.send(self.create_price_bucket_instruction(side, min_price, tier_level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> OrderbookClient {
        let config = ClientConfig::new("http://localhost:8899", "/tmp/id.json");
        OrderbookClient::with_payer(&config, Keypair::new()).unwrap()
    }

    #[test]
    fn test_initialize_instruction() {
        let client = test_client();
        let ix = client.initialize_instruction();

        assert_eq!(ix.program_id, tiered_orderbook::ID);
        assert_eq!(ix.data, vec![0]); // Initialize discriminator
        assert!(ix.accounts.is_empty());
    }

    #[test]
    fn test_create_orderbook_instruction() {
        let client = test_client();
        let base_mint = Pubkey::new_unique();
        let quote_mint = Pubkey::new_unique();
        let ix = client.create_orderbook_instruction(base_mint, quote_mint, 10_000, 100_000_000);

        assert_eq!(ix.program_id, tiered_orderbook::ID);
        assert_eq!(ix.data[0], 1); // CreateOrderbook discriminator
        assert_eq!(ix.accounts.len(), 7);
        assert_eq!(ix.accounts[0].pubkey, system_program::ID);
        // The authority signs and pays
        assert_eq!(ix.accounts[1].pubkey, client.authority());
        assert!(ix.accounts[1].is_signer);
        assert!(ix.accounts[1].is_writable);
        assert_eq!(ix.accounts[5].pubkey, base_mint);
        assert_eq!(ix.accounts[6].pubkey, quote_mint);
    }

    #[test]
    fn test_create_price_bucket_instruction() {
        let client = test_client();
        let ix = client.create_price_bucket_instruction(Side::Ask, 90_000_000, 2);

        assert_eq!(ix.program_id, tiered_orderbook::ID);
        assert_eq!(ix.data[0], 2); // CreatePriceBucket discriminator
        assert_eq!(ix.accounts.len(), 5);
        let (orderbook, _) = find_orderbook_address(&client.authority(), &tiered_orderbook::ID);
        let (expected_bucket, _) =
            find_bucket_address(&orderbook, Side::Ask, 90_000_000, &tiered_orderbook::ID);
        assert_eq!(ix.accounts[4].pubkey, expected_bucket);
        assert!(ix.accounts[4].is_writable);
        assert!(!ix.accounts[4].is_signer);
    }

    #[test]
    fn test_invalid_commitment_is_rejected() {
        let config = ClientConfig {
            commitment: "instant".to_string(),
            ..ClientConfig::new("http://localhost:8899", "/tmp/id.json")
        };
        assert!(OrderbookClient::with_payer(&config, Keypair::new()).is_err());
    }
}
