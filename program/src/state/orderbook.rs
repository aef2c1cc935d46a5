//! The orderbook header tracks the traded pair and the addresses of the book's directory
//! accounts
use bytemuck::{Pod, Zeroable};
use solana_program::{program_error::ProgramError, pubkey::Pubkey};
use std::mem::size_of;

use super::AccountTag;

#[derive(Debug, Copy, Clone, Pod, Zeroable)]
#[repr(C)]
/// The orderbook's central state
pub struct Orderbook {
    /// The admin authority. All orderbook accounts are derived from this key.
    pub authority: Pubkey,
    /// Token mint for the base currency
    pub base_mint: Pubkey,
    /// Token mint for the quote currency
    pub quote_mint: Pubkey,
    /// The public key of the bid side's directory account
    pub bid_directory: Pubkey,
    /// The public key of the ask side's directory account
    pub ask_directory: Pubkey,
    /// Minimum price increment
    pub tick_size: u64,
    /// Price span covered by a tier 0 bucket
    pub bucket_size: u64,
    /// Current best bid price, 0 when the bid side is empty
    pub best_bid: u64,
    /// Current best ask price, 0 when the ask side is empty
    pub best_ask: u64,
    /// Total resting bid orders
    pub total_bids: u64,
    /// Total resting ask orders
    pub total_asks: u64,
    /// Coarsest tier level the directories will accept
    pub max_tier_level: u8,
    /// The derived address bump
    pub bump: u8,
    _padding: [u8; 6],
}

impl Orderbook {
    /// Expected size in bytes of Orderbook
    pub const LEN: usize = size_of::<Self>();

    #[allow(missing_docs)]
    #[allow(clippy::too_many_arguments)]
    pub fn init_new(
        authority: &Pubkey,
        base_mint: &Pubkey,
        quote_mint: &Pubkey,
        bid_directory: &Pubkey,
        ask_directory: &Pubkey,
        tick_size: u64,
        bucket_size: u64,
        max_tier_level: u8,
        bump: u8,
    ) -> Self {
        Self {
            authority: *authority,
            base_mint: *base_mint,
            quote_mint: *quote_mint,
            bid_directory: *bid_directory,
            ask_directory: *ask_directory,
            tick_size,
            bucket_size,
            best_bid: 0,
            best_ask: 0,
            total_bids: 0,
            total_asks: 0,
            max_tier_level,
            bump,
            _padding: [0u8; 6],
        }
    }

    #[allow(missing_docs)]
    pub fn from_buffer(
        account_data: &mut [u8],
        expected_tag: AccountTag,
    ) -> Result<&mut Self, ProgramError> {
        let tag = bytemuck::from_bytes_mut::<u64>(&mut account_data[0..8]);
        if tag != &(expected_tag as u64) {
            return Err(ProgramError::InvalidAccountData);
        };
        *tag = AccountTag::Orderbook as u64;

        let (_, data) = account_data.split_at_mut(8);

        Ok(bytemuck::from_bytes_mut(data))
    }
}

#[test]
fn orderbook_cast() {
    // u64 backing keeps the buffer aligned for the cast
    let mut backing = [0u64; (Orderbook::LEN + 8) / 8];
    let buffer: &mut [u8] = bytemuck::cast_slice_mut(&mut backing);
    let r = Orderbook::from_buffer(buffer, AccountTag::Orderbook);
    assert!(r.is_err());
    assert_eq!(r.unwrap_err(), ProgramError::InvalidAccountData);

    // A zeroed buffer casts as uninitialized, and the cast claims it
    assert!(Orderbook::from_buffer(buffer, AccountTag::Uninitialized).is_ok());
    assert!(Orderbook::from_buffer(buffer, AccountTag::Orderbook).is_ok());
    assert!(Orderbook::from_buffer(buffer, AccountTag::Uninitialized).is_err());
}
