//! Account layouts and address derivations for the orderbook's account family.
//!
//! Every program account begins with a 64-bit tag identifying its kind. The tag doubles as
//! an initialization guard: accounts are created zeroed, and casting an account to a type
//! requires the tag to match.
use bonfida_utils::BorshSize;
use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;

#[allow(missing_docs)]
pub mod directory;
#[allow(missing_docs)]
pub mod orderbook;
#[allow(missing_docs)]
pub mod price_level;

pub use directory::{DirectoryAccount, PriceRange};
pub use orderbook::Orderbook;
pub use price_level::{Order, PriceBucket, PriceLevel};

/// Seed prefix for the orderbook header's derived address
pub const ORDERBOOK_SEED: &[u8] = b"orderbook";
/// Seed prefix for directory derived addresses
pub const DIRECTORY_SEED: &[u8] = b"directory";
/// Seed prefix for price bucket derived addresses
pub const BUCKET_SEED: &[u8] = b"bucket";

#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(u64)]
#[allow(missing_docs)]
/// Identifies the kind of program account
pub enum AccountTag {
    Uninitialized,
    Orderbook,
    BidDirectory,
    AskDirectory,
    PriceBucket,
}

#[derive(BorshDeserialize, BorshSerialize, BorshSize, Clone, Copy, Debug, PartialEq)]
#[repr(u8)]
/// Describes a side of the orderbook
pub enum Side {
    #[allow(missing_docs)]
    Bid,
    #[allow(missing_docs)]
    Ask,
}

impl Side {
    /// The account tag carried by this side's directory account
    pub fn directory_tag(self) -> AccountTag {
        match self {
            Side::Bid => AccountTag::BidDirectory,
            Side::Ask => AccountTag::AskDirectory,
        }
    }

    pub(crate) fn seed(self) -> &'static [u8] {
        match self {
            Side::Bid => b"bid",
            Side::Ask => b"ask",
        }
    }
}

/// Derive the address of an authority's orderbook header account
pub fn find_orderbook_address(authority: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[ORDERBOOK_SEED, &authority.to_bytes()], program_id)
}

/// Derive the address of one of an authority's directory accounts
pub fn find_directory_address(authority: &Pubkey, side: Side, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[DIRECTORY_SEED, &authority.to_bytes(), side.seed()],
        program_id,
    )
}

/// Derive the address of the price bucket account whose range starts at `min_price`
pub fn find_bucket_address(
    orderbook: &Pubkey,
    side: Side,
    min_price: u64,
    program_id: &Pubkey,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            BUCKET_SEED,
            &orderbook.to_bytes(),
            &[side as u8],
            &min_price.to_le_bytes(),
        ],
        program_id,
    )
}
