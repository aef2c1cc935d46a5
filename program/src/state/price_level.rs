//! Price bucket accounts hold the price levels of one registered range.
//!
//! A bucket's price span usually exceeds the number of levels which hold resting orders at
//! any point in time, so space is allocated for an occupancy cap rather than for the full
//! span. Populating buckets (posting, matching and cancelling orders) is the concern of
//! the matching layer, not of this program.
use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{account_info::AccountInfo, program_error::ProgramError, pubkey::Pubkey};

use super::AccountTag;

// Bucket accounts are created through a CPI to the system program, so a full bucket must
// stay within the runtime's per-CPI allocation limit of 10240 bytes.

/// Price levels a single bucket account can materialize
pub const MAX_LEVELS_PER_BUCKET: usize = 16;
/// Resting orders a single price level can hold
pub const MAX_ORDERS_PER_LEVEL: usize = 8;

#[derive(BorshDeserialize, BorshSerialize, Clone, Debug, PartialEq)]
/// A resting order
pub struct Order {
    /// The order owner's wallet
    pub owner: Pubkey,
    /// Remaining quantity, in base lots
    pub quantity: u64,
    /// Book-wide order identifier
    pub order_id: u64,
    /// Unix timestamp of order placement
    pub timestamp: i64,
}

impl Order {
    /// Serialized size in bytes of an Order
    pub const LEN: usize = 56;
}

#[derive(BorshDeserialize, BorshSerialize, Clone, Debug, Default)]
/// Aggregated state of a single price level
pub struct PriceLevel {
    /// Price of this level, a multiple of the orderbook's tick size
    pub price: u64,
    /// Total resting quantity at this price
    pub total_quantity: u64,
    /// Number of resting orders at this price
    pub order_count: u32,
    /// The resting orders, in time priority
    pub orders: Vec<Order>,
}

impl PriceLevel {
    /// Serialized size in bytes of a fully occupied price level
    pub const MAX_LEN: usize = 8 + 8 + 4 + 4 + MAX_ORDERS_PER_LEVEL * Order::LEN;
}

#[derive(BorshDeserialize, BorshSerialize, Debug)]
/// The price levels of one registered price range
pub struct PriceBucket {
    /// `AccountTag::PriceBucket`
    pub tag: u64,
    /// The orderbook's admin authority
    pub authority: Pubkey,
    /// Minimum price in this bucket (inclusive)
    pub min_price: u64,
    /// Maximum price in this bucket (exclusive)
    pub max_price: u64,
    /// The tier level the bucket's range was registered at
    pub tier_level: u8,
    /// Materialized price levels, sorted by price
    pub price_levels: Vec<PriceLevel>,
    /// The derived address bump
    pub bump: u8,
}

impl PriceBucket {
    #[allow(missing_docs)]
    pub fn init_new(
        authority: &Pubkey,
        min_price: u64,
        max_price: u64,
        tier_level: u8,
        bump: u8,
    ) -> Self {
        Self {
            tag: AccountTag::PriceBucket as u64,
            authority: *authority,
            min_price,
            max_price,
            tier_level,
            price_levels: vec![],
            bump,
        }
    }

    /// Account space to allocate for a bucket at full occupancy
    pub fn expected_space() -> usize {
        // tag + authority + bounds + tier + vec length prefix + full level table + bump
        8 + 32 + 8 + 8 + 1 + 4 + MAX_LEVELS_PER_BUCKET * PriceLevel::MAX_LEN + 1
    }

    /// Deserialize the bucket held in `account`, checking its tag
    pub fn from_account(account: &AccountInfo) -> Result<Self, ProgramError> {
        let data: &[u8] = &account.data.borrow();
        let bucket =
            Self::deserialize(&mut &*data).map_err(|_| ProgramError::InvalidAccountData)?;
        if bucket.tag != AccountTag::PriceBucket as u64 {
            return Err(ProgramError::InvalidAccountData);
        }
        Ok(bucket)
    }

    /// Serialize the bucket back into `account`
    pub fn save(&self, account: &AccountInfo) -> Result<(), ProgramError> {
        self.serialize(&mut (&mut account.data.borrow_mut() as &mut [u8]))
            .map_err(|_| ProgramError::AccountDataTooSmall)
    }

    /// Whether `price` falls inside this bucket's range
    pub fn contains(&self, price: u64) -> bool {
        self.min_price <= price && price < self.max_price
    }

    /// Find the materialized level at exactly `price`
    pub fn level_for_price(&self, price: u64) -> Option<&PriceLevel> {
        self.price_levels
            .binary_search_by_key(&price, |level| level.price)
            .ok()
            .map(|idx| &self.price_levels[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use borsh::BorshSerialize;

    #[test]
    fn level_lookup() {
        let mut bucket = PriceBucket::init_new(&Pubkey::new_unique(), 1_000, 2_000, 0, 254);
        for price in [1_000u64, 1_200, 1_700] {
            bucket.price_levels.push(PriceLevel {
                price,
                total_quantity: 10,
                order_count: 1,
                orders: vec![Order {
                    owner: Pubkey::new_unique(),
                    quantity: 10,
                    order_id: price,
                    timestamp: 0,
                }],
            });
        }
        assert_eq!(bucket.level_for_price(1_200).unwrap().order_count, 1);
        assert!(bucket.level_for_price(1_100).is_none());
        assert!(bucket.contains(1_999));
        assert!(!bucket.contains(2_000));
    }

    #[test]
    fn occupancy_fits_allocation() {
        let full_level = PriceLevel {
            price: u64::MAX,
            total_quantity: u64::MAX,
            order_count: MAX_ORDERS_PER_LEVEL as u32,
            orders: (0..MAX_ORDERS_PER_LEVEL)
                .map(|i| Order {
                    owner: Pubkey::new_unique(),
                    quantity: 1,
                    order_id: i as u64,
                    timestamp: 0,
                })
                .collect(),
        };
        assert_eq!(full_level.try_to_vec().unwrap().len(), PriceLevel::MAX_LEN);

        let mut bucket = PriceBucket::init_new(&Pubkey::new_unique(), 0, 1_000, 0, 255);
        bucket.price_levels = (0..MAX_LEVELS_PER_BUCKET).map(|_| full_level.clone()).collect();
        assert_eq!(
            bucket.try_to_vec().unwrap().len(),
            PriceBucket::expected_space()
        );
        // Must fit the runtime's per-CPI allocation limit
        assert!(PriceBucket::expected_space() <= 10_240);
    }
}
