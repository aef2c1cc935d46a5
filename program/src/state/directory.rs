//! Directory accounts map disjoint price ranges to the bucket accounts holding their price
//! levels.
//!
//! Each side of an orderbook owns one directory. Ranges are registered at a tier level: a
//! tier 0 range spans exactly one bucket worth of ticks, and each further tier doubles the
//! span. Registrations are kept sorted by lower bound and must not overlap.
use bonfida_utils::BorshSize;
use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{account_info::AccountInfo, program_error::ProgramError, pubkey::Pubkey};

use crate::error::OrderbookError;

use super::{AccountTag, Side};

/// Number of ticks spanned by a tier 0 bucket
pub const PRICE_LEVELS_PER_BUCKET: u64 = 1_000;
/// Hard cap on the coarsest directory tier
pub const MAX_TIER_LEVEL: u8 = 8;
/// Registered ranges a directory can hold per tier
pub const RANGES_PER_TIER: usize = 8;

#[derive(BorshDeserialize, BorshSerialize, BorshSize, Clone, Debug, PartialEq)]
/// Maps a half-open price interval to the bucket account which holds its price levels
pub struct PriceRange {
    /// Minimum price in this range (inclusive)
    pub min_price: u64,
    /// Maximum price in this range (exclusive)
    pub max_price: u64,
    /// The tier level the range was registered at
    pub tier_level: u8,
    /// Address of the range's price bucket account
    pub account: Pubkey,
}

impl PriceRange {
    /// Serialized size in bytes of a PriceRange
    pub const LEN: usize = 49;

    /// Whether `price` falls inside this range
    pub fn contains(&self, price: u64) -> bool {
        self.min_price <= price && price < self.max_price
    }
}

#[derive(BorshDeserialize, BorshSerialize, Debug)]
/// One side of the orderbook: a sorted directory of registered price ranges
pub struct DirectoryAccount {
    /// `BidDirectory` or `AskDirectory`
    pub tag: u64,
    /// The orderbook's admin authority
    pub authority: Pubkey,
    /// Registered ranges, sorted by lower bound and non-overlapping
    pub price_ranges: Vec<PriceRange>,
    /// The derived address bump
    pub bump: u8,
}

impl DirectoryAccount {
    #[allow(missing_docs)]
    pub fn init_new(side: Side, authority: &Pubkey, bump: u8) -> Self {
        Self {
            tag: side.directory_tag() as u64,
            authority: *authority,
            price_ranges: vec![],
            bump,
        }
    }

    /// Deserialize the directory held in `account`, checking its tag against `side`
    pub fn from_account(account: &AccountInfo, side: Side) -> Result<Self, ProgramError> {
        let data: &[u8] = &account.data.borrow();
        let directory =
            Self::deserialize(&mut &*data).map_err(|_| ProgramError::InvalidAccountData)?;
        if directory.tag != side.directory_tag() as u64 {
            return Err(ProgramError::InvalidAccountData);
        }
        Ok(directory)
    }

    /// Serialize the directory back into `account`
    pub fn save(&self, account: &AccountInfo) -> Result<(), ProgramError> {
        self.serialize(&mut (&mut account.data.borrow_mut() as &mut [u8]))
            .map_err(|_| ProgramError::AccountDataTooSmall)
    }

    /// Find the registered range containing `price`
    pub fn find_range(&self, price: u64) -> Option<&PriceRange> {
        let idx = match self
            .price_ranges
            .binary_search_by_key(&price, |r| r.min_price)
        {
            Ok(idx) => idx,
            Err(0) => return None,
            Err(idx) => idx - 1,
        };
        let range = &self.price_ranges[idx];
        range.contains(price).then(|| range)
    }

    /// Insert `range` at its sorted position.
    ///
    /// Fails if the range overlaps an existing registration or if the directory already
    /// holds `capacity` ranges.
    pub fn register_range(
        &mut self,
        range: PriceRange,
        capacity: usize,
    ) -> Result<(), OrderbookError> {
        if self.price_ranges.len() >= capacity {
            return Err(OrderbookError::DirectoryFull);
        }
        let idx = match self
            .price_ranges
            .binary_search_by_key(&range.min_price, |r| r.min_price)
        {
            Ok(_) => return Err(OrderbookError::OverlappingPriceRange),
            Err(idx) => idx,
        };
        if idx > 0 && self.price_ranges[idx - 1].max_price > range.min_price {
            return Err(OrderbookError::OverlappingPriceRange);
        }
        if idx < self.price_ranges.len() && range.max_price > self.price_ranges[idx].min_price {
            return Err(OrderbookError::OverlappingPriceRange);
        }
        self.price_ranges.insert(idx, range);
        Ok(())
    }

    /// Account space to allocate for a directory serving tiers up to `max_tier_level`
    pub fn expected_space(max_tier_level: u8) -> usize {
        // tag + authority + vec length prefix + full range table + bump
        8 + 32 + 4 + directory_capacity(max_tier_level) * PriceRange::LEN + 1
    }
}

/// Price span of a range registered at `tier_level`
pub fn range_width(bucket_size: u64, tier_level: u8) -> Option<u64> {
    1u64.checked_shl(tier_level as u32)
        .and_then(|factor| bucket_size.checked_mul(factor))
}

/// Ranges a directory can register across all tiers up to `max_tier_level`
pub fn directory_capacity(max_tier_level: u8) -> usize {
    RANGES_PER_TIER * (max_tier_level as usize + 1)
}

/// The smallest tier count whose one-range-per-tier coverage reaches `current_price`,
/// bounded by [`MAX_TIER_LEVEL`].
///
/// With one range per tier, tiers 0..=t jointly span `bucket_size * (2^(t+1) - 1)`. Books
/// priced far above their bucket size get coarser tiers to reach down to low prices.
pub fn max_tier_level(bucket_size: u64, current_price: u64) -> u8 {
    let mut tier = 0u8;
    let mut coverage = bucket_size;
    while tier < MAX_TIER_LEVEL && coverage < current_price {
        tier += 1;
        coverage = coverage.saturating_add(bucket_size.saturating_mul(1u64 << tier));
    }
    tier
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::seq::SliceRandom;
    use rand::thread_rng;

    fn range(min_price: u64, max_price: u64) -> PriceRange {
        PriceRange {
            min_price,
            max_price,
            tier_level: 0,
            account: Pubkey::new_unique(),
        }
    }

    #[test]
    fn sorted_registration() {
        let mut directory = DirectoryAccount::init_new(Side::Bid, &Pubkey::new_unique(), 255);
        let mut ranges: Vec<PriceRange> = (0..16).map(|i| range(i * 100, (i + 1) * 100)).collect();
        ranges.shuffle(&mut thread_rng());
        for r in ranges {
            directory.register_range(r, 32).unwrap();
        }
        let bounds: Vec<u64> = directory.price_ranges.iter().map(|r| r.min_price).collect();
        assert_eq!(bounds, (0..16).map(|i| i * 100).collect::<Vec<u64>>());
    }

    #[test]
    fn overlap_rejection() {
        let mut directory = DirectoryAccount::init_new(Side::Ask, &Pubkey::new_unique(), 255);
        directory.register_range(range(100, 200), 8).unwrap();
        directory.register_range(range(300, 400), 8).unwrap();

        for r in [
            range(100, 200),
            range(150, 250),
            range(50, 150),
            range(250, 350),
            range(0, 500),
        ] {
            assert_eq!(
                directory.register_range(r, 8).unwrap_err() as u32,
                OrderbookError::OverlappingPriceRange as u32
            );
        }
        // Exactly adjacent ranges are fine
        directory.register_range(range(200, 300), 8).unwrap();
        assert_eq!(directory.price_ranges.len(), 3);
    }

    #[test]
    fn capacity_limit() {
        let mut directory = DirectoryAccount::init_new(Side::Bid, &Pubkey::new_unique(), 255);
        directory.register_range(range(0, 100), 1).unwrap();
        assert_eq!(
            directory.register_range(range(100, 200), 1).unwrap_err() as u32,
            OrderbookError::DirectoryFull as u32
        );
    }

    #[test]
    fn range_lookup() {
        let mut directory = DirectoryAccount::init_new(Side::Bid, &Pubkey::new_unique(), 255);
        directory.register_range(range(100, 200), 8).unwrap();
        directory.register_range(range(400, 800), 8).unwrap();

        assert_eq!(directory.find_range(100).unwrap().min_price, 100);
        assert_eq!(directory.find_range(199).unwrap().min_price, 100);
        assert_eq!(directory.find_range(400).unwrap().min_price, 400);
        assert!(directory.find_range(99).is_none());
        assert!(directory.find_range(200).is_none());
        assert!(directory.find_range(800).is_none());
    }

    #[test]
    fn tier_geometry() {
        // A book priced within one bucket needs no coarse tiers
        assert_eq!(max_tier_level(1_000_000, 500_000), 0);
        // Coverage with tiers 0..=t is bucket_size * (2^(t+1) - 1)
        assert_eq!(max_tier_level(1_000_000, 3_000_000), 1);
        assert_eq!(max_tier_level(1_000_000, 10_000_000), 3);
        // Far-out prices saturate at the cap
        assert_eq!(max_tier_level(1, u64::MAX), MAX_TIER_LEVEL);

        assert_eq!(range_width(1_000_000, 0), Some(1_000_000));
        assert_eq!(range_width(1_000_000, 3), Some(8_000_000));
    }

    #[test]
    fn serialized_range_size() {
        let r = range(0, 100);
        assert_eq!(r.borsh_len(), PriceRange::LEN);
    }
}
