#![warn(missing_docs)]
/*!
Solana on-chain orderbook backed by tiered price-range directories.

## Overview

This program encodes one orderbook per authority as a small family of program-derived
accounts. A fixed-size [`Orderbook`][`state::Orderbook`] header tracks the traded pair and
the book's directory accounts. Each side of the book owns a
[`DirectoryAccount`][`state::DirectoryAccount`]: a sorted table of disjoint
[`PriceRange`][`state::PriceRange`] entries, each pointing at the
[`PriceBucket`][`state::PriceBucket`] account which stores the price levels for that range.

Ranges are registered at a *tier level*. A tier 0 range spans one bucket worth of ticks;
every additional tier doubles the span. The intent is a book that is fine-grained around
the market price and coarse far away from it, without paying rent for empty fine-grained
buckets at prices that will rarely trade. The orderbook's
[`max_tier_level`][`state::Orderbook::max_tier_level`] is derived from the tick size and
the market price at creation time and bounds the tiers a directory will accept.

## Creating an orderbook

The [`create_orderbook`][`fn@instruction::create_orderbook`] primitive creates and
initializes the orderbook header and both directory accounts at their derived addresses.
The directories start empty: no price range is registered and no bucket account exists
until one is explicitly provisioned.

## Registering a price range

The [`create_price_bucket`][`fn@instruction::create_price_bucket`] primitive provisions a
bucket account for a given side, tier and lower price bound, and registers the matching
range in that side's directory. The directory rejects ranges which overlap an existing
registration, are misaligned with their tier's span, or exceed the book's maximum tier.

Order flow itself (posting, matching, cancelling) is the concern of a separate matching
layer and is not part of this program.
*/

#[doc(hidden)]
pub mod entrypoint;
#[doc(hidden)]
pub mod error;
/// Program instructions and their CPI-compatible bindings
pub mod instruction;
/// Describes the different data structures that the program uses to encode state
pub mod state;

use solana_program::declare_id;

#[doc(hidden)]
pub(crate) mod processor;
/// Utility functions
pub mod utils;

declare_id!("5iE7GeaittdpRErnR45x2h9Bj4fmLgqvxmjfk3oSVkXq");
