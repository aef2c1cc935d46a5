//! Provision a price bucket account and register its range in a directory.
use bonfida_utils::{BorshSize, InstructionsAccount};
use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
    program_error::ProgramError,
    pubkey::Pubkey,
    system_program,
};

use crate::{
    error::OrderbookError,
    state::{
        directory::{directory_capacity, range_width},
        find_bucket_address, AccountTag, DirectoryAccount, Orderbook, PriceBucket, PriceRange,
        Side, BUCKET_SEED,
    },
    utils::{
        assert, check_account_key, check_account_owner, check_signer, check_uninitialized,
        create_pda_account,
    },
};

#[derive(BorshDeserialize, BorshSerialize, BorshSize)]
/**
The required arguments for a create_price_bucket instruction.
*/
pub struct Params {
    /// The side of the book the bucket belongs to
    pub side: Side,
    /// Lower price bound of the bucket (inclusive), aligned to the tier's span
    pub min_price: u64,
    /// The tier level to register the bucket's range at
    pub tier_level: u8,
}

/// The required accounts for a create_price_bucket instruction.
#[derive(InstructionsAccount)]
pub struct Accounts<'a, T> {
    /// The system program
    pub system_program: &'a T,
    /// The orderbook authority, which pays for the created account
    #[cons(writable, signer)]
    pub authority: &'a T,
    #[allow(missing_docs)]
    #[cons(writable)]
    pub orderbook: &'a T,
    #[allow(missing_docs)]
    #[cons(writable)]
    pub directory: &'a T,
    #[allow(missing_docs)]
    #[cons(writable)]
    pub bucket: &'a T,
}

impl<'a, 'b: 'a> Accounts<'a, AccountInfo<'b>> {
    pub(crate) fn parse(accounts: &'a [AccountInfo<'b>]) -> Result<Self, ProgramError> {
        let accounts_iter = &mut accounts.iter();

        let a = Self {
            system_program: next_account_info(accounts_iter)?,
            authority: next_account_info(accounts_iter)?,
            orderbook: next_account_info(accounts_iter)?,
            directory: next_account_info(accounts_iter)?,
            bucket: next_account_info(accounts_iter)?,
        };

        check_account_key(
            a.system_program,
            &system_program::ID,
            OrderbookError::WrongSystemProgram,
        )?;
        check_signer(a.authority)?;

        Ok(a)
    }

    pub(crate) fn perform_checks(&self, program_id: &Pubkey) -> Result<(), ProgramError> {
        check_account_owner(
            self.orderbook,
            program_id,
            OrderbookError::WrongOrderbookOwner,
        )?;
        check_account_owner(
            self.directory,
            program_id,
            OrderbookError::WrongDirectoryOwner,
        )?;
        Ok(())
    }
}

/// Apply the create_price_bucket instruction to the provided accounts
pub fn process<'a, 'b: 'a>(
    program_id: &Pubkey,
    accounts: Accounts<'a, AccountInfo<'b>>,
    params: Params,
) -> ProgramResult {
    accounts.perform_checks(program_id)?;

    let Params {
        side,
        min_price,
        tier_level,
    } = params;

    let mut orderbook_guard = accounts.orderbook.data.borrow_mut();
    let orderbook = Orderbook::from_buffer(&mut orderbook_guard, AccountTag::Orderbook)?;

    check_account_key(
        accounts.authority,
        &orderbook.authority,
        OrderbookError::WrongAuthority,
    )?;
    let expected_directory = match side {
        Side::Bid => orderbook.bid_directory,
        Side::Ask => orderbook.ask_directory,
    };
    check_account_key(
        accounts.directory,
        &expected_directory,
        OrderbookError::WrongDirectoryAccount,
    )?;
    assert(
        tier_level <= orderbook.max_tier_level,
        OrderbookError::InvalidTierLevel,
    )?;

    let span = range_width(orderbook.bucket_size, tier_level).ok_or(OrderbookError::Overflow)?;
    assert(min_price % span == 0, OrderbookError::MisalignedPriceRange)?;
    let max_price = min_price
        .checked_add(span)
        .ok_or(OrderbookError::Overflow)?;

    let (bucket_key, bucket_bump) =
        find_bucket_address(accounts.orderbook.key, side, min_price, program_id);
    check_account_key(accounts.bucket, &bucket_key, OrderbookError::WrongBucketAccount)?;
    check_uninitialized(accounts.bucket)?;

    let mut directory = DirectoryAccount::from_account(accounts.directory, side)?;
    directory.register_range(
        PriceRange {
            min_price,
            max_price,
            tier_level,
            account: bucket_key,
        },
        directory_capacity(orderbook.max_tier_level),
    )?;

    let orderbook_bytes = accounts.orderbook.key.to_bytes();
    let min_price_bytes = min_price.to_le_bytes();
    create_pda_account(
        accounts.authority,
        accounts.bucket,
        accounts.system_program,
        PriceBucket::expected_space(),
        program_id,
        &[
            BUCKET_SEED,
            &orderbook_bytes,
            &[side as u8],
            &min_price_bytes,
            &[bucket_bump],
        ],
    )?;

    PriceBucket::init_new(
        accounts.authority.key,
        min_price,
        max_price,
        tier_level,
        bucket_bump,
    )
    .save(accounts.bucket)?;
    directory.save(accounts.directory)?;

    msg!(
        "Price range [{}, {}) registered at tier {}",
        min_price,
        max_price,
        tier_level
    );

    Ok(())
}
