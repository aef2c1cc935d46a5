//! Create and initialize a new orderbook.
use bonfida_utils::{BorshSize, InstructionsAccount};
use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
    program_error::ProgramError,
    program_pack::Pack,
    pubkey::Pubkey,
    system_program,
};

use crate::{
    error::OrderbookError,
    state::{
        directory::{max_tier_level, PRICE_LEVELS_PER_BUCKET},
        find_directory_address, find_orderbook_address, AccountTag, DirectoryAccount, Orderbook,
        Side, DIRECTORY_SEED, ORDERBOOK_SEED,
    },
    utils::{
        assert, check_account_key, check_account_owner, check_signer, check_uninitialized,
        create_pda_account, round_price,
    },
};

#[derive(BorshDeserialize, BorshSerialize, BorshSize)]
/**
The required arguments for a create_orderbook instruction.
*/
pub struct Params {
    /// The minimum price increment. Prices quoted on the book are multiples of this.
    pub tick_size: u64,
    /// The pair's current market price.
    ///
    /// Only used to derive the directory tier geometry. Rounded down to the tick.
    pub current_price: u64,
}

/// The required accounts for a create_orderbook instruction.
#[derive(InstructionsAccount)]
pub struct Accounts<'a, T> {
    /// The system program
    pub system_program: &'a T,
    /// The orderbook authority, which pays for the created accounts
    #[cons(writable, signer)]
    pub authority: &'a T,
    #[allow(missing_docs)]
    #[cons(writable)]
    pub orderbook: &'a T,
    #[allow(missing_docs)]
    #[cons(writable)]
    pub bid_directory: &'a T,
    #[allow(missing_docs)]
    #[cons(writable)]
    pub ask_directory: &'a T,
    /// The base currency mint
    pub base_mint: &'a T,
    /// The quote currency mint
    pub quote_mint: &'a T,
}

impl<'a, 'b: 'a> Accounts<'a, AccountInfo<'b>> {
    pub(crate) fn parse(accounts: &'a [AccountInfo<'b>]) -> Result<Self, ProgramError> {
        let accounts_iter = &mut accounts.iter();

        let a = Self {
            system_program: next_account_info(accounts_iter)?,
            authority: next_account_info(accounts_iter)?,
            orderbook: next_account_info(accounts_iter)?,
            bid_directory: next_account_info(accounts_iter)?,
            ask_directory: next_account_info(accounts_iter)?,
            base_mint: next_account_info(accounts_iter)?,
            quote_mint: next_account_info(accounts_iter)?,
        };

        check_account_key(
            a.system_program,
            &system_program::ID,
            OrderbookError::WrongSystemProgram,
        )?;
        check_signer(a.authority)?;
        check_account_owner(a.base_mint, &spl_token::ID, OrderbookError::InvalidMint)?;
        check_account_owner(a.quote_mint, &spl_token::ID, OrderbookError::InvalidMint)?;

        Ok(a)
    }
}

/// Apply the create_orderbook instruction to the provided accounts
pub fn process<'a, 'b: 'a>(
    program_id: &Pubkey,
    accounts: Accounts<'a, AccountInfo<'b>>,
    params: Params,
) -> ProgramResult {
    let Params {
        tick_size,
        current_price,
    } = params;

    assert(tick_size > 0, OrderbookError::InvalidTickSize)?;
    let current_price = round_price(tick_size, current_price, Side::Bid);
    assert(current_price > 0, OrderbookError::InvalidPrice)?;

    assert(
        accounts.base_mint.key != accounts.quote_mint.key,
        OrderbookError::IdenticalMints,
    )?;
    spl_token::state::Mint::unpack(&accounts.base_mint.data.borrow())
        .map_err(|_| OrderbookError::InvalidMint)?;
    spl_token::state::Mint::unpack(&accounts.quote_mint.data.borrow())
        .map_err(|_| OrderbookError::InvalidMint)?;

    check_uninitialized(accounts.orderbook)?;
    check_uninitialized(accounts.bid_directory)?;
    check_uninitialized(accounts.ask_directory)?;

    let (orderbook_key, orderbook_bump) = find_orderbook_address(accounts.authority.key, program_id);
    check_account_key(
        accounts.orderbook,
        &orderbook_key,
        OrderbookError::WrongOrderbookAccount,
    )?;
    let (bid_key, bid_bump) = find_directory_address(accounts.authority.key, Side::Bid, program_id);
    check_account_key(
        accounts.bid_directory,
        &bid_key,
        OrderbookError::WrongDirectoryAccount,
    )?;
    let (ask_key, ask_bump) = find_directory_address(accounts.authority.key, Side::Ask, program_id);
    check_account_key(
        accounts.ask_directory,
        &ask_key,
        OrderbookError::WrongDirectoryAccount,
    )?;

    let bucket_size = tick_size
        .checked_mul(PRICE_LEVELS_PER_BUCKET)
        .ok_or(OrderbookError::Overflow)?;
    let max_tier = max_tier_level(bucket_size, current_price);

    let authority_bytes = accounts.authority.key.to_bytes();
    create_pda_account(
        accounts.authority,
        accounts.orderbook,
        accounts.system_program,
        8 + Orderbook::LEN,
        program_id,
        &[ORDERBOOK_SEED, &authority_bytes, &[orderbook_bump]],
    )?;
    let directory_space = DirectoryAccount::expected_space(max_tier);
    create_pda_account(
        accounts.authority,
        accounts.bid_directory,
        accounts.system_program,
        directory_space,
        program_id,
        &[DIRECTORY_SEED, &authority_bytes, Side::Bid.seed(), &[bid_bump]],
    )?;
    create_pda_account(
        accounts.authority,
        accounts.ask_directory,
        accounts.system_program,
        directory_space,
        program_id,
        &[DIRECTORY_SEED, &authority_bytes, Side::Ask.seed(), &[ask_bump]],
    )?;

    let mut orderbook_guard = accounts.orderbook.data.borrow_mut();
    let orderbook = Orderbook::from_buffer(&mut orderbook_guard, AccountTag::Uninitialized)?;
    *orderbook = Orderbook::init_new(
        accounts.authority.key,
        accounts.base_mint.key,
        accounts.quote_mint.key,
        &bid_key,
        &ask_key,
        tick_size,
        bucket_size,
        max_tier,
        orderbook_bump,
    );

    DirectoryAccount::init_new(Side::Bid, accounts.authority.key, bid_bump)
        .save(accounts.bid_directory)?;
    DirectoryAccount::init_new(Side::Ask, accounts.authority.key, ask_bump)
        .save(accounts.ask_directory)?;

    msg!(
        "Orderbook created with authority: {}",
        accounts.authority.key
    );

    Ok(())
}
