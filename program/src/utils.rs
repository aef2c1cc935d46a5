use solana_program::{
    account_info::AccountInfo,
    entrypoint::ProgramResult,
    program::invoke_signed,
    program_error::ProgramError,
    pubkey::Pubkey,
    rent::Rent,
    system_instruction,
    sysvar::Sysvar,
};

use crate::{error::OrderbookError, state::Side};

pub fn assert(statement: bool, err: OrderbookError) -> Result<(), OrderbookError> {
    if !statement {
        Err(err)
    } else {
        Ok(())
    }
}

// Safety verification functions
pub fn check_account_key(
    account: &AccountInfo,
    key: &Pubkey,
    error: OrderbookError,
) -> Result<(), OrderbookError> {
    if account.key != key {
        return Err(error);
    }
    Ok(())
}

pub fn check_account_owner(
    account: &AccountInfo,
    owner: &Pubkey,
    error: OrderbookError,
) -> Result<(), OrderbookError> {
    if account.owner != owner {
        return Err(error);
    }
    Ok(())
}

pub fn check_signer(account: &AccountInfo) -> ProgramResult {
    if !(account.is_signer) {
        return Err(ProgramError::MissingRequiredSignature);
    }
    Ok(())
}

pub fn check_uninitialized(account: &AccountInfo) -> Result<(), OrderbookError> {
    if !account.data_is_empty() {
        return Err(OrderbookError::AlreadyInitialized);
    }
    Ok(())
}

/// Creates a rent-exempt program-owned account at a derived address.
///
/// The seeds must include the bump and match the account's address.
pub(crate) fn create_pda_account<'a>(
    payer: &AccountInfo<'a>,
    account: &AccountInfo<'a>,
    system_program: &AccountInfo<'a>,
    space: usize,
    owner: &Pubkey,
    seeds: &[&[u8]],
) -> ProgramResult {
    let rent = Rent::get()?;
    invoke_signed(
        &system_instruction::create_account(
            payer.key,
            account.key,
            rent.minimum_balance(space),
            space as u64,
            owner,
        ),
        &[payer.clone(), account.clone(), system_program.clone()],
        &[seeds],
    )
}

pub(crate) fn round_price(tick_size: u64, limit_price: u64, side: Side) -> u64 {
    match side {
        // Round down
        Side::Bid => tick_size * (limit_price / tick_size),
        // Round up
        Side::Ask => tick_size * ((limit_price + tick_size - 1) / tick_size),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_rounding() {
        assert_eq!(round_price(10, 105, Side::Bid), 100);
        assert_eq!(round_price(10, 105, Side::Ask), 110);
        assert_eq!(round_price(10, 100, Side::Bid), 100);
        assert_eq!(round_price(10, 100, Side::Ask), 100);
    }
}
