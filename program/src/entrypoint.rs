use crate::error::OrderbookError;
use crate::processor::Processor;
use num_traits::FromPrimitive;
use solana_program::{
    account_info::AccountInfo, decode_error::DecodeError, entrypoint::ProgramResult, msg,
    program_error::PrintProgramError, pubkey::Pubkey,
};

#[cfg(not(feature = "no-entrypoint"))]
use solana_program::entrypoint;
#[cfg(not(feature = "no-entrypoint"))]
entrypoint!(process_instruction);

/// The entrypoint to the tiered orderbook program
pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    msg!("Entrypoint");
    if let Err(error) = Processor::process_instruction(program_id, accounts, instruction_data) {
        // catch the error so we can print it
        error.print::<OrderbookError>();
        return Err(error);
    }
    Ok(())
}

impl PrintProgramError for OrderbookError {
    fn print<E>(&self)
    where
        E: 'static + std::error::Error + DecodeError<E> + PrintProgramError + FromPrimitive,
    {
        match self {
            OrderbookError::AlreadyInitialized => {
                msg!("Error: This account is already initialized")
            }
            OrderbookError::WrongOrderbookAccount => {
                msg!("Error: An invalid orderbook account has been provided")
            }
            OrderbookError::WrongOrderbookOwner => {
                msg!("Error: The orderbook account should be owned by this program")
            }
            OrderbookError::WrongDirectoryAccount => {
                msg!("Error: An invalid directory account has been provided")
            }
            OrderbookError::WrongDirectoryOwner => {
                msg!("Error: The directory account should be owned by this program")
            }
            OrderbookError::WrongBucketAccount => {
                msg!("Error: An invalid price bucket account has been provided")
            }
            OrderbookError::WrongAuthority => {
                msg!("Error: An invalid orderbook authority has been provided")
            }
            OrderbookError::WrongSystemProgram => {
                msg!("Error: An invalid system program account has been provided")
            }
            OrderbookError::InvalidTickSize => msg!("Error: The tick size must be > 0"),
            OrderbookError::InvalidPrice => {
                msg!("Error: Prices must be positive multiples of the tick size")
            }
            OrderbookError::InvalidMint => {
                msg!("Error: An invalid SPL token mint has been provided")
            }
            OrderbookError::IdenticalMints => {
                msg!("Error: The base and quote mints must be distinct")
            }
            OrderbookError::InvalidTierLevel => {
                msg!("Error: The tier level exceeds the orderbook's maximum")
            }
            OrderbookError::MisalignedPriceRange => {
                msg!("Error: The price range is not aligned to its tier's span")
            }
            OrderbookError::OverlappingPriceRange => {
                msg!("Error: The price range overlaps an existing registration")
            }
            OrderbookError::DirectoryFull => msg!("Error: The directory is full"),
            OrderbookError::Overflow => msg!("Error: Numerical overflow"),
        }
    }
}
