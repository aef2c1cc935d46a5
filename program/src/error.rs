use num_derive::FromPrimitive;
use solana_program::{decode_error::DecodeError, program_error::ProgramError};
use thiserror::Error;

#[derive(Clone, Debug, Error, FromPrimitive)]
pub enum OrderbookError {
    #[error("This account is already initialized")]
    AlreadyInitialized,
    #[error("An invalid orderbook account has been provided")]
    WrongOrderbookAccount,
    #[error("The orderbook account should be owned by this program")]
    WrongOrderbookOwner,
    #[error("An invalid directory account has been provided")]
    WrongDirectoryAccount,
    #[error("The directory account should be owned by this program")]
    WrongDirectoryOwner,
    #[error("An invalid price bucket account has been provided")]
    WrongBucketAccount,
    #[error("An invalid orderbook authority has been provided")]
    WrongAuthority,
    #[error("An invalid system program account has been provided")]
    WrongSystemProgram,
    #[error("The tick size must be > 0")]
    InvalidTickSize,
    #[error("Prices must be positive multiples of the tick size")]
    InvalidPrice,
    #[error("An invalid SPL token mint has been provided")]
    InvalidMint,
    #[error("The base and quote mints must be distinct")]
    IdenticalMints,
    #[error("The tier level exceeds the orderbook's maximum")]
    InvalidTierLevel,
    #[error("The price range is not aligned to its tier's span")]
    MisalignedPriceRange,
    #[error("The price range overlaps an existing registration")]
    OverlappingPriceRange,
    #[error("The directory is full")]
    DirectoryFull,
    #[error("Numerical overflow")]
    Overflow,
}

impl From<OrderbookError> for ProgramError {
    fn from(e: OrderbookError) -> Self {
        ProgramError::Custom(e as u32)
    }
}

impl<T> DecodeError<T> for OrderbookError {
    fn type_of() -> &'static str {
        "OrderbookError"
    }
}
