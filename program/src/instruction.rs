use bonfida_utils::InstructionsAccount;
use borsh::{BorshDeserialize, BorshSerialize};
use num_derive::FromPrimitive;
use solana_program::{instruction::Instruction, pubkey::Pubkey};

pub use crate::processor::{create_orderbook, create_price_bucket};

#[derive(BorshDeserialize, BorshSerialize, FromPrimitive)]
/// Describes all possible instructions and their required accounts
pub enum OrderbookInstruction {
    /// Confirm the deployed program is reachable.
    ///
    /// This instruction performs no account access and always succeeds.
    ///
    /// Required accounts: none
    Initialize,
    /// Create and initialize a new orderbook with empty bid and ask directories.
    ///
    /// Required accounts
    ///
    /// | index | writable | signer | description                      |
    /// |-------|----------|--------|----------------------------------|
    /// | 0     | ❌       | ❌     | The system program               |
    /// | 1     | ✅       | ✅     | The orderbook authority          |
    /// | 2     | ✅       | ❌     | The orderbook account            |
    /// | 3     | ✅       | ❌     | The bid directory account        |
    /// | 4     | ✅       | ❌     | The ask directory account        |
    /// | 5     | ❌       | ❌     | The base currency mint           |
    /// | 6     | ❌       | ❌     | The quote currency mint          |
    CreateOrderbook,
    /// Provision a price bucket account and register its range in a directory.
    ///
    /// Required accounts
    ///
    /// | index | writable | signer | description                      |
    /// |-------|----------|--------|----------------------------------|
    /// | 0     | ❌       | ❌     | The system program               |
    /// | 1     | ✅       | ✅     | The orderbook authority          |
    /// | 2     | ✅       | ❌     | The orderbook account            |
    /// | 3     | ✅       | ❌     | The directory account            |
    /// | 4     | ✅       | ❌     | The price bucket account         |
    CreatePriceBucket,
}

/**
Confirm the deployed program is reachable.

The one observable effect is the confirmed transaction itself: the instruction touches no
accounts and emits a log line.
*/
pub fn initialize(program_id: Pubkey) -> Instruction {
    Instruction {
        program_id,
        accounts: vec![],
        data: vec![OrderbookInstruction::Initialize as u8],
    }
}

/**
Create and initialize a new orderbook.

The orderbook account and both directory accounts are created by the program at their
derived addresses, with the authority paying rent. The directories start with no
registered price ranges.

* The orderbook account will only contain an [`Orderbook`](`crate::state::Orderbook`)
object and is sized exactly for it.

* Each directory account will contain a
[`DirectoryAccount`](`crate::state::DirectoryAccount`) object, sized for the full range
table its tier geometry admits (see
[`expected_space`](`crate::state::DirectoryAccount::expected_space`)).
*/
pub fn create_orderbook(
    program_id: Pubkey,
    accounts: create_orderbook::Accounts<Pubkey>,
    params: create_orderbook::Params,
) -> Instruction {
    accounts.get_instruction(
        program_id,
        OrderbookInstruction::CreateOrderbook as u8,
        params,
    )
}

/**
Provision a price bucket account and register its range in a directory.

The bucket covers `[min_price, min_price + span)` where `span` is the orderbook's bucket
size shifted left by the tier level. The lower bound must be aligned to the span, and the
resulting range must not overlap any registration already present in the directory.
*/
pub fn create_price_bucket(
    program_id: Pubkey,
    accounts: create_price_bucket::Accounts<Pubkey>,
    params: create_price_bucket::Params,
) -> Instruction {
    accounts.get_instruction(
        program_id,
        OrderbookInstruction::CreatePriceBucket as u8,
        params,
    )
}
