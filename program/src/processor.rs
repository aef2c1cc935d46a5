use borsh::BorshDeserialize;
use num_traits::FromPrimitive;
use solana_program::{
    account_info::AccountInfo, entrypoint::ProgramResult, msg, program_error::ProgramError,
    pubkey::Pubkey,
};

use crate::instruction::OrderbookInstruction;

#[allow(missing_docs)]
pub mod create_orderbook;
#[allow(missing_docs)]
pub mod create_price_bucket;
#[allow(missing_docs)]
pub mod initialize;

pub struct Processor {}

impl Processor {
    pub fn process_instruction(
        program_id: &Pubkey,
        accounts: &[AccountInfo],
        instruction_data: &[u8],
    ) -> ProgramResult {
        msg!("Beginning processing");
        let (&tag, instruction_data) = instruction_data
            .split_first()
            .ok_or(ProgramError::InvalidInstructionData)?;
        let instruction = OrderbookInstruction::from_u8(tag)
            .ok_or(ProgramError::InvalidInstructionData)?;
        msg!("Instruction unpacked");

        match instruction {
            OrderbookInstruction::Initialize => {
                msg!("Instruction: Initialize");
                initialize::process(program_id, accounts)?;
            }
            OrderbookInstruction::CreateOrderbook => {
                msg!("Instruction: Create Orderbook");
                let params = create_orderbook::Params::try_from_slice(instruction_data)
                    .map_err(|_| ProgramError::InvalidInstructionData)?;
                let accounts = create_orderbook::Accounts::parse(accounts)?;
                create_orderbook::process(program_id, accounts, params)?;
            }
            OrderbookInstruction::CreatePriceBucket => {
                msg!("Instruction: Create Price Bucket");
                let params = create_price_bucket::Params::try_from_slice(instruction_data)
                    .map_err(|_| ProgramError::InvalidInstructionData)?;
                let accounts = create_price_bucket::Accounts::parse(accounts)?;
                create_price_bucket::process(program_id, accounts, params)?;
            }
        }
        Ok(())
    }
}
