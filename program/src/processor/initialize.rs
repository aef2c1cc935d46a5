//! Confirm the deployed program is reachable.
//!
//! Deployment smoke check. Clients invoke this once after deploying and treat the
//! confirmed transaction signature as proof the program answers.
use solana_program::{account_info::AccountInfo, entrypoint::ProgramResult, msg, pubkey::Pubkey};

/// Apply the initialize instruction
pub fn process(program_id: &Pubkey, _accounts: &[AccountInfo]) -> ProgramResult {
    msg!("Orderbook program {} is live", program_id);
    Ok(())
}
