// Periodic Raffle
// A raffle drawn at a fixed interval with randomness from an external oracle

pub mod config;
pub mod error;
pub mod events;
pub mod instruction;
pub mod ledger;
pub mod oracle;
pub mod processor;
pub mod raffle;
pub mod state;
pub mod upkeep;
pub mod utils;

#[cfg(not(feature = "no-entrypoint"))]
pub mod entrypoint;

use solana_program::{account_info::AccountInfo, entrypoint::ProgramResult, pubkey::Pubkey};

pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    processor::Processor::process(program_id, accounts, instruction_data)
}
