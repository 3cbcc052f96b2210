// Periodic Raffle Program - Utility Functions
use solana_program::{account_info::AccountInfo, program_error::ProgramError, pubkey::Pubkey};

use crate::error::RaffleError;

pub const RAFFLE_SEED: &[u8] = b"raffle";

const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Find the program derived address of the raffle created by `admin`
pub fn find_raffle_address(program_id: &Pubkey, admin: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[RAFFLE_SEED, admin.as_ref()], program_id)
}

/// Move lamports out of a program-owned account into `to`.
///
/// Both balances are updated with checked arithmetic, so either both change
/// or neither does.
pub fn move_lamports(
    from: &AccountInfo,
    to: &AccountInfo,
    amount: u64,
) -> Result<(), ProgramError> {
    let from_balance = from
        .lamports()
        .checked_sub(amount)
        .ok_or(RaffleError::ArithmeticOverflow)?;
    let to_balance = to
        .lamports()
        .checked_add(amount)
        .ok_or(RaffleError::ArithmeticOverflow)?;

    **from.try_borrow_mut_lamports()? = from_balance;
    **to.try_borrow_mut_lamports()? = to_balance;
    Ok(())
}

/// Convert lamports to SOL (for display purposes)
pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}

/// Convert a whole fraction of a SOL to lamports: `sol_fraction(1, 100)` is 0.01 SOL
pub const fn sol_fraction(numerator: u64, denominator: u64) -> u64 {
    numerator * LAMPORTS_PER_SOL / denominator
}
