// Periodic Raffle Program - Errors
use solana_program::{
    decode_error::DecodeError, msg, program_error::PrintProgramError,
    program_error::ProgramError,
};
use thiserror::Error;

/// Errors that may be returned by the raffle program.
///
/// The first six are the caller-visible rejections of the raffle protocol;
/// the rest cover account setup and malformed input.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum RaffleError {
    /// Fee attached to an entry is below the configured entrance fee
    #[error("Entry fee is below the raffle entrance fee")]
    InsufficientFee,

    /// The round is drawing and does not accept entries
    #[error("Round is locked while a draw is in progress")]
    RoundLocked,

    /// A draw was requested while the raffle is not eligible for one
    #[error("Upkeep not needed")]
    UpkeepNotNeeded,

    /// Fulfillment does not match the pending randomness request
    #[error("Unknown randomness request")]
    UnknownRequest,

    /// Fulfillment was not signed by the designated oracle authority
    #[error("Fulfillment caller is not the raffle oracle")]
    UnauthorizedFulfillment,

    /// The pot could not be credited to the selected winner
    #[error("Payout transfer to the winner failed")]
    PayoutTransferFailed,

    /// Invalid instruction data passed
    #[error("Invalid instruction data")]
    InvalidInstructionData,

    #[error("Raffle already initialized")]
    RaffleAlreadyInitialized,

    #[error("Raffle not initialized")]
    RaffleNotInitialized,

    /// Every participant slot of the round is taken
    #[error("Raffle round is full")]
    RaffleFull,

    #[error("Invalid raffle parameters")]
    InvalidRaffleParams,

    /// Stale-draw recovery is disabled or the timeout has not elapsed
    #[error("Pending draw has not timed out")]
    DrawNotStale,

    #[error("Arithmetic overflow")]
    ArithmeticOverflow,

    /// Raffle account address does not match its derived address
    #[error("Invalid raffle account")]
    InvalidRaffleAccount,
}

impl From<RaffleError> for ProgramError {
    fn from(e: RaffleError) -> Self {
        ProgramError::Custom(e as u32)
    }
}

impl<T> DecodeError<T> for RaffleError {
    fn type_of() -> &'static str {
        "Raffle Error"
    }
}

impl PrintProgramError for RaffleError {
    fn print<E>(&self) {
        msg!(&self.to_string());
    }
}

impl RaffleError {
    /// Log the error and convert it, for use at `Err(...)` return sites.
    pub fn log(self) -> ProgramError {
        msg!("Rejected: {}", self);
        self.into()
    }
}
