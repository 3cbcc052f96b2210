// Periodic Raffle Program - State
use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{
    account_info::AccountInfo, clock::UnixTimestamp, msg, program_error::ProgramError,
    pubkey::Pubkey,
};

use crate::{
    config::RaffleParams,
    error::RaffleError,
    ledger::RoundLedger,
    oracle::{OracleClient, RequestId},
    utils::RAFFLE_SEED,
};

/// Lifecycle of a raffle round
#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RaffleState {
    /// Entries accepted, no randomness request outstanding
    Open,
    /// Entries rejected, waiting on exactly one randomness request
    Drawing,
}

/// Raffle account data.
///
/// Holds the configuration, the current round and the oracle correlation
/// state. The pot itself is kept as lamports on this account, above its
/// rent-exempt reserve.
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct Raffle {
    /// Is the account initialized
    pub is_initialized: bool,
    /// Bump of the raffle PDA
    pub bump: u8,
    /// Creator of the raffle, who paid for the account
    pub admin: Pubkey,
    /// Minimum fee per entry in lamports
    pub entrance_fee: u64,
    /// Seconds a round stays open before a draw may start
    pub interval: i64,
    /// Seconds before an unanswered draw may be reopened (0 = never)
    pub draw_timeout: i64,
    /// Maximum entries per round; the account is sized for it
    pub capacity: u32,
    pub state: RaffleState,
    /// Winner of the last completed round
    pub recent_winner: Option<Pubkey>,
    /// Completed payouts so far
    pub round_number: u64,
    pub oracle: OracleClient,
    pub ledger: RoundLedger,
}

impl Raffle {
    const HEADER_LEN: usize = 1 + 1 + 32 + 8 + 8 + 8 + 4 + 1 + (1 + 32) + 8 + OracleClient::LEN;

    /// Account size needed for a raffle with room for `capacity` entries
    pub const fn space(capacity: u32) -> usize {
        Self::HEADER_LEN + RoundLedger::space(capacity as usize)
    }

    pub fn new(
        admin: Pubkey,
        bump: u8,
        oracle_authority: Pubkey,
        params: &RaffleParams,
        now: UnixTimestamp,
    ) -> Self {
        Self {
            is_initialized: true,
            bump,
            admin,
            entrance_fee: params.entrance_fee,
            interval: params.interval,
            draw_timeout: params.draw_timeout,
            capacity: params.capacity,
            state: RaffleState::Open,
            recent_winner: None,
            round_number: 0,
            oracle: OracleClient::new(oracle_authority, params.oracle),
            ledger: RoundLedger::new(now),
        }
    }

    /// Decode raffle data. Trailing bytes left over from a larger round are
    /// ignored.
    pub fn unpack(src: &[u8]) -> Result<Self, ProgramError> {
        let raffle =
            Self::deserialize(&mut &src[..]).map_err(|_| ProgramError::InvalidAccountData)?;
        if !raffle.is_initialized {
            return Err(RaffleError::RaffleNotInitialized.into());
        }
        Ok(raffle)
    }

    pub fn pack(&self, dst: &mut [u8]) -> Result<(), ProgramError> {
        let mut writer = dst;
        self.serialize(&mut writer)
            .map_err(|_| ProgramError::AccountDataTooSmall)
    }

    /// Read the raffle held by `raffle_info`, which must belong to this program
    pub fn load(raffle_info: &AccountInfo, program_id: &Pubkey) -> Result<Self, ProgramError> {
        if raffle_info.owner != program_id {
            msg!("Raffle account must be owned by this program");
            return Err(ProgramError::IncorrectProgramId);
        }
        let raffle = Self::unpack(&raffle_info.try_borrow_data()?)?;

        let expected = Pubkey::create_program_address(
            &[RAFFLE_SEED, raffle.admin.as_ref(), &[raffle.bump]],
            program_id,
        )
        .map_err(|_| RaffleError::InvalidRaffleAccount)?;
        if expected != *raffle_info.key {
            msg!("Raffle account does not match its derived address");
            return Err(RaffleError::InvalidRaffleAccount.into());
        }
        Ok(raffle)
    }

    pub fn save(&self, raffle_info: &AccountInfo) -> Result<(), ProgramError> {
        let mut data = raffle_info.try_borrow_mut_data()?;
        self.pack(&mut data)
    }

    pub fn state(&self) -> RaffleState {
        self.state
    }

    pub fn entrance_fee(&self) -> u64 {
        self.entrance_fee
    }

    pub fn interval(&self) -> i64 {
        self.interval
    }

    pub fn player(&self, index: usize) -> Option<&Pubkey> {
        self.ledger.participant(index)
    }

    pub fn number_of_players(&self) -> usize {
        self.ledger.len()
    }

    pub fn participants(&self) -> &[Pubkey] {
        &self.ledger.participants
    }

    pub fn pot(&self) -> u64 {
        self.ledger.pot
    }

    /// Start of the current round
    pub fn latest_timestamp(&self) -> UnixTimestamp {
        self.ledger.opened_at
    }

    pub fn recent_winner(&self) -> Option<&Pubkey> {
        self.recent_winner.as_ref()
    }

    pub fn pending_request_id(&self) -> Option<&RequestId> {
        self.oracle.pending_request_id()
    }

    pub fn request_confirmations(&self) -> u16 {
        self.oracle.config.request_confirmations
    }

    pub fn num_words(&self) -> u32 {
        self.oracle.config.num_words
    }
}
