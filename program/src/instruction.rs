// Periodic Raffle Program - Instructions
use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{
    instruction::{AccountMeta, Instruction},
    program_error::ProgramError,
    pubkey::Pubkey,
    system_program,
};

use crate::{
    config::RaffleParams,
    error::RaffleError,
    oracle::{RandomWord, RequestId},
    utils::find_raffle_address,
};

#[derive(Clone, Debug, PartialEq)]
pub enum RaffleInstruction {
    /// Create a raffle and open its first round
    ///
    /// Accounts expected:
    /// 0. `[signer, writable]` The admin, who pays for the raffle account
    /// 1. `[writable]` The raffle account (PDA of `["raffle", admin]`)
    /// 2. `[]` The oracle authority allowed to fulfill randomness requests
    /// 3. `[]` The system program
    InitializeRaffle { params: RaffleParams },

    /// Enter the current round, paying `fee` lamports into the pot
    ///
    /// Accounts expected:
    /// 0. `[signer, writable]` The participant
    /// 1. `[writable]` The raffle account
    /// 2. `[]` The system program
    Enter { fee: u64 },

    /// Report whether a draw is due; the answer is set as return data
    /// (borsh `UpkeepStatus`)
    ///
    /// Accounts expected:
    /// 0. `[]` The raffle account
    CheckUpkeep,

    /// Start a draw if one is due (anyone may act as keeper)
    ///
    /// Accounts expected:
    /// 0. `[signer]` The keeper
    /// 1. `[writable]` The raffle account
    PerformUpkeep,

    /// Deliver the random word answering the pending request
    ///
    /// Accounts expected:
    /// 0. `[signer]` The oracle authority
    /// 1. `[writable]` The raffle account
    /// 2. `[writable]` The winning participant
    FulfillRandomness {
        request_id: RequestId,
        random_word: RandomWord,
    },

    /// Reopen a round whose draw request timed out
    ///
    /// Accounts expected:
    /// 0. `[signer]` Any user
    /// 1. `[writable]` The raffle account
    ReopenStaleDraw,
}

impl RaffleInstruction {
    /// Unpacks a byte buffer into a RaffleInstruction
    pub fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        let (tag, rest) = input
            .split_first()
            .ok_or(RaffleError::InvalidInstructionData)?;

        Ok(match tag {
            0 => {
                let params = RaffleParams::try_from_slice(rest)
                    .map_err(|_| RaffleError::InvalidInstructionData)?;
                Self::InitializeRaffle { params }
            }
            1 => {
                let (fee, _) = Self::unpack_u64(rest)?;
                Self::Enter { fee }
            }
            2 => Self::CheckUpkeep,
            3 => Self::PerformUpkeep,
            4 => {
                let (request_id, rest) = Self::unpack_fixed_bytes::<32>(rest)?;
                let (random_word, _) = Self::unpack_fixed_bytes::<32>(rest)?;
                Self::FulfillRandomness {
                    request_id,
                    random_word,
                }
            }
            5 => Self::ReopenStaleDraw,
            _ => return Err(RaffleError::InvalidInstructionData.into()),
        })
    }

    /// Packs a RaffleInstruction into a byte buffer
    pub fn pack(&self) -> Result<Vec<u8>, ProgramError> {
        let mut buf = Vec::new();
        match self {
            Self::InitializeRaffle { params } => {
                buf.push(0);
                params
                    .serialize(&mut buf)
                    .map_err(|_| RaffleError::InvalidInstructionData)?;
            }
            Self::Enter { fee } => {
                buf.push(1);
                buf.extend_from_slice(&fee.to_le_bytes());
            }
            Self::CheckUpkeep => buf.push(2),
            Self::PerformUpkeep => buf.push(3),
            Self::FulfillRandomness {
                request_id,
                random_word,
            } => {
                buf.push(4);
                buf.extend_from_slice(request_id);
                buf.extend_from_slice(random_word);
            }
            Self::ReopenStaleDraw => buf.push(5),
        }
        Ok(buf)
    }

    fn unpack_u64(input: &[u8]) -> Result<(u64, &[u8]), ProgramError> {
        let (bytes, rest) = Self::unpack_fixed_bytes::<8>(input)?;
        Ok((u64::from_le_bytes(bytes), rest))
    }

    fn unpack_fixed_bytes<const N: usize>(input: &[u8]) -> Result<([u8; N], &[u8]), ProgramError> {
        if input.len() < N {
            return Err(RaffleError::InvalidInstructionData.into());
        }
        let (bytes, rest) = input.split_at(N);
        let bytes = bytes
            .try_into()
            .map_err(|_| RaffleError::InvalidInstructionData)?;
        Ok((bytes, rest))
    }
}

/// Creates an `InitializeRaffle` instruction
pub fn initialize_raffle(
    program_id: &Pubkey,
    admin: &Pubkey,
    oracle_authority: &Pubkey,
    params: RaffleParams,
) -> Result<Instruction, ProgramError> {
    let (raffle, _) = find_raffle_address(program_id, admin);
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*admin, true),
            AccountMeta::new(raffle, false),
            AccountMeta::new_readonly(*oracle_authority, false),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        data: RaffleInstruction::InitializeRaffle { params }.pack()?,
    })
}

/// Creates an `Enter` instruction
pub fn enter(
    program_id: &Pubkey,
    participant: &Pubkey,
    raffle: &Pubkey,
    fee: u64,
) -> Result<Instruction, ProgramError> {
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*participant, true),
            AccountMeta::new(*raffle, false),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        data: RaffleInstruction::Enter { fee }.pack()?,
    })
}

/// Creates a `CheckUpkeep` instruction
pub fn check_upkeep(program_id: &Pubkey, raffle: &Pubkey) -> Result<Instruction, ProgramError> {
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![AccountMeta::new_readonly(*raffle, false)],
        data: RaffleInstruction::CheckUpkeep.pack()?,
    })
}

/// Creates a `PerformUpkeep` instruction
pub fn perform_upkeep(
    program_id: &Pubkey,
    keeper: &Pubkey,
    raffle: &Pubkey,
) -> Result<Instruction, ProgramError> {
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*keeper, true),
            AccountMeta::new(*raffle, false),
        ],
        data: RaffleInstruction::PerformUpkeep.pack()?,
    })
}

/// Creates a `FulfillRandomness` instruction
pub fn fulfill_randomness(
    program_id: &Pubkey,
    oracle_authority: &Pubkey,
    raffle: &Pubkey,
    winner: &Pubkey,
    request_id: RequestId,
    random_word: RandomWord,
) -> Result<Instruction, ProgramError> {
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*oracle_authority, true),
            AccountMeta::new(*raffle, false),
            AccountMeta::new(*winner, false),
        ],
        data: RaffleInstruction::FulfillRandomness {
            request_id,
            random_word,
        }
        .pack()?,
    })
}

/// Creates a `ReopenStaleDraw` instruction
pub fn reopen_stale_draw(
    program_id: &Pubkey,
    caller: &Pubkey,
    raffle: &Pubkey,
) -> Result<Instruction, ProgramError> {
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*caller, true),
            AccountMeta::new(*raffle, false),
        ],
        data: RaffleInstruction::ReopenStaleDraw.pack()?,
    })
}
