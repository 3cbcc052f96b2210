// Periodic Raffle Program - Events
use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{clock::UnixTimestamp, log::sol_log_data, msg, pubkey::Pubkey};

use crate::{oracle::RequestId, utils::lamports_to_sol};

/// Notifications produced by raffle state transitions.
///
/// Each is written to the transaction log as borsh-encoded program data, so
/// indexers and the off-chain oracle can decode them.
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub enum RaffleEvent {
    RaffleInitialized {
        admin: Pubkey,
        entrance_fee: u64,
        interval: i64,
    },
    RaffleEntered {
        participant: Pubkey,
        fee: u64,
        pot: u64,
    },
    /// Outbound randomness request; the oracle answers with `FulfillRandomness`
    WinnerRequested {
        request_id: RequestId,
        key_hash: [u8; 32],
        subscription_id: u64,
        request_confirmations: u16,
        callback_gas_limit: u32,
        num_words: u32,
    },
    WinnerPicked {
        winner: Pubkey,
        payout: u64,
        round_number: u64,
        opened_at: UnixTimestamp,
    },
    DrawReopened {
        request_id: RequestId,
    },
}

impl RaffleEvent {
    /// Write the event to the program log
    pub fn emit(&self) {
        match self {
            Self::RaffleInitialized {
                admin,
                entrance_fee,
                interval,
            } => msg!(
                "Raffle initialized: admin={}, entrance fee={} SOL, interval={}s",
                admin,
                lamports_to_sol(*entrance_fee),
                interval
            ),
            Self::RaffleEntered {
                participant,
                fee,
                pot,
            } => msg!(
                "{} entered with {} SOL, pot is now {} SOL",
                participant,
                lamports_to_sol(*fee),
                lamports_to_sol(*pot)
            ),
            Self::WinnerRequested { request_id, .. } => {
                msg!("Requested randomness: {}", hex(request_id))
            }
            Self::WinnerPicked {
                winner,
                payout,
                round_number,
                ..
            } => msg!(
                "Round {} won by {}: {} SOL paid out",
                round_number,
                winner,
                lamports_to_sol(*payout)
            ),
            Self::DrawReopened { request_id } => {
                msg!("Draw {} timed out, round reopened", hex(request_id))
            }
        }

        match borsh::to_vec(self) {
            Ok(data) => sol_log_data(&[&data]),
            Err(err) => msg!("Failed to encode event: {}", err),
        }
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
