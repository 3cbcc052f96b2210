// Periodic Raffle Program - Round Ledger
use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{clock::UnixTimestamp, pubkey::Pubkey};

use crate::error::RaffleError;

/// Participants and pot of the round currently being played.
///
/// Entry order is preserved: the winner index taken from the oracle's random
/// word indexes straight into `participants`.
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct RoundLedger {
    /// Start of the interval clock for this round
    pub opened_at: UnixTimestamp,
    /// Sum of every fee accepted since the last payout, in lamports
    pub pot: u64,
    /// One slot per accepted entry
    pub participants: Vec<Pubkey>,
}

impl RoundLedger {
    /// Serialized size of a ledger holding `capacity` participants
    pub const fn space(capacity: usize) -> usize {
        8 + 8 + 4 + 32 * capacity
    }

    pub fn new(opened_at: UnixTimestamp) -> Self {
        Self {
            opened_at,
            pot: 0,
            participants: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Append an entry. Nothing changes unless both the slot and the pot
    /// update fit.
    pub fn record_entry(
        &mut self,
        participant: Pubkey,
        fee: u64,
        capacity: usize,
    ) -> Result<(), RaffleError> {
        if self.participants.len() >= capacity {
            return Err(RaffleError::RaffleFull);
        }
        let pot = self
            .pot
            .checked_add(fee)
            .ok_or(RaffleError::ArithmeticOverflow)?;

        self.participants.push(participant);
        self.pot = pot;
        Ok(())
    }

    pub fn participant(&self, index: usize) -> Option<&Pubkey> {
        self.participants.get(index)
    }

    /// Seconds elapsed since the round opened, saturating at zero if the
    /// clock reads earlier than `opened_at`
    pub fn elapsed(&self, now: UnixTimestamp) -> i64 {
        now.saturating_sub(self.opened_at).max(0)
    }

    /// Start a fresh round at `now`
    pub fn reset(&mut self, now: UnixTimestamp) {
        self.participants.clear();
        self.pot = 0;
        self.opened_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pot_tracks_entries_in_order() {
        let mut ledger = RoundLedger::new(1_000);
        let players: Vec<Pubkey> = (0..3).map(|_| Pubkey::new_unique()).collect();

        for (fee, player) in [10u64, 25, 10].into_iter().zip(&players) {
            ledger.record_entry(*player, fee, 8).unwrap();
        }

        assert_eq!(ledger.pot, 45);
        assert_eq!(ledger.participants, players);
        assert_eq!(ledger.participant(1), Some(&players[1]));
        assert_eq!(ledger.participant(3), None);
    }

    #[test]
    fn full_round_rejects_without_mutation() {
        let mut ledger = RoundLedger::new(0);
        ledger.record_entry(Pubkey::new_unique(), 5, 1).unwrap();

        assert_eq!(
            ledger.record_entry(Pubkey::new_unique(), 5, 1),
            Err(RaffleError::RaffleFull)
        );
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.pot, 5);
    }

    #[test]
    fn overflowing_pot_rejects_without_mutation() {
        let mut ledger = RoundLedger::new(0);
        ledger.record_entry(Pubkey::new_unique(), u64::MAX, 4).unwrap();

        assert_eq!(
            ledger.record_entry(Pubkey::new_unique(), 1, 4),
            Err(RaffleError::ArithmeticOverflow)
        );
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn reset_starts_a_new_round() {
        let mut ledger = RoundLedger::new(100);
        ledger.record_entry(Pubkey::new_unique(), 7, 4).unwrap();
        assert_eq!(ledger.elapsed(130), 30);
        assert_eq!(ledger.elapsed(50), 0);

        ledger.reset(200);
        assert_eq!(ledger, RoundLedger::new(200));
    }
}
