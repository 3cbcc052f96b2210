// Periodic Raffle Program - Round state machine
//
// Open --enter--> Open --start_draw--> Drawing --fulfill--> Open (paid out)
//                                       Drawing --reopen_stale_draw--> Open (round kept)
use solana_program::{clock::UnixTimestamp, msg, program_error::ProgramError, pubkey::Pubkey};

use crate::{
    error::RaffleError,
    events::RaffleEvent,
    oracle::{winner_index, RandomWord, RequestId},
    state::{Raffle, RaffleState},
    upkeep::UpkeepStatus,
};

impl Raffle {
    /// Add `participant` to the open round with `fee_paid` lamports.
    ///
    /// The caller is responsible for actually moving `fee_paid` into the
    /// raffle account in the same transaction.
    pub fn enter(&mut self, participant: Pubkey, fee_paid: u64) -> Result<RaffleEvent, RaffleError> {
        if fee_paid < self.entrance_fee {
            return Err(RaffleError::InsufficientFee);
        }
        if self.state != RaffleState::Open {
            return Err(RaffleError::RoundLocked);
        }
        self.ledger
            .record_entry(participant, fee_paid, self.capacity as usize)?;

        Ok(RaffleEvent::RaffleEntered {
            participant,
            fee: fee_paid,
            pot: self.ledger.pot,
        })
    }

    /// Evaluate every clause of draw eligibility at `now`. Read only.
    pub fn check_upkeep(&self, now: UnixTimestamp) -> UpkeepStatus {
        UpkeepStatus::new(
            self.state == RaffleState::Open,
            self.ledger.elapsed(now) >= self.interval,
            !self.ledger.is_empty(),
            self.ledger.pot > 0,
        )
    }

    pub fn is_eligible_for_draw(&self, now: UnixTimestamp) -> bool {
        self.check_upkeep(now).upkeep_needed
    }

    /// Lock the round and issue a randomness request for it.
    ///
    /// Eligibility is re-checked here, so a keeper acting on a stale
    /// `check_upkeep` answer is simply turned away.
    pub fn start_draw(
        &mut self,
        raffle_key: &Pubkey,
        now: UnixTimestamp,
    ) -> Result<RaffleEvent, RaffleError> {
        let status = self.check_upkeep(now);
        if !status.upkeep_needed {
            msg!(
                "Upkeep not needed: open={}, time passed={}, players={}, pot={}",
                status.is_open,
                status.time_passed,
                self.ledger.len(),
                self.ledger.pot
            );
            return Err(RaffleError::UpkeepNotNeeded);
        }

        let request_id = self.oracle.request(raffle_key, now)?;
        self.state = RaffleState::Drawing;

        let config = self.oracle.config;
        Ok(RaffleEvent::WinnerRequested {
            request_id,
            key_hash: config.key_hash,
            subscription_id: config.subscription_id,
            request_confirmations: config.request_confirmations,
            callback_gas_limit: config.callback_gas_limit,
            num_words: config.num_words,
        })
    }

    /// Consume the randomness for the pending request: pick the winner, pay
    /// the pot through `payout`, and open the next round.
    ///
    /// If `payout` fails nothing changes: the round stays `Drawing` under the
    /// same request id so the fulfillment can be retried.
    pub fn fulfill<F>(
        &mut self,
        request_id: &RequestId,
        random_word: &RandomWord,
        now: UnixTimestamp,
        payout: F,
    ) -> Result<RaffleEvent, RaffleError>
    where
        F: FnOnce(&Pubkey, u64) -> Result<(), ProgramError>,
    {
        if self.state != RaffleState::Drawing || !self.oracle.is_pending(request_id) {
            return Err(RaffleError::UnknownRequest);
        }
        // Drawing implies a non-empty round
        let winner = winner_index(random_word, self.ledger.len())
            .and_then(|index| self.ledger.participant(index))
            .copied()
            .ok_or(RaffleError::UnknownRequest)?;
        let amount = self.ledger.pot;
        let round_number = self
            .round_number
            .checked_add(1)
            .ok_or(RaffleError::ArithmeticOverflow)?;

        payout(&winner, amount).map_err(|err| {
            msg!("Paying {} to {} failed: {}", amount, winner, err);
            RaffleError::PayoutTransferFailed
        })?;

        self.ledger.reset(now);
        self.oracle.resolve();
        self.state = RaffleState::Open;
        self.recent_winner = Some(winner);
        self.round_number = round_number;

        Ok(RaffleEvent::WinnerPicked {
            winner,
            payout: amount,
            round_number,
            opened_at: now,
        })
    }

    /// Entry point for the oracle's callback: authenticate the caller, then
    /// hand the value to [`Raffle::fulfill`] unchanged.
    pub fn on_fulfillment<F>(
        &mut self,
        caller: &Pubkey,
        caller_signed: bool,
        request_id: &RequestId,
        random_word: &RandomWord,
        now: UnixTimestamp,
        payout: F,
    ) -> Result<RaffleEvent, RaffleError>
    where
        F: FnOnce(&Pubkey, u64) -> Result<(), ProgramError>,
    {
        self.oracle.authorize(caller, caller_signed)?;
        self.fulfill(request_id, random_word, now, payout)
    }

    /// Abandon a draw whose request has gone unanswered for `draw_timeout`
    /// seconds. Participants and pot carry over; a late answer to the
    /// abandoned request is rejected as unknown.
    pub fn reopen_stale_draw(&mut self, now: UnixTimestamp) -> Result<RaffleEvent, RaffleError> {
        if self.state != RaffleState::Drawing || !self.oracle.is_stale(now, self.draw_timeout) {
            return Err(RaffleError::DrawNotStale);
        }
        let pending = self.oracle.resolve().ok_or(RaffleError::DrawNotStale)?;
        self.state = RaffleState::Open;

        Ok(RaffleEvent::DrawReopened {
            request_id: pending.request_id,
        })
    }
}
