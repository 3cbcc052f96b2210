// Periodic Raffle Program - Oracle Client
use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{clock::UnixTimestamp, hash::hashv, pubkey::Pubkey};

use crate::error::RaffleError;

/// Opaque identifier correlating a fulfillment with the request that issued it
pub type RequestId = [u8; 32];

/// One random word delivered by the oracle, read as a little-endian
/// 256-bit unsigned integer
pub type RandomWord = [u8; 32];

/// What the oracle is asked for and who pays for it.
#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct OracleRequestConfig {
    /// Gas lane: selects the oracle key and the maximum price paid per request
    pub key_hash: [u8; 32],
    /// Oracle subscription charged for each request
    pub subscription_id: u64,
    /// Confirmations the oracle waits before answering
    pub request_confirmations: u16,
    /// Compute budget the oracle attaches to the fulfillment
    pub callback_gas_limit: u32,
    /// Random words per request
    pub num_words: u32,
}

impl OracleRequestConfig {
    pub const LEN: usize = 32 + 8 + 2 + 4 + 4;
}

/// The single outstanding randomness request
#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingRequest {
    pub request_id: RequestId,
    pub requested_at: UnixTimestamp,
}

impl PendingRequest {
    pub const LEN: usize = 32 + 8;
}

/// Issues randomness requests and recognises the fulfillments that answer
/// them. Only one request may be in flight, so the pending table is a single
/// slot.
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct OracleClient {
    /// The only identity allowed to deliver fulfillments
    pub authority: Pubkey,
    pub config: OracleRequestConfig,
    /// Number of requests issued so far; seeds the next request id
    pub request_nonce: u64,
    pub pending: Option<PendingRequest>,
}

impl OracleClient {
    pub const LEN: usize = 32 + OracleRequestConfig::LEN + 8 + 1 + PendingRequest::LEN;

    pub fn new(authority: Pubkey, config: OracleRequestConfig) -> Self {
        Self {
            authority,
            config,
            request_nonce: 0,
            pending: None,
        }
    }

    /// Id of the `nonce`-th request made on behalf of `raffle`
    pub fn request_id_for(raffle: &Pubkey, nonce: u64) -> RequestId {
        hashv(&[b"request", raffle.as_ref(), &nonce.to_le_bytes()]).to_bytes()
    }

    /// Issue a new request and remember it as pending.
    ///
    /// Ids are derived from a strictly increasing nonce, so an id is never
    /// handed out twice.
    pub fn request(
        &mut self,
        raffle: &Pubkey,
        now: UnixTimestamp,
    ) -> Result<RequestId, RaffleError> {
        if self.pending.is_some() {
            return Err(RaffleError::RoundLocked);
        }
        let nonce = self
            .request_nonce
            .checked_add(1)
            .ok_or(RaffleError::ArithmeticOverflow)?;
        let request_id = Self::request_id_for(raffle, nonce);

        self.request_nonce = nonce;
        self.pending = Some(PendingRequest {
            request_id,
            requested_at: now,
        });
        Ok(request_id)
    }

    pub fn pending_request_id(&self) -> Option<&RequestId> {
        self.pending.as_ref().map(|pending| &pending.request_id)
    }

    pub fn is_pending(&self, request_id: &RequestId) -> bool {
        self.pending_request_id() == Some(request_id)
    }

    /// Only a signature from the configured oracle authority may deliver
    /// randomness.
    pub fn authorize(&self, caller: &Pubkey, is_signer: bool) -> Result<(), RaffleError> {
        if !is_signer || *caller != self.authority {
            return Err(RaffleError::UnauthorizedFulfillment);
        }
        Ok(())
    }

    /// Forget the pending request, returning it
    pub fn resolve(&mut self) -> Option<PendingRequest> {
        self.pending.take()
    }

    /// True when a request has been waiting at least `timeout` seconds.
    /// A timeout of zero never expires.
    pub fn is_stale(&self, now: UnixTimestamp, timeout: i64) -> bool {
        match self.pending {
            Some(pending) if timeout > 0 => now.saturating_sub(pending.requested_at) >= timeout,
            _ => false,
        }
    }
}

/// Reduce a random word modulo the number of participants.
///
/// The whole 256-bit value takes part, so the result is `word mod count`
/// exactly. Returns `None` when there is nobody to pick.
pub fn winner_index(word: &RandomWord, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let modulus = count as u128;
    let index = word
        .iter()
        .rev()
        .fold(0u128, |acc, byte| (acc * 256 + *byte as u128) % modulus);
    Some(index as usize)
}

/// Little-endian word carrying `value`
pub fn word_from_u64(value: u64) -> RandomWord {
    let mut word = [0u8; 32];
    word[..8].copy_from_slice(&value.to_le_bytes());
    word
}
