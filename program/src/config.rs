// Periodic Raffle Program - Configuration
use borsh::{BorshDeserialize, BorshSerialize};

use crate::{error::RaffleError, oracle::OracleRequestConfig, utils::sol_fraction};

/// Largest round the raffle account can be sized for
pub const MAX_CAPACITY: u32 = 256;

/// 30 gwei gas lane
pub const DEFAULT_KEY_HASH: [u8; 32] = [
    0xd8, 0x9b, 0x2b, 0xf1, 0x50, 0xe3, 0xb9, 0xe1, 0x34, 0x46, 0x98, 0x6e, 0x57, 0x1f, 0xb9, 0xca,
    0xb2, 0x4b, 0x13, 0xce, 0xa0, 0xa4, 0x3e, 0xa2, 0x0a, 0x60, 0x49, 0xa8, 0x5c, 0xc8, 0x07, 0xcc,
];

const DEFAULT_ENTRANCE_FEE: u64 = sol_fraction(1, 100);
const DEFAULT_INTERVAL: i64 = 30;
const DEFAULT_DRAW_TIMEOUT: i64 = 60 * 60;
const DEFAULT_CAPACITY: u32 = 64;
const DEFAULT_CALLBACK_GAS_LIMIT: u32 = 500_000;
const DEFAULT_REQUEST_CONFIRMATIONS: u16 = 3;
const DEFAULT_NUM_WORDS: u32 = 1;

/// Parameters fixed when a raffle is created
#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RaffleParams {
    /// Minimum fee per entry, in lamports
    pub entrance_fee: u64,
    /// Seconds a round stays open before it may be drawn
    pub interval: i64,
    /// Seconds after which an unanswered draw may be reopened; 0 disables
    pub draw_timeout: i64,
    /// Maximum entries per round
    pub capacity: u32,
    pub oracle: OracleRequestConfig,
}

impl RaffleParams {
    /// Local validator with a mock oracle
    pub fn localnet() -> Self {
        Self::with_subscription(0)
    }

    /// Public test cluster, charged to `subscription_id`
    pub fn devnet(subscription_id: u64) -> Self {
        Self::with_subscription(subscription_id)
    }

    fn with_subscription(subscription_id: u64) -> Self {
        Self {
            entrance_fee: DEFAULT_ENTRANCE_FEE,
            interval: DEFAULT_INTERVAL,
            draw_timeout: DEFAULT_DRAW_TIMEOUT,
            capacity: DEFAULT_CAPACITY,
            oracle: OracleRequestConfig {
                key_hash: DEFAULT_KEY_HASH,
                subscription_id,
                request_confirmations: DEFAULT_REQUEST_CONFIRMATIONS,
                callback_gas_limit: DEFAULT_CALLBACK_GAS_LIMIT,
                num_words: DEFAULT_NUM_WORDS,
            },
        }
    }

    pub fn validate(&self) -> Result<(), RaffleError> {
        let valid = self.entrance_fee > 0
            && self.interval > 0
            && self.draw_timeout >= 0
            && (1..=MAX_CAPACITY).contains(&self.capacity)
            && self.oracle.num_words > 0
            && self.oracle.callback_gas_limit > 0;

        if valid {
            Ok(())
        } else {
            Err(RaffleError::InvalidRaffleParams)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        let local = RaffleParams::localnet();
        assert_eq!(local.validate(), Ok(()));
        assert_eq!(local.entrance_fee, 10_000_000);
        assert_eq!(local.interval, 30);
        assert_eq!(local.oracle.callback_gas_limit, 500_000);

        let devnet = RaffleParams::devnet(7540);
        assert_eq!(devnet.validate(), Ok(()));
        assert_eq!(devnet.oracle.subscription_id, 7540);
    }

    #[test]
    fn rejects_unusable_params() {
        let broken = [
            RaffleParams {
                entrance_fee: 0,
                ..RaffleParams::localnet()
            },
            RaffleParams {
                interval: 0,
                ..RaffleParams::localnet()
            },
            RaffleParams {
                draw_timeout: -1,
                ..RaffleParams::localnet()
            },
            RaffleParams {
                capacity: 0,
                ..RaffleParams::localnet()
            },
            RaffleParams {
                capacity: MAX_CAPACITY + 1,
                ..RaffleParams::localnet()
            },
        ];
        for params in broken {
            assert_eq!(params.validate(), Err(RaffleError::InvalidRaffleParams));
        }

        let mut params = RaffleParams::localnet();
        params.oracle.num_words = 0;
        assert_eq!(params.validate(), Err(RaffleError::InvalidRaffleParams));
    }
}
