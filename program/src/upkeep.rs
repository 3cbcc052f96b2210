// Periodic Raffle Program - Upkeep
use borsh::{BorshDeserialize, BorshSerialize};

/// Outcome of the eligibility check, clause by clause.
///
/// A keeper only needs `upkeep_needed`; the individual flags explain a
/// refusal the same way the `UpkeepNotNeeded` log line does.
#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpkeepStatus {
    pub upkeep_needed: bool,
    pub is_open: bool,
    pub time_passed: bool,
    pub has_players: bool,
    pub has_balance: bool,
}

impl UpkeepStatus {
    pub fn new(is_open: bool, time_passed: bool, has_players: bool, has_balance: bool) -> Self {
        Self {
            upkeep_needed: is_open && time_passed && has_players && has_balance,
            is_open,
            time_passed,
            has_players,
            has_balance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn needs_every_clause() {
        assert!(UpkeepStatus::new(true, true, true, true).upkeep_needed);
        assert!(!UpkeepStatus::new(false, true, true, true).upkeep_needed);
        assert!(!UpkeepStatus::new(true, false, true, true).upkeep_needed);
        assert!(!UpkeepStatus::new(true, true, false, true).upkeep_needed);
        assert!(!UpkeepStatus::new(true, true, true, false).upkeep_needed);
    }
}
