//! Player input records
//!
//! Player identity is the caller-supplied platform account id; it is never
//! generated or rewritten by the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Input record for creating or updating a player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerInput {
    pub account_id: String,
    pub balance: i64,
    pub last_daily: DateTime<Utc>,
    pub daily_streak: i32,
}

impl PlayerInput {
    /// Fresh player record: zero balance, zero streak, last daily claim
    /// stamped now.
    pub fn fresh(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            balance: 0,
            last_daily: Utc::now(),
            daily_streak: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_player_starts_empty() {
        let input = PlayerInput::fresh("acct-1234");
        assert_eq!(input.account_id, "acct-1234");
        assert_eq!(input.balance, 0);
        assert_eq!(input.daily_streak, 0);
    }
}
