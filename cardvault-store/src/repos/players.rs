//! Player and ownership repository
//!
//! Player identity is the caller-supplied platform account id. Ownership
//! rows are keyed (player, card) and upserted whole; an amount of zero is
//! stored, not deleted, so a player's history of ever holding a card stays
//! queryable.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use serde::Serialize;

use cardvault_core::PlayerInput;

use crate::error::{StoreError, StoreResult};

/// Player record from database
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Player {
    pub account_id: String,
    pub balance: i64,
    pub last_daily: DateTime<Utc>,
    pub daily_streak: i32,
}

/// Ownership record: how many copies of a card a player holds.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CardOwnership {
    pub player_id: String,
    pub card_id: i32,
    pub amount: i32,
}

/// Player repository
pub struct PlayerRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PlayerRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every player in storage order.
    pub async fn list_all(&self) -> StoreResult<Vec<Player>> {
        let players: Vec<Player> = sqlx::query_as(
            "SELECT account_id, balance, last_daily, daily_streak FROM player",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(players)
    }

    /// Get a single player by account id.
    pub async fn get(&self, account_id: &str) -> StoreResult<Option<Player>> {
        let player: Option<Player> = sqlx::query_as(
            r#"
            SELECT account_id, balance, last_daily, daily_streak
            FROM player
            WHERE account_id = $1
            "#,
        )
        .bind(account_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(player)
    }

    /// Create a player. A duplicate account id surfaces as the database's
    /// unique violation, unreinterpreted.
    pub async fn create(&self, input: &PlayerInput) -> StoreResult<Player> {
        let player: Player = sqlx::query_as(
            r#"
            INSERT INTO player (account_id, balance, last_daily, daily_streak)
            VALUES ($1, $2, $3, $4)
            RETURNING account_id, balance, last_daily, daily_streak
            "#,
        )
        .bind(&input.account_id)
        .bind(input.balance)
        .bind(input.last_daily)
        .bind(input.daily_streak)
        .fetch_one(self.pool)
        .await?;

        Ok(player)
    }

    /// Overwrite a player's mutable fields. Unknown account ids are a hard
    /// error; identity is never regenerated.
    pub async fn update(&self, input: &PlayerInput) -> StoreResult<Player> {
        let player: Option<Player> = sqlx::query_as(
            r#"
            UPDATE player
            SET balance = $2, last_daily = $3, daily_streak = $4
            WHERE account_id = $1
            RETURNING account_id, balance, last_daily, daily_streak
            "#,
        )
        .bind(&input.account_id)
        .bind(input.balance)
        .bind(input.last_daily)
        .bind(input.daily_streak)
        .fetch_optional(self.pool)
        .await?;

        player.ok_or_else(|| StoreError::NotFound {
            resource: "player",
            key: input.account_id.clone(),
        })
    }

    /// Delete a player by account id (idempotent for absent players).
    /// Fails with a foreign-key violation while ownership rows exist.
    pub async fn delete(&self, account_id: &str) -> StoreResult<()> {
        sqlx::query("DELETE FROM player WHERE account_id = $1")
            .bind(account_id)
            .execute(self.pool)
            .await?;

        Ok(())
    }

    /// Upsert the ownership row for (player, card).
    ///
    /// Both sides must exist; a missing player or card surfaces as the
    /// database's foreign-key violation.
    pub async fn set_owned(
        &self,
        account_id: &str,
        card_id: i32,
        amount: u32,
    ) -> StoreResult<CardOwnership> {
        let ownership: CardOwnership = sqlx::query_as(
            r#"
            INSERT INTO player_has_cards (player_id, card_id, amount)
            VALUES ($1, $2, $3)
            ON CONFLICT (player_id, card_id) DO UPDATE
            SET amount = EXCLUDED.amount
            RETURNING player_id, card_id, amount
            "#,
        )
        .bind(account_id)
        .bind(card_id)
        .bind(amount as i32)
        .fetch_one(self.pool)
        .await?;

        Ok(ownership)
    }

    /// Ownership rows for a player.
    pub async fn owned(&self, account_id: &str) -> StoreResult<Vec<CardOwnership>> {
        let rows: Vec<CardOwnership> = sqlx::query_as(
            "SELECT player_id, card_id, amount FROM player_has_cards WHERE player_id = $1",
        )
        .bind(account_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Copies of one card a player holds; 0 when no row exists.
    pub async fn amount_owned(&self, account_id: &str, card_id: i32) -> StoreResult<i32> {
        let amount: Option<i32> = sqlx::query_scalar(
            "SELECT amount FROM player_has_cards WHERE player_id = $1 AND card_id = $2",
        )
        .bind(account_id)
        .bind(card_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(amount.unwrap_or(0))
    }
}
