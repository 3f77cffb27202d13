//! Card repository
//!
//! Cards are looked up by name. Create and update share the association
//! replacement path: the stored tag links, upgrade edges, and event links
//! are cleared and rebuilt from the input inside one transaction. The
//! binary image payload is never part of a row read; it travels through
//! `image`/`set_image` only.

use sqlx::{FromRow, PgConnection, PgPool};
use serde::Serialize;

use cardvault_core::CardInput;

use crate::error::{StoreError, StoreResult};

/// Card record from database. The image payload is deliberately absent.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Card {
    pub id: i32,
    pub name: String,
    pub rarity: i32,
}

/// One upgrade edge, with the requirement's name resolved for display.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UpgradeEdge {
    pub card_id: i32,
    pub requirement_id: i32,
    pub requirement_name: String,
    pub amount: i32,
}

/// Card repository
pub struct CardRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CardRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every card in storage order.
    pub async fn list_all(&self) -> StoreResult<Vec<Card>> {
        let cards: Vec<Card> = sqlx::query_as("SELECT id, name, rarity FROM card")
            .fetch_all(self.pool)
            .await?;

        Ok(cards)
    }

    /// Get a single card by name. Absent cards are `None`, not an error.
    pub async fn get(&self, name: &str) -> StoreResult<Option<Card>> {
        let card: Option<Card> =
            sqlx::query_as("SELECT id, name, rarity FROM card WHERE name = $1")
                .bind(name)
                .fetch_optional(self.pool)
                .await?;

        Ok(card)
    }

    /// Create a card and populate its associations from the input, all in
    /// one transaction. Returns the row re-read after commit.
    ///
    /// A duplicate name surfaces as the database's unique violation,
    /// unreinterpreted.
    pub async fn create(&self, input: &CardInput) -> StoreResult<Card> {
        let mut tx = self.pool.begin().await?;

        let card: Card = sqlx::query_as(
            r#"
            INSERT INTO card (name, rarity)
            VALUES ($1, $2)
            RETURNING id, name, rarity
            "#,
        )
        .bind(input.name.as_str())
        .bind(input.rarity)
        .fetch_one(&mut *tx)
        .await?;

        replace_associations(&mut *tx, card.id, input).await?;

        tx.commit().await?;
        self.refetch(card.id).await
    }

    /// Replace the card's association sets with the ones described by the
    /// input. Scalar fields are untouched; only the links change.
    ///
    /// An upgrade entry naming an unknown requirement aborts the whole
    /// operation before commit, persisting nothing.
    pub async fn update(&self, id: i32, input: &CardInput) -> StoreResult<Card> {
        let mut tx = self.pool.begin().await?;

        let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM card WHERE id = $1)")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        if !exists.0 {
            return Err(StoreError::NotFound {
                resource: "card",
                key: id.to_string(),
            });
        }

        replace_associations(&mut *tx, id, input).await?;

        tx.commit().await?;
        self.refetch(id).await
    }

    /// Delete a card by name (idempotent). Cascades remove its tag and
    /// event links and upgrade edges on either side.
    pub async fn delete(&self, name: &str) -> StoreResult<()> {
        sqlx::query("DELETE FROM card WHERE name = $1")
            .bind(name)
            .execute(self.pool)
            .await?;

        Ok(())
    }

    /// Overwrite the card's image payload. The bytes are stored untouched;
    /// no format validation happens at this layer.
    pub async fn set_image(&self, name: &str, image: &[u8]) -> StoreResult<()> {
        let result = sqlx::query("UPDATE card SET image = $2 WHERE name = $1")
            .bind(name)
            .bind(image)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                resource: "card",
                key: name.to_owned(),
            });
        }

        Ok(())
    }

    /// Fetch the card's image payload on demand. `None` when the card is
    /// absent or has no image.
    pub async fn image(&self, name: &str) -> StoreResult<Option<Vec<u8>>> {
        let image: Option<Option<Vec<u8>>> =
            sqlx::query_scalar("SELECT image FROM card WHERE name = $1")
                .bind(name)
                .fetch_optional(self.pool)
                .await?;

        Ok(image.flatten())
    }

    /// Ids of the tags attached to a card, computed at read time.
    pub async fn tag_ids(&self, card_id: i32) -> StoreResult<Vec<i32>> {
        let ids: Vec<i32> = sqlx::query_scalar("SELECT tag FROM card_has_tags WHERE card = $1")
            .bind(card_id)
            .fetch_all(self.pool)
            .await?;

        Ok(ids)
    }

    /// Ids of the events a card appears in, computed at read time.
    pub async fn event_ids(&self, card_id: i32) -> StoreResult<Vec<i32>> {
        let ids: Vec<i32> = sqlx::query_scalar("SELECT event FROM event_has_cards WHERE card = $1")
            .bind(card_id)
            .fetch_all(self.pool)
            .await?;

        Ok(ids)
    }

    /// Upgrade edges for a card: what it takes to upgrade it.
    pub async fn upgrades(&self, card_id: i32) -> StoreResult<Vec<UpgradeEdge>> {
        let edges: Vec<UpgradeEdge> = sqlx::query_as(
            r#"
            SELECT u.card_id, u.requirement_id, c.name AS requirement_name, u.amount
            FROM card_upgrade u
            JOIN card c ON c.id = u.requirement_id
            WHERE u.card_id = $1
            "#,
        )
        .bind(card_id)
        .fetch_all(self.pool)
        .await?;

        Ok(edges)
    }

    /// Inverse edges: the upgrades this card is a requirement for.
    pub async fn required_by(&self, card_id: i32) -> StoreResult<Vec<UpgradeEdge>> {
        let edges: Vec<UpgradeEdge> = sqlx::query_as(
            r#"
            SELECT u.card_id, u.requirement_id, c.name AS requirement_name, u.amount
            FROM card_upgrade u
            JOIN card c ON c.id = u.requirement_id
            WHERE u.requirement_id = $1
            "#,
        )
        .bind(card_id)
        .fetch_all(self.pool)
        .await?;

        Ok(edges)
    }

    /// Re-read the row after commit so callers get the persisted state.
    async fn refetch(&self, id: i32) -> StoreResult<Card> {
        let card: Option<Card> =
            sqlx::query_as("SELECT id, name, rarity FROM card WHERE id = $1")
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        card.ok_or_else(|| StoreError::NotFound {
            resource: "card",
            key: id.to_string(),
        })
    }
}

/// Clear and rebuild all three association sets for a card inside the
/// caller's transaction.
///
/// Tag and event links that name nonexistent ids fail at insert with the
/// database's foreign-key violation; upgrade requirements are resolved by
/// name first and missing ones fail as not-found before anything commits.
async fn replace_associations(
    tx: &mut PgConnection,
    card_id: i32,
    input: &CardInput,
) -> StoreResult<()> {
    sqlx::query("DELETE FROM card_has_tags WHERE card = $1")
        .bind(card_id)
        .execute(&mut *tx)
        .await?;

    for tag_id in &input.tag_ids {
        sqlx::query("INSERT INTO card_has_tags (card, tag) VALUES ($1, $2)")
            .bind(card_id)
            .bind(*tag_id)
            .execute(&mut *tx)
            .await?;
    }

    sqlx::query("DELETE FROM card_upgrade WHERE card_id = $1")
        .bind(card_id)
        .execute(&mut *tx)
        .await?;

    for upgrade in &input.upgrades {
        let requirement_id: Option<i32> = sqlx::query_scalar("SELECT id FROM card WHERE name = $1")
            .bind(upgrade.requirement_name().as_str())
            .fetch_optional(&mut *tx)
            .await?;

        let requirement_id = requirement_id.ok_or_else(|| StoreError::NotFound {
            resource: "card",
            key: upgrade.requirement_name().as_str().to_owned(),
        })?;

        sqlx::query(
            "INSERT INTO card_upgrade (card_id, requirement_id, amount) VALUES ($1, $2, $3)",
        )
        .bind(card_id)
        .bind(requirement_id)
        .bind(upgrade.amount())
        .execute(&mut *tx)
        .await?;
    }

    sqlx::query("DELETE FROM event_has_cards WHERE card = $1")
        .bind(card_id)
        .execute(&mut *tx)
        .await?;

    for event_id in &input.event_ids {
        sqlx::query("INSERT INTO event_has_cards (event, card) VALUES ($1, $2)")
            .bind(*event_id)
            .bind(card_id)
            .execute(&mut *tx)
            .await?;
    }

    Ok(())
}
