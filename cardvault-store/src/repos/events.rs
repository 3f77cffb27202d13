//! Event repository
//!
//! Events are time-bounded card showcases; at most one is flagged as the
//! default by convention, though the schema does not enforce it. Update
//! overwrites the scalar fields and fully replaces the card links.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, PgPool};
use serde::Serialize;

use cardvault_core::EventInput;

use crate::error::{StoreError, StoreResult};

/// Event record from database
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Event {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub is_default: bool,
}

/// Event repository
pub struct EventRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> EventRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every event in storage order.
    pub async fn list_all(&self) -> StoreResult<Vec<Event>> {
        let events: Vec<Event> = sqlx::query_as(
            "SELECT id, name, description, start_time, end_time, is_default FROM event",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(events)
    }

    /// Get a single event by id.
    pub async fn get(&self, id: i32) -> StoreResult<Option<Event>> {
        let event: Option<Event> = sqlx::query_as(
            r#"
            SELECT id, name, description, start_time, end_time, is_default
            FROM event
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(event)
    }

    /// Get a single event by its unique name.
    pub async fn get_by_name(&self, name: &str) -> StoreResult<Option<Event>> {
        let event: Option<Event> = sqlx::query_as(
            r#"
            SELECT id, name, description, start_time, end_time, is_default
            FROM event
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        Ok(event)
    }

    /// Create an event and populate its card links, in one transaction.
    /// Returns the row re-read after commit.
    ///
    /// A duplicate name surfaces as the database's unique violation,
    /// unreinterpreted.
    pub async fn create(&self, input: &EventInput) -> StoreResult<Event> {
        let mut tx = self.pool.begin().await?;

        let event: Event = sqlx::query_as(
            r#"
            INSERT INTO event (name, description, start_time, end_time, is_default)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, description, start_time, end_time, is_default
            "#,
        )
        .bind(input.name.as_str())
        .bind(input.description.as_deref())
        .bind(input.start_time)
        .bind(input.end_time)
        .bind(input.default)
        .fetch_one(&mut *tx)
        .await?;

        replace_card_links(&mut *tx, event.id, &input.card_ids).await?;

        tx.commit().await?;
        self.refetch(event.id).await
    }

    /// Overwrite the event's scalar fields and replace its card links.
    /// Unknown ids are a hard error.
    pub async fn update(&self, id: i32, input: &EventInput) -> StoreResult<Event> {
        let mut tx = self.pool.begin().await?;

        let updated: Option<(i32,)> = sqlx::query_as(
            r#"
            UPDATE event
            SET name = $2, description = $3, start_time = $4, end_time = $5, is_default = $6
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(input.name.as_str())
        .bind(input.description.as_deref())
        .bind(input.start_time)
        .bind(input.end_time)
        .bind(input.default)
        .fetch_optional(&mut *tx)
        .await?;

        if updated.is_none() {
            return Err(StoreError::NotFound {
                resource: "event",
                key: id.to_string(),
            });
        }

        replace_card_links(&mut *tx, id, &input.card_ids).await?;

        tx.commit().await?;
        self.refetch(id).await
    }

    /// Delete an event by id (idempotent). Cascades remove its card links.
    pub async fn delete(&self, id: i32) -> StoreResult<()> {
        sqlx::query("DELETE FROM event WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(())
    }

    /// Ids of the cards in this event, computed at read time.
    pub async fn card_ids(&self, event_id: i32) -> StoreResult<Vec<i32>> {
        let ids: Vec<i32> = sqlx::query_scalar("SELECT card FROM event_has_cards WHERE event = $1")
            .bind(event_id)
            .fetch_all(self.pool)
            .await?;

        Ok(ids)
    }

    /// Names of the cards in this event, computed at read time.
    pub async fn card_names(&self, event_id: i32) -> StoreResult<Vec<String>> {
        let names: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT c.name
            FROM event_has_cards ec
            JOIN card c ON c.id = ec.card
            WHERE ec.event = $1
            "#,
        )
        .bind(event_id)
        .fetch_all(self.pool)
        .await?;

        Ok(names)
    }

    /// Re-read the row after commit so callers get the persisted state.
    async fn refetch(&self, id: i32) -> StoreResult<Event> {
        self.get(id).await?.ok_or_else(|| StoreError::NotFound {
            resource: "event",
            key: id.to_string(),
        })
    }
}

/// Clear and rebuild the event's card links inside the caller's
/// transaction. Links naming nonexistent cards fail with the database's
/// foreign-key violation.
async fn replace_card_links(
    tx: &mut PgConnection,
    event_id: i32,
    card_ids: &[i32],
) -> StoreResult<()> {
    sqlx::query("DELETE FROM event_has_cards WHERE event = $1")
        .bind(event_id)
        .execute(&mut *tx)
        .await?;

    for card_id in card_ids {
        sqlx::query("INSERT INTO event_has_cards (event, card) VALUES ($1, $2)")
            .bind(event_id)
            .bind(*card_id)
            .execute(&mut *tx)
            .await?;
    }

    Ok(())
}
