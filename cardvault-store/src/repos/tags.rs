//! Tag repository

use sqlx::{FromRow, PgPool};
use serde::Serialize;

use cardvault_core::TagInput;

use crate::error::{StoreError, StoreResult};

/// Tag record from database
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tag {
    pub id: i32,
    pub name: String,
}

/// Tag repository
pub struct TagRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> TagRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every tag in storage order.
    pub async fn list_all(&self) -> StoreResult<Vec<Tag>> {
        let tags: Vec<Tag> = sqlx::query_as("SELECT id, name FROM tag")
            .fetch_all(self.pool)
            .await?;

        Ok(tags)
    }

    /// Get a single tag by id.
    pub async fn get(&self, id: i32) -> StoreResult<Option<Tag>> {
        let tag: Option<Tag> = sqlx::query_as("SELECT id, name FROM tag WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(tag)
    }

    /// Create a tag.
    pub async fn create(&self, input: &TagInput) -> StoreResult<Tag> {
        let tag: Tag = sqlx::query_as("INSERT INTO tag (name) VALUES ($1) RETURNING id, name")
            .bind(input.name.as_str())
            .fetch_one(self.pool)
            .await?;

        Ok(tag)
    }

    /// Rename a tag. Unknown ids are a hard error.
    pub async fn rename(&self, id: i32, input: &TagInput) -> StoreResult<Tag> {
        let tag: Option<Tag> =
            sqlx::query_as("UPDATE tag SET name = $2 WHERE id = $1 RETURNING id, name")
                .bind(id)
                .bind(input.name.as_str())
                .fetch_optional(self.pool)
                .await?;

        tag.ok_or_else(|| StoreError::NotFound {
            resource: "tag",
            key: id.to_string(),
        })
    }

    /// Delete a tag by id (idempotent). Cascades remove its card links.
    pub async fn delete(&self, id: i32) -> StoreResult<()> {
        sqlx::query("DELETE FROM tag WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(())
    }

    /// Ids of the cards carrying this tag, computed at read time.
    pub async fn card_ids(&self, tag_id: i32) -> StoreResult<Vec<i32>> {
        let ids: Vec<i32> = sqlx::query_scalar("SELECT card FROM card_has_tags WHERE tag = $1")
            .bind(tag_id)
            .fetch_all(self.pool)
            .await?;

        Ok(ids)
    }
}
