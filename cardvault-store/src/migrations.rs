//! Database migrations for the card game schema
//!
//! Association tables key on the referenced foreign keys so duplicate
//! edges cannot exist. Card and tag deletions cascade into their
//! association rows; ownership rows do not cascade, so a card with owners
//! cannot be deleted until they are released.

use sqlx::PgPool;

use crate::StoreResult;

/// Run all schema migrations.
pub async fn run(pool: &PgPool) -> StoreResult<()> {
    tracing::info!("Running cardvault migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS card (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            rarity INTEGER NOT NULL,
            image BYTEA
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tag (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS event (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            description TEXT,
            start_time TIMESTAMPTZ,
            end_time TIMESTAMPTZ,
            is_default BOOLEAN NOT NULL DEFAULT FALSE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS player (
            account_id TEXT PRIMARY KEY,
            balance BIGINT NOT NULL DEFAULT 0,
            last_daily TIMESTAMPTZ NOT NULL,
            daily_streak INTEGER NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS card_has_tags (
            card INTEGER NOT NULL REFERENCES card(id) ON DELETE CASCADE,
            tag INTEGER NOT NULL REFERENCES tag(id) ON DELETE CASCADE,
            PRIMARY KEY (card, tag)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS event_has_cards (
            event INTEGER NOT NULL REFERENCES event(id) ON DELETE CASCADE,
            card INTEGER NOT NULL REFERENCES card(id) ON DELETE CASCADE,
            PRIMARY KEY (event, card)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS player_has_cards (
            player_id TEXT NOT NULL REFERENCES player(account_id),
            card_id INTEGER NOT NULL REFERENCES card(id),
            amount INTEGER NOT NULL DEFAULT 0,
            PRIMARY KEY (player_id, card_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS card_upgrade (
            card_id INTEGER NOT NULL REFERENCES card(id) ON DELETE CASCADE,
            requirement_id INTEGER NOT NULL REFERENCES card(id) ON DELETE CASCADE,
            amount INTEGER NOT NULL DEFAULT 1,
            PRIMARY KEY (card_id, requirement_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    create_indexes(pool).await?;

    tracing::info!("Cardvault migrations complete");
    Ok(())
}

async fn create_indexes(pool: &PgPool) -> StoreResult<()> {
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_card_has_tags_tag ON card_has_tags(tag)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_event_has_cards_card ON event_has_cards(card)")
        .execute(pool)
        .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_card_upgrade_requirement ON card_upgrade(requirement_id)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_player_has_cards_card ON player_has_cards(card_id)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
