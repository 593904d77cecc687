//! Estate persistence operations.

use anyhow::Result;
use chrono::{DateTime, Utc};
use grove_core::Estate;
use sqlx::{Sqlite, SqlitePool};

/// Insert a freshly created estate.
pub async fn insert_estate(pool: &SqlitePool, estate: &Estate) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO estates (id, width, length, tree_count, min_height, max_height, median_height, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
        "#,
    )
    .bind(&estate.id)
    .bind(estate.width)
    .bind(estate.length)
    .bind(estate.tree_count)
    .bind(estate.min_height)
    .bind(estate.max_height)
    .bind(estate.median_height)
    .bind(estate.created_at.to_rfc3339())
    .bind(estate.updated_at.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(())
}

/// Persist updated aggregate statistics within an existing transaction.
/// Width and length are immutable and never rewritten.
pub async fn update_estate_stats_tx(
    tx: &mut sqlx::Transaction<'_, Sqlite>,
    estate: &Estate,
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE estates
        SET tree_count = ?2, min_height = ?3, max_height = ?4,
            median_height = ?5, updated_at = ?6
        WHERE id = ?1
        "#,
    )
    .bind(&estate.id)
    .bind(estate.tree_count)
    .bind(estate.min_height)
    .bind(estate.max_height)
    .bind(estate.median_height)
    .bind(estate.updated_at.to_rfc3339())
    .execute(&mut **tx)
    .await?;

    Ok(())
}

/// Look up one estate by id.
pub async fn get_estate(pool: &SqlitePool, id: &str) -> Result<Option<Estate>> {
    let row = sqlx::query_as::<_, EstateRow>(
        "SELECT id, width, length, tree_count, min_height, max_height, median_height, created_at, updated_at FROM estates WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| r.into()))
}

/// Load all estates from the database.
pub async fn load_all_estates(pool: &SqlitePool) -> Result<Vec<Estate>> {
    let rows = sqlx::query_as::<_, EstateRow>(
        "SELECT id, width, length, tree_count, min_height, max_height, median_height, created_at, updated_at FROM estates",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|r| r.into()).collect())
}

// Internal row type for SQLx
#[derive(sqlx::FromRow)]
struct EstateRow {
    id: String,
    width: u32,
    length: u32,
    tree_count: u32,
    min_height: u8,
    max_height: u8,
    median_height: u8,
    created_at: String,
    updated_at: String,
}

impl From<EstateRow> for Estate {
    fn from(row: EstateRow) -> Self {
        Estate {
            id: row.id,
            width: row.width,
            length: row.length,
            tree_count: row.tree_count,
            min_height: row.min_height,
            max_height: row.max_height,
            median_height: row.median_height,
            created_at: parse_timestamp(&row.created_at),
            updated_at: parse_timestamp(&row.updated_at),
        }
    }
}

fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}
