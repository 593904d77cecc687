//! Tree persistence operations.

use anyhow::Result;
use chrono::{DateTime, Utc};
use grove_core::Tree;
use sqlx::{Sqlite, SqlitePool};

/// Insert a tree within an existing transaction. The UNIQUE index on
/// (estate_id, x, y) rejects a concurrent planting of the same plot.
pub async fn insert_tree_tx(tx: &mut sqlx::Transaction<'_, Sqlite>, tree: &Tree) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO trees (id, estate_id, x, y, height, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(&tree.id)
    .bind(&tree.estate_id)
    .bind(tree.x)
    .bind(tree.y)
    .bind(tree.height)
    .bind(tree.created_at.to_rfc3339())
    .execute(&mut **tx)
    .await?;

    Ok(())
}

/// Look up the tree occupying one plot, if any.
pub async fn get_tree_at(
    pool: &SqlitePool,
    estate_id: &str,
    x: u32,
    y: u32,
) -> Result<Option<Tree>> {
    let row = sqlx::query_as::<_, TreeRow>(
        "SELECT id, estate_id, x, y, height, created_at FROM trees WHERE estate_id = ?1 AND x = ?2 AND y = ?3",
    )
    .bind(estate_id)
    .bind(x)
    .bind(y)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| r.into()))
}

/// Load every tree planted in one estate.
pub async fn list_trees_by_estate(pool: &SqlitePool, estate_id: &str) -> Result<Vec<Tree>> {
    let rows = sqlx::query_as::<_, TreeRow>(
        "SELECT id, estate_id, x, y, height, created_at FROM trees WHERE estate_id = ?1",
    )
    .bind(estate_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|r| r.into()).collect())
}

// Internal row type for SQLx
#[derive(sqlx::FromRow)]
struct TreeRow {
    id: String,
    estate_id: String,
    x: u32,
    y: u32,
    height: u8,
    created_at: String,
}

impl From<TreeRow> for Tree {
    fn from(row: TreeRow) -> Self {
        let created_at = DateTime::parse_from_rfc3339(&row.created_at)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now());

        Tree {
            id: row.id,
            estate_id: row.estate_id,
            x: row.x,
            y: row.y,
            height: row.height,
            created_at,
        }
    }
}
