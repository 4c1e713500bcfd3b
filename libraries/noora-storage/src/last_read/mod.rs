//! Last-read marker persistence
//!
//! Per-surah markers are one row per surah; the global "continue reading"
//! position is a single upserted row.

use crate::error::Result;
use chrono::Utc;
use noora_core::LastReadPosition;
use sqlx::{Row, SqlitePool};
use std::collections::HashMap;

/// Upsert the last-read verse for a surah
pub async fn set_position(pool: &SqlitePool, surah: u32, verse: u32) -> Result<()> {
    let now = Utc::now().timestamp();

    sqlx::query(
        "INSERT INTO last_read (surah, verse, updated_at)
         VALUES (?, ?, ?)
         ON CONFLICT(surah) DO UPDATE SET verse = excluded.verse, updated_at = excluded.updated_at",
    )
    .bind(surah)
    .bind(verse)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(())
}

/// Last-read verse for one surah, if recorded
pub async fn position_for_surah(pool: &SqlitePool, surah: u32) -> Result<Option<u32>> {
    let row = sqlx::query("SELECT verse FROM last_read WHERE surah = ?")
        .bind(surah)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| r.get::<u32, _>("verse")))
}

/// All per-surah last-read markers
pub async fn all_positions(pool: &SqlitePool) -> Result<HashMap<u32, u32>> {
    let rows = sqlx::query("SELECT surah, verse FROM last_read")
        .fetch_all(pool)
        .await?;

    Ok(rows
        .iter()
        .map(|row| (row.get::<u32, _>("surah"), row.get::<u32, _>("verse")))
        .collect())
}

/// Overwrite the global most-recent reading position
pub async fn set_global(pool: &SqlitePool, position: &LastReadPosition) -> Result<()> {
    let now = Utc::now().timestamp();

    sqlx::query(
        "INSERT INTO global_last_read (id, surah, verse, surah_name, updated_at)
         VALUES (1, ?, ?, ?, ?)
         ON CONFLICT(id) DO UPDATE SET
             surah = excluded.surah,
             verse = excluded.verse,
             surah_name = excluded.surah_name,
             updated_at = excluded.updated_at",
    )
    .bind(position.surah)
    .bind(position.verse)
    .bind(&position.surah_name)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(())
}

/// The global most-recent reading position, if recorded
pub async fn global(pool: &SqlitePool) -> Result<Option<LastReadPosition>> {
    let row = sqlx::query("SELECT surah, verse, surah_name FROM global_last_read WHERE id = 1")
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| LastReadPosition {
        surah: r.get::<u32, _>("surah"),
        verse: r.get::<u32, _>("verse"),
        surah_name: r.get::<String, _>("surah_name"),
    }))
}
