//! Bookmark persistence
//!
//! The in-memory tracker owns the toggle/cap/ordering rules; this module
//! only stores and restores the resulting list. `position` 0 is the most
//! recent bookmark.

use crate::error::{Result, StorageError};
use chrono::DateTime;
use noora_core::BookmarkEntry;
use sqlx::{Row, SqlitePool};

/// Load all bookmarks, most-recent-first
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<BookmarkEntry>> {
    let rows = sqlx::query("SELECT surah, verse, created_at FROM bookmarks ORDER BY position")
        .fetch_all(pool)
        .await?;

    rows.iter()
        .map(|row| {
            let created_at = DateTime::from_timestamp(row.get::<i64, _>("created_at"), 0)
                .ok_or_else(|| StorageError::InvalidData("bookmark timestamp".to_string()))?;
            Ok(BookmarkEntry {
                surah: row.get::<u32, _>("surah"),
                verse: row.get::<u32, _>("verse"),
                created_at,
            })
        })
        .collect()
}

/// Replace the stored bookmark list wholesale
///
/// Runs in a transaction so a failed flush never leaves a half-written
/// list behind.
pub async fn replace_all(pool: &SqlitePool, entries: &[BookmarkEntry]) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM bookmarks").execute(&mut *tx).await?;

    for (position, entry) in entries.iter().enumerate() {
        sqlx::query(
            "INSERT INTO bookmarks (position, surah, verse, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(i64::try_from(position).unwrap_or(i64::MAX))
        .bind(entry.surah)
        .bind(entry.verse)
        .bind(entry.created_at.timestamp())
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}

/// Remove every stored bookmark
pub async fn clear(pool: &SqlitePool) -> Result<()> {
    sqlx::query("DELETE FROM bookmarks").execute(pool).await?;
    Ok(())
}
