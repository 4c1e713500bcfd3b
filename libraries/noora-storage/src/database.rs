/// Database implementation
use crate::error::{Result, StorageError};
use crate::{bookmarks, last_read};
use noora_core::ReadingSnapshot;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::info;

/// SQLite database for reading progress
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new database connection
    ///
    /// # Errors
    /// Returns an error if the connection fails or migrations fail
    pub async fn new(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // In-memory databases live per connection; a larger pool would hand
        // out empty databases for every connection after the first
        let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        Self::run_migrations(&pool).await?;
        info!(url = database_url, "reading-progress database ready");

        Ok(Self { pool })
    }

    /// Create an in-memory database (for testing)
    pub async fn in_memory() -> Result<Self> {
        Self::new("sqlite::memory:").await
    }

    /// Create database from an existing pool (for testing)
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Run database migrations
    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        // Embedded migrations for reliability across different execution contexts
        const MIGRATIONS: &[&str] = &[
            include_str!("../migrations/20250601000001_create_bookmarks.sql"),
            include_str!("../migrations/20250601000002_create_last_read.sql"),
        ];

        for migration in MIGRATIONS {
            // Each migration file may hold several statements
            for statement in migration.split(';') {
                let statement = statement.trim();
                if statement.is_empty() {
                    continue;
                }
                sqlx::query(statement)
                    .execute(pool)
                    .await
                    .map_err(|e| StorageError::Migration(e.to_string()))?;
            }
        }

        Ok(())
    }

    /// Load all reading progress as one snapshot
    pub async fn load_snapshot(&self) -> Result<ReadingSnapshot> {
        Ok(ReadingSnapshot {
            bookmarks: bookmarks::get_all(&self.pool).await?,
            last_read: last_read::all_positions(&self.pool).await?,
            global_last_read: last_read::global(&self.pool).await?,
        })
    }

    /// Persist a snapshot, replacing all stored reading progress
    pub async fn save_snapshot(&self, snapshot: &ReadingSnapshot) -> Result<()> {
        bookmarks::replace_all(&self.pool, &snapshot.bookmarks).await?;

        for (&surah, &verse) in &snapshot.last_read {
            last_read::set_position(&self.pool, surah, verse).await?;
        }

        if let Some(global) = &snapshot.global_last_read {
            last_read::set_global(&self.pool, global).await?;
        }

        Ok(())
    }
}
