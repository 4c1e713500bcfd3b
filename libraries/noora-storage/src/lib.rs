//! Noora Recitation - Reading Progress Storage
//!
//! SQLite persistence for bookmarks and last-read markers.
//!
//! The playback controller works on an in-memory
//! [`ReadingSnapshot`](noora_core::ReadingSnapshot); this crate loads that
//! snapshot when a reading screen opens and flushes it back after
//! mutations. Migrations are embedded and run at pool creation.
//!
//! # Example
//!
//! ```rust,no_run
//! use noora_storage::Database;
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::new("sqlite://noora.db").await?;
//!
//! // Screen start: seed the controller
//! let snapshot = db.load_snapshot().await?;
//!
//! // ... controller mutates bookmarks / last-read ...
//!
//! // Flush after mutations
//! db.save_snapshot(&snapshot).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod bookmarks;
mod database;
mod error;
pub mod last_read;

// Public exports
pub use database::Database;
pub use error::{Result, StorageError};
