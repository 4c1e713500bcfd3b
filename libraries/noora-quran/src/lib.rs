//! Noora Recitation - Quran Data Source
//!
//! HTTP client for the Quran verse data API.
//!
//! This crate provides:
//! - Surah metadata (single surah and full list)
//! - Ordered verse ranges with transparent chunking (the API serves at
//!   most 30 verses per request)
//! - Tolerant payload parsing: the upstream API is loose with its schema
//!   (stringly-typed numbers, `verses` vs `ayahs`, `arab` vs
//!   `text_uthmani`), and all observed spellings are accepted
//!
//! Verses come back as [`noora_core::Verse`] values, ready to hand to the
//! playback controller's `load_surah`.

#![forbid(unsafe_code)]

mod client;
mod error;
pub mod types;

// Public exports
pub use client::{QuranClient, DEFAULT_BASE_URL};
pub use error::{QuranApiError, Result};
pub use types::{parse_verses, SurahDetailResponse, SurahListResponse, SurahPayload};
