//! Core recitation types

use serde::{Deserialize, Serialize};

/// First surah number in the Quran
pub const SURAH_MIN: u32 = 1;

/// Last surah number in the Quran
pub const SURAH_MAX: u32 = 114;

/// A single Quranic verse (ayah)
///
/// Immutable value created in bulk when a surah's verse range is fetched.
/// Held in an ordered, index-stable sequence for the lifetime of a reading
/// screen and replaced wholesale when the user switches surah.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    /// Verse number, 1-based and unique within its surah
    pub number: u32,

    /// Arabic text
    pub arabic: String,

    /// Latin transliteration
    pub transliteration: String,

    /// Translation text
    pub translation: String,

    /// Recitation audio URL; `None` means no audio is available
    pub audio_url: Option<String>,
}

impl Verse {
    /// Whether a playable audio URL is present
    ///
    /// An empty string counts as unavailable, matching how upstream APIs
    /// report missing recordings.
    pub fn has_audio(&self) -> bool {
        self.audio_url.as_deref().is_some_and(|url| !url.is_empty())
    }
}

/// Metadata for a surah (chapter)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurahInfo {
    /// Surah number (1..=114)
    pub number: u32,

    /// Display name
    pub name: String,

    /// Number of verses in the surah
    pub verse_count: u32,

    /// Revelation place (e.g. "Makkiyyah"), when known
    pub revelation: Option<String>,
}

impl SurahInfo {
    /// Create surah metadata without revelation info
    pub fn new(number: u32, name: impl Into<String>, verse_count: u32) -> Self {
        Self {
            number,
            name: name.into(),
            verse_count,
            revelation: None,
        }
    }
}

/// Next surah number, wrapping from 114 back to 1
pub fn next_surah(current: u32) -> u32 {
    if current >= SURAH_MAX {
        SURAH_MIN
    } else {
        current + 1
    }
}

/// Previous surah number, wrapping from 1 back to 114
pub fn prev_surah(current: u32) -> u32 {
    if current <= SURAH_MIN {
        SURAH_MAX
    } else {
        current - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verse_audio_availability() {
        let mut verse = Verse {
            number: 3,
            arabic: "arab".to_string(),
            transliteration: "latin".to_string(),
            translation: "text".to_string(),
            audio_url: Some("https://cdn.example.com/3.mp3".to_string()),
        };
        assert!(verse.has_audio());

        verse.audio_url = Some(String::new());
        assert!(!verse.has_audio());

        verse.audio_url = None;
        assert!(!verse.has_audio());
    }

    #[test]
    fn surah_navigation_wraps() {
        assert_eq!(next_surah(1), 2);
        assert_eq!(next_surah(113), 114);
        assert_eq!(next_surah(114), 1);

        assert_eq!(prev_surah(2), 1);
        assert_eq!(prev_surah(1), 114);
        assert_eq!(prev_surah(114), 113);
    }

    #[test]
    fn surah_info_creation() {
        let surah = SurahInfo::new(36, "Ya-Sin", 83);
        assert_eq!(surah.number, 36);
        assert_eq!(surah.name, "Ya-Sin");
        assert_eq!(surah.verse_count, 83);
        assert!(surah.revelation.is_none());
    }
}
