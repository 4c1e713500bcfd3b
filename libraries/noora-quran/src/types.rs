//! API payload types and tolerant verse parsing
//!
//! The upstream API is loose with its schema: numbers arrive as strings,
//! verse arrays appear under `verses` or `ayahs`, and the Arabic text key
//! varies between `arab` and `text_uthmani`. Parsing here accepts all
//! observed spellings and skips entries it cannot make sense of.

use crate::error::{QuranApiError, Result};
use noora_core::{SurahInfo, Verse};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

/// Envelope for the surah detail endpoint
#[derive(Debug, Deserialize)]
pub struct SurahDetailResponse {
    /// API success flag
    pub status: bool,

    /// Surah payload, absent on failure
    pub data: Option<SurahPayload>,
}

/// Envelope for the surah list endpoint
#[derive(Debug, Deserialize)]
pub struct SurahListResponse {
    /// API success flag
    pub status: bool,

    /// Surah payloads, absent on failure
    pub data: Option<Vec<SurahPayload>>,
}

/// Raw surah record as the API ships it
///
/// Numeric fields are strings upstream; conversion happens in
/// [`into_surah_info`](SurahPayload::into_surah_info).
#[derive(Debug, Clone, Deserialize)]
pub struct SurahPayload {
    /// Surah number (stringly typed upstream)
    pub number: Option<String>,

    /// Localized name
    pub name_id: Option<String>,

    /// English name
    pub name_en: Option<String>,

    /// Long-form name
    pub name_long: Option<String>,

    /// Verse count (stringly typed upstream)
    pub number_of_verses: Option<String>,

    /// Revelation place (bare key)
    pub revelation: Option<String>,

    /// Revelation place (English)
    pub revelation_en: Option<String>,

    /// Revelation place (localized)
    pub revelation_id: Option<String>,

    /// Full-surah recitation audio URL
    pub audio_url: Option<String>,
}

impl SurahPayload {
    /// Convert the raw record into domain metadata
    pub fn into_surah_info(self) -> Result<SurahInfo> {
        let number = self
            .number
            .as_deref()
            .and_then(|n| n.parse::<u32>().ok())
            .ok_or_else(|| QuranApiError::ParseError("surah number missing".to_string()))?;

        let name = self
            .name_id
            .or(self.name_en)
            .or(self.name_long)
            .unwrap_or_else(|| format!("Surah {number}"));

        let verse_count = self
            .number_of_verses
            .as_deref()
            .and_then(|n| n.parse::<u32>().ok())
            .unwrap_or(0);

        let revelation = self.revelation_id.or(self.revelation_en).or(self.revelation);

        Ok(SurahInfo {
            number,
            name,
            verse_count,
            revelation,
        })
    }
}

/// Extract verses from a response's `data` element
///
/// Accepts a bare array, or an object carrying the array under `verses` or
/// `ayahs`. Entries without a recognizable verse number are skipped.
pub fn parse_verses(data: Option<&Value>) -> Vec<Verse> {
    let Some(data) = data else {
        return Vec::new();
    };

    let array = if data.is_array() {
        data.as_array()
    } else {
        data.get("verses")
            .and_then(Value::as_array)
            .or_else(|| data.get("ayahs").and_then(Value::as_array))
    };

    let Some(array) = array else {
        return Vec::new();
    };

    array
        .iter()
        .filter_map(|entry| {
            let verse = parse_verse(entry);
            if verse.is_none() {
                warn!("skipping verse entry without a usable number");
            }
            verse
        })
        .collect()
}

fn parse_verse(value: &Value) -> Option<Verse> {
    let number = value
        .get("ayah")
        .and_then(flexible_u32)
        .or_else(|| value.get("number").and_then(flexible_u32))?;

    let arabic = value
        .get("arab")
        .and_then(Value::as_str)
        .or_else(|| value.get("text_uthmani").and_then(Value::as_str))
        .unwrap_or_default()
        .to_string();

    let transliteration = string_field(value, "latin");
    let translation = string_field(value, "text");

    let audio_url = value
        .get("audio")
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty())
        .map(String::from);

    Some(Verse {
        number,
        arabic,
        transliteration,
        translation,
        audio_url,
    })
}

fn string_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

// Numbers arrive as JSON numbers or strings depending on the endpoint
fn flexible_u32(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_bare_array_with_primary_keys() {
        let data = json!([
            {"ayah": "1", "arab": "بِسْمِ", "latin": "bismi", "text": "In the name", "audio": "https://a/1.mp3"},
            {"ayah": "2", "arab": "الْحَمْدُ", "latin": "alhamdu", "text": "Praise", "audio": ""},
        ]);

        let verses = parse_verses(Some(&data));
        assert_eq!(verses.len(), 2);
        assert_eq!(verses[0].number, 1);
        assert_eq!(verses[0].arabic, "بِسْمِ");
        assert_eq!(verses[0].audio_url.as_deref(), Some("https://a/1.mp3"));
        assert_eq!(verses[1].audio_url, None, "empty audio means unavailable");
    }

    #[test]
    fn parses_alternate_key_spellings() {
        let data = json!({
            "ayahs": [
                {"number": 3, "text_uthmani": "الرَّحْمَٰنِ", "text": "The Merciful"},
            ]
        });

        let verses = parse_verses(Some(&data));
        assert_eq!(verses.len(), 1);
        assert_eq!(verses[0].number, 3);
        assert_eq!(verses[0].arabic, "الرَّحْمَٰنِ");
        assert!(verses[0].transliteration.is_empty());
        assert!(verses[0].audio_url.is_none());
    }

    #[test]
    fn parses_verses_object_wrapper() {
        let data = json!({
            "verses": [
                {"ayah": 5, "arab": "إِيَّاكَ", "latin": "iyyaka", "text": "You alone"},
            ]
        });

        let verses = parse_verses(Some(&data));
        assert_eq!(verses.len(), 1);
        assert_eq!(verses[0].number, 5);
    }

    #[test]
    fn skips_entries_without_numbers() {
        let data = json!([
            {"arab": "no number here"},
            {"ayah": 2, "arab": "ok"},
        ]);

        let verses = parse_verses(Some(&data));
        assert_eq!(verses.len(), 1);
        assert_eq!(verses[0].number, 2);
    }

    #[test]
    fn missing_data_yields_empty() {
        assert!(parse_verses(None).is_empty());
        assert!(parse_verses(Some(&json!({"unrelated": true}))).is_empty());
    }

    #[test]
    fn surah_payload_converts_with_fallbacks() {
        let payload = SurahPayload {
            number: Some("18".to_string()),
            name_id: None,
            name_en: Some("The Cave".to_string()),
            name_long: None,
            number_of_verses: Some("110".to_string()),
            revelation: None,
            revelation_en: Some("Meccan".to_string()),
            revelation_id: None,
            audio_url: None,
        };

        let info = payload.into_surah_info().unwrap();
        assert_eq!(info.number, 18);
        assert_eq!(info.name, "The Cave");
        assert_eq!(info.verse_count, 110);
        assert_eq!(info.revelation.as_deref(), Some("Meccan"));
    }

    #[test]
    fn surah_payload_without_number_fails() {
        let payload = SurahPayload {
            number: None,
            name_id: None,
            name_en: None,
            name_long: None,
            number_of_verses: None,
            revelation: None,
            revelation_en: None,
            revelation_id: None,
            audio_url: None,
        };

        assert!(payload.into_surah_info().is_err());
    }
}
