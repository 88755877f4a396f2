//! Core data models for the daily quote widget
//!
//! This module contains the quote value type, the calendar day key used to
//! decide cache freshness, and the record persisted between runs.

pub mod quotes;
pub mod zenquotes;

pub use quotes::{fallback_quote, random_quote, QUOTES};
pub use zenquotes::{FetchError, OfflineSource, RemoteQuoteSource, ZenQuotesClient};

use chrono::{DateTime, Datelike, Local, NaiveDate};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// A quote with its author
///
/// Both fields are non-empty for any quote built through [`Quote::new`].
/// Deserialized quotes are checked with [`Quote::is_valid`] before use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// The quote itself
    pub text: String,
    /// Who said it
    pub author: String,
}

impl Quote {
    /// Creates a quote, returning `None` if either field is blank
    pub fn new(text: impl Into<String>, author: impl Into<String>) -> Option<Self> {
        let quote = Self {
            text: text.into(),
            author: author.into(),
        };
        quote.is_valid().then_some(quote)
    }

    /// Whether both text and author contain something other than whitespace
    pub fn is_valid(&self) -> bool {
        !self.text.trim().is_empty() && !self.author.trim().is_empty()
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" — {}", self.text, self.author)
    }
}

/// A local calendar day, formatted as `YYYY-MM-DD`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// The day key of a local timestamp
    pub fn from_local(now: DateTime<Local>) -> Self {
        Self(now.date_naive())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// The key's digits read as one integer, e.g. `2024-03-15` -> `20240315`
    pub fn as_number(&self) -> i64 {
        i64::from(self.0.year()) * 10_000
            + i64::from(self.0.month()) * 100
            + i64::from(self.0.day())
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for DayKey {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").map(Self)
    }
}

/// Where a cached quote came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteSource {
    /// Fetched from the remote quote service
    #[serde(alias = "zenquotes")]
    Remote,
    /// Picked from the built-in table
    Fallback,
}

/// The single record persisted between runs
///
/// `date` is kept as the raw string from disk: a value that is not today's
/// key, well-formed or not, only makes the record stale. Only `date` and
/// `quote` decide reuse; `source` and `lastUpdated` are informational and
/// read as `None` when missing or unrecognized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheRecord {
    /// Day the quote belongs to (`YYYY-MM-DD`)
    pub date: String,
    /// The resolved quote
    pub quote: Quote,
    /// Provenance of `quote`
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub source: Option<QuoteSource>,
    /// When this record was written
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Local>>,
}

/// Reads an optional field, treating any value of the wrong shape as absent
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

impl CacheRecord {
    pub fn new(day: DayKey, quote: Quote, source: QuoteSource, now: DateTime<Local>) -> Self {
        Self {
            date: day.to_string(),
            quote,
            source: Some(source),
            last_updated: Some(now),
        }
    }

    /// Returns the cached quote if this record can be reused for `day`
    pub fn quote_for(&self, day: DayKey) -> Option<&Quote> {
        (self.date == day.to_string() && self.quote.is_valid()).then_some(&self.quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(s: &str) -> DayKey {
        s.parse().expect("valid day key")
    }

    #[test]
    fn test_quote_new_rejects_blank_fields() {
        assert!(Quote::new("", "Someone").is_none());
        assert!(Quote::new("Something", "   ").is_none());
        assert!(Quote::new("Something", "Someone").is_some());
    }

    #[test]
    fn test_day_key_display_is_zero_padded() {
        let key = DayKey::new(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(key.to_string(), "2024-03-05");
    }

    #[test]
    fn test_day_key_parse_rejects_garbage() {
        assert!("2024-13-01".parse::<DayKey>().is_err());
        assert!("yesterday".parse::<DayKey>().is_err());
    }

    #[test]
    fn test_day_key_as_number_concatenates_digits() {
        assert_eq!(day("2024-03-15").as_number(), 20240315);
        assert_eq!(day("1999-12-31").as_number(), 19991231);
        assert_eq!(day("2025-01-01").as_number(), 20250101);
    }

    #[test]
    fn test_day_key_from_local_uses_local_date() {
        let now = Local.with_ymd_and_hms(2024, 7, 4, 23, 59, 0).unwrap();
        assert_eq!(DayKey::from_local(now).to_string(), "2024-07-04");
    }

    #[test]
    fn test_record_serializes_with_expected_field_names() {
        let now = Local.with_ymd_and_hms(2024, 3, 15, 8, 0, 0).unwrap();
        let record = CacheRecord::new(
            day("2024-03-15"),
            Quote::new("Hi", "Bob").unwrap(),
            QuoteSource::Remote,
            now,
        );

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["date"], "2024-03-15");
        assert_eq!(json["quote"]["text"], "Hi");
        assert_eq!(json["quote"]["author"], "Bob");
        assert_eq!(json["source"], "remote");
        assert!(json["lastUpdated"].is_string());
    }

    #[test]
    fn test_legacy_zenquotes_source_reads_as_remote() {
        let json = r#"{
            "date": "2024-03-15",
            "quote": {"text": "Hi", "author": "Bob"},
            "source": "zenquotes",
            "lastUpdated": "2024-03-15T08:00:00.000Z"
        }"#;
        let record: CacheRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.source, Some(QuoteSource::Remote));
        assert!(record.last_updated.is_some());
    }

    #[test]
    fn test_record_without_metadata_is_still_usable() {
        let json = r#"{"date": "2024-03-15", "quote": {"text": "Hi", "author": "Bob"}}"#;
        let record: CacheRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.source, None);
        assert_eq!(record.last_updated, None);
        assert_eq!(record.quote_for(day("2024-03-15")).map(|q| q.author.as_str()), Some("Bob"));
    }

    #[test]
    fn test_unrecognized_metadata_reads_as_none() {
        let json = r#"{
            "date": "2024-03-15",
            "quote": {"text": "Hi", "author": "Bob"},
            "source": "somewhere-else",
            "lastUpdated": "last tuesday"
        }"#;
        let record: CacheRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.source, None);
        assert_eq!(record.last_updated, None);
        assert!(record.quote_for(day("2024-03-15")).is_some());
    }

    #[test]
    fn test_record_without_quote_is_rejected() {
        let json = r#"{"date": "2024-03-15", "source": "remote"}"#;
        assert!(serde_json::from_str::<CacheRecord>(json).is_err());
    }

    #[test]
    fn test_quote_for_requires_matching_day_and_valid_quote() {
        let now = Local::now();
        let today = day("2024-03-15");
        let quote = Quote::new("Hi", "Bob").unwrap();
        let record = CacheRecord::new(today, quote, QuoteSource::Remote, now);
        assert!(record.quote_for(today).is_some());
        assert!(record.quote_for(day("2024-03-16")).is_none());

        let blank = CacheRecord {
            quote: Quote {
                text: String::new(),
                author: "Bob".to_string(),
            },
            ..record
        };
        assert!(blank.quote_for(today).is_none());
    }
}
