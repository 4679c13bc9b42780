//! Persistent storage: key-value adapter and record-key helpers.
//!
//! Each day's record is one entry in the store, keyed by
//! `stoiric_<YYYY-MM-DD>` (local date). No other journaling state exists;
//! clearing the store removes everything, including the quote cache.

pub mod kv;
pub mod sqlite;

pub use kv::{KvStore, MemoryKvStore};
pub use sqlite::SqliteKvStore;

use std::path::PathBuf;

use chrono::NaiveDate;

/// Prefix for daily-record keys in the store.
pub const RECORD_KEY_PREFIX: &str = "stoiric_";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Store key for the record of the given date.
pub fn record_key(date: NaiveDate) -> String {
    format!("{RECORD_KEY_PREFIX}{}", date.format(DATE_FORMAT))
}

/// Parse the date back out of a record key. Returns `None` for keys that
/// are not zero-padded `stoiric_YYYY-MM-DD`.
pub fn date_from_key(key: &str) -> Option<NaiveDate> {
    let raw = key.strip_prefix(RECORD_KEY_PREFIX)?;
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

/// Returns `~/.config/stoiric[-dev]/` based on STOIRIC_ENV, or the
/// directory named by STOIRIC_DATA_DIR when set.
///
/// Set STOIRIC_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let dir = if let Ok(dir) = std::env::var("STOIRIC_DATA_DIR") {
        PathBuf::from(dir)
    } else {
        let base_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config");
        let env = std::env::var("STOIRIC_ENV").unwrap_or_else(|_| "production".to_string());
        if env == "dev" {
            base_dir.join("stoiric-dev")
        } else {
            base_dir.join("stoiric")
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
