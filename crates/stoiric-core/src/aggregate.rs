//! Cross-day summaries: log listing, completed-day map, streak.
//!
//! There is no separate index to drift out of date; every summary is
//! recomputed from the persisted records on demand. That is O(records) per
//! call, fine at personal-journal scale.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};

use crate::daily::DailyRecord;
use crate::journal::DailyJournal;
use crate::storage::{date_from_key, RECORD_KEY_PREFIX};

/// One persisted day, as surfaced by the history views.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLog {
    pub date: NaiveDate,
    pub record: DailyRecord,
}

impl DailyJournal {
    /// Every persisted record, most recent date first.
    ///
    /// Entries that fail to deserialize are skipped, not fatal. Storage
    /// failures yield an empty list.
    pub async fn list_all_records(&self) -> Vec<DailyLog> {
        let keys = match self.store.get_all_keys().await {
            Ok(keys) => keys,
            Err(error) => {
                warn!(%error, "key scan failed");
                return Vec::new();
            }
        };
        let record_keys: Vec<String> = keys
            .into_iter()
            .filter(|k| k.starts_with(RECORD_KEY_PREFIX))
            .collect();
        if record_keys.is_empty() {
            return Vec::new();
        }

        let pairs = match self.store.multi_get(&record_keys).await {
            Ok(pairs) => pairs,
            Err(error) => {
                warn!(%error, "bulk read failed");
                return Vec::new();
            }
        };

        let mut logs = Vec::with_capacity(pairs.len());
        for (key, value) in pairs {
            let Some(value) = value else { continue };
            let Some(date) = date_from_key(&key) else {
                debug!(%key, "skipping entry with unparseable date key");
                continue;
            };
            match serde_json::from_str::<DailyRecord>(&value) {
                Ok(record) => logs.push(DailyLog { date, record }),
                Err(error) => warn!(%key, %error, "skipping malformed record"),
            }
        }
        logs.sort_by(|a, b| b.date.cmp(&a.date));
        logs
    }

    /// Completed days only, mapped to their final score (0 when absent).
    pub async fn completed_days(&self) -> BTreeMap<NaiveDate, f64> {
        self.list_all_records()
            .await
            .into_iter()
            .filter(|log| log.record.is_day_completed)
            .map(|log| (log.date, log.record.final_score.unwrap_or(0.0)))
            .collect()
    }

    /// Count of consecutive completed days, walking backward from the most
    /// recent completed day.
    ///
    /// A day not yet completed today does not break an existing streak, but
    /// a gap of two or more days does: when neither today nor yesterday is
    /// completed and the most recent completed day is not yesterday, the
    /// streak is 0.
    pub async fn streak(&self) -> u32 {
        let completed = self.completed_days().await;
        let Some((&most_recent, _)) = completed.iter().next_back() else {
            return 0;
        };

        let today = self.clock.today();
        let yesterday = today.pred_opt().unwrap_or(today);
        if !completed.contains_key(&today)
            && !completed.contains_key(&yesterday)
            && most_recent != yesterday
        {
            return 0;
        }

        let mut streak = 0;
        let mut cursor = most_recent;
        while completed.contains_key(&cursor) {
            streak += 1;
            match cursor.pred_opt() {
                Some(prev) => cursor = prev,
                None => break,
            }
        }
        streak
    }
}
