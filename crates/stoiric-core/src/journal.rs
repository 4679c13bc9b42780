//! Daily record engine: read and partially update the record for "today".
//!
//! Every storage failure is swallowed at this layer and surfaced as an
//! absent read or a dropped write, never as an error to the caller. The
//! presentation layer stays resilient to transient storage trouble at the
//! cost of silent loss on a failed write; callers needing confirmation
//! re-read the record.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::warn;

use crate::clock::{Clock, SystemClock};
use crate::daily::{DailyRecord, DailyScores, DailyUpdate, Task};
use crate::storage::{record_key, KvStore};

/// Engine over the store for the single local user's journal.
pub struct DailyJournal {
    pub(crate) store: Arc<dyn KvStore>,
    pub(crate) clock: Arc<dyn Clock>,
}

impl DailyJournal {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<dyn KvStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Today's local calendar date, as the engine sees it.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// The record under today's key, or `None` if the day has not started
    /// (or the read failed).
    pub async fn read_today(&self) -> Option<DailyRecord> {
        self.read_date(self.clock.today()).await
    }

    /// The record for an explicit past (or future) date.
    pub async fn read_date(&self, date: NaiveDate) -> Option<DailyRecord> {
        let key = record_key(date);
        let raw = match self.store.get(&key).await {
            Ok(value) => value?,
            Err(error) => {
                warn!(%key, %error, "record read failed, treating as absent");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(error) => {
                warn!(%key, %error, "record is malformed, treating as absent");
                None
            }
        }
    }

    /// Merge a partial update over today's record and persist the result.
    ///
    /// An absent current record defaults to an empty one, so the first
    /// write of the day implicitly creates it. Returns the merged record
    /// whether or not the write stuck.
    pub async fn apply_update(&self, update: DailyUpdate) -> DailyRecord {
        let today = self.clock.today();
        let current = self.read_date(today).await.unwrap_or_default();
        let merged = current.merge(update);

        let key = record_key(today);
        match serde_json::to_string(&merged) {
            Ok(json) => {
                if let Err(error) = self.store.set(&key, &json).await {
                    warn!(%key, %error, "record write dropped");
                }
            }
            Err(error) => warn!(%key, %error, "record serialization failed, write dropped"),
        }
        merged
    }

    /// Replace today's task list. Task counts are rederived.
    pub async fn set_tasks(&self, tasks: Vec<Task>) -> DailyRecord {
        self.apply_update(DailyUpdate::tasks(tasks)).await
    }

    /// Replace today's reflection answers.
    pub async fn set_reflection_answers(&self, answers: Vec<String>) -> DailyRecord {
        self.apply_update(DailyUpdate::reflection_answers(answers))
            .await
    }

    /// Replace today's metric ratings. The rating total is rederived.
    pub async fn set_scores(&self, scores: DailyScores) -> DailyRecord {
        self.apply_update(DailyUpdate::scores(scores)).await
    }

    /// Lock in today's final score and mark the day completed.
    ///
    /// The engine stays permissive on a repeated call; callers are expected
    /// to gate on [`is_today_completed`](Self::is_today_completed) first.
    pub async fn finalize(&self, final_score: f64) -> DailyRecord {
        self.apply_update(DailyUpdate::finalized(final_score)).await
    }

    /// Whether today's record exists with at least one task. Reflection and
    /// scoring flows are gated on this.
    pub async fn is_today_started(&self) -> bool {
        self.read_today()
            .await
            .map(|r| !r.tasks.is_empty())
            .unwrap_or(false)
    }

    /// Whether today's final score has been locked in.
    pub async fn is_today_completed(&self) -> bool {
        self.read_today()
            .await
            .map(|r| r.is_day_completed)
            .unwrap_or(false)
    }

    /// Delete every entry in the underlying store. Irreversible; this also
    /// removes non-record entries such as the quote cache.
    pub async fn clear_all(&self) {
        if let Err(error) = self.store.clear().await {
            warn!(%error, "clear-all failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::daily::Metric;
    use crate::error::StorageError;
    use crate::storage::MemoryKvStore;
    use async_trait::async_trait;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn journal() -> DailyJournal {
        DailyJournal::with_clock(
            Arc::new(MemoryKvStore::new()),
            Arc::new(FixedClock::new(date(2026, 8, 29))),
        )
    }

    fn task(id: i64, text: &str, completed: bool) -> Task {
        Task {
            id,
            text: text.into(),
            important: false,
            completed,
        }
    }

    /// Store whose every operation fails, for the swallow-errors contract.
    struct FailingKvStore;

    #[async_trait]
    impl KvStore for FailingKvStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::QueryFailed("boom".into()))
        }
        async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::QueryFailed("boom".into()))
        }
        async fn get_all_keys(&self) -> Result<Vec<String>, StorageError> {
            Err(StorageError::QueryFailed("boom".into()))
        }
        async fn multi_get(
            &self,
            _keys: &[String],
        ) -> Result<Vec<(String, Option<String>)>, StorageError> {
            Err(StorageError::QueryFailed("boom".into()))
        }
        async fn clear(&self) -> Result<(), StorageError> {
            Err(StorageError::QueryFailed("boom".into()))
        }
    }

    #[tokio::test]
    async fn read_today_absent_before_first_write() {
        assert_eq!(journal().read_today().await, None);
    }

    #[tokio::test]
    async fn first_task_write_creates_the_record() {
        let journal = journal();
        let record = journal.set_tasks(vec![task(1, "walk", false)]).await;
        assert_eq!(record.total_tasks, 1);
        assert_eq!(record.completed_tasks, 0);

        let reread = journal.read_today().await.unwrap();
        assert_eq!(reread, record);
    }

    #[tokio::test]
    async fn derived_counts_hold_across_task_writes() {
        let journal = journal();
        journal.set_tasks(vec![task(1, "a", false)]).await;
        journal
            .set_tasks(vec![task(1, "a", true), task(2, "b", false)])
            .await;

        let record = journal.read_today().await.unwrap();
        assert_eq!(record.total_tasks, 2);
        assert_eq!(record.completed_tasks, 1);
    }

    #[tokio::test]
    async fn rating_total_holds_on_reread() {
        let journal = journal();
        let mut scores = DailyScores::new();
        scores.set(Metric::Focus, 8);
        scores.set(Metric::Productivity, 5);
        journal.set_scores(scores.clone()).await;

        let record = journal.read_today().await.unwrap();
        assert_eq!(record.total_rating, scores.total());
    }

    #[tokio::test]
    async fn finalize_round_trips() {
        let journal = journal();
        journal.set_tasks(vec![task(1, "a", true)]).await;
        journal.finalize(77.5).await;

        let record = journal.read_today().await.unwrap();
        assert!(record.is_day_completed);
        assert_eq!(record.final_score, Some(77.5));
        assert!(journal.is_today_completed().await);
    }

    #[tokio::test]
    async fn updates_on_different_days_land_under_their_own_keys() {
        let clock = Arc::new(FixedClock::new(date(2026, 8, 28)));
        let journal =
            DailyJournal::with_clock(Arc::new(MemoryKvStore::new()), clock.clone());

        journal.set_tasks(vec![task(1, "thu", false)]).await;
        clock.set(date(2026, 8, 29));
        journal.set_tasks(vec![task(2, "fri", false)]).await;

        let thursday = journal.read_date(date(2026, 8, 28)).await.unwrap();
        assert_eq!(thursday.tasks[0].text, "thu");
        let friday = journal.read_today().await.unwrap();
        assert_eq!(friday.tasks[0].text, "fri");
    }

    #[tokio::test]
    async fn started_requires_a_task() {
        let journal = journal();
        assert!(!journal.is_today_started().await);

        journal.set_reflection_answers(vec!["early".into()]).await;
        assert!(!journal.is_today_started().await);

        journal.set_tasks(vec![task(1, "a", false)]).await;
        assert!(journal.is_today_started().await);
    }

    #[tokio::test]
    async fn clear_all_leaves_every_date_absent() {
        let journal = journal();
        journal.set_tasks(vec![task(1, "a", false)]).await;
        journal.clear_all().await;

        assert_eq!(journal.read_today().await, None);
        assert_eq!(journal.read_date(date(2026, 8, 28)).await, None);
    }

    #[tokio::test]
    async fn storage_failures_never_surface() {
        let journal = DailyJournal::with_clock(
            Arc::new(FailingKvStore),
            Arc::new(FixedClock::new(date(2026, 8, 29))),
        );

        assert_eq!(journal.read_today().await, None);
        assert!(!journal.is_today_started().await);

        // The merged record still comes back even though the write dropped.
        let record = journal.set_tasks(vec![task(1, "a", false)]).await;
        assert_eq!(record.total_tasks, 1);

        journal.clear_all().await;
    }

    #[tokio::test]
    async fn malformed_record_reads_as_absent() {
        let store = Arc::new(MemoryKvStore::new());
        store.set("stoiric_2026-08-29", "not json").await.unwrap();
        let journal =
            DailyJournal::with_clock(store, Arc::new(FixedClock::new(date(2026, 8, 29))));
        assert_eq!(journal.read_today().await, None);
    }
}
