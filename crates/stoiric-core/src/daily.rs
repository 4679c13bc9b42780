//! A day's journal record and its derived-field rules.
//!
//! [`DailyRecord`] is the aggregate root persisted per calendar date. The
//! task counts and rating total are always derived: callers never write them
//! directly, they are recomputed by [`DailyRecord::merge`] whenever an update
//! touches `tasks` or `scores`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Highest rating a single metric can receive.
pub const MAX_RATING: u8 = 10;

/// Maximum possible rating sum across the five fixed metrics.
pub const MAX_TOTAL_RATING: u32 = 50;

/// Number of reflection prompts answered per day.
pub const REFLECTION_QUESTION_COUNT: usize = 4;

/// The fixed set of subjective day metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Metric {
    Focus,
    Creativity,
    Energy,
    Productivity,
    Satisfaction,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Focus,
        Metric::Creativity,
        Metric::Energy,
        Metric::Productivity,
        Metric::Satisfaction,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Metric::Focus => "Focus",
            Metric::Creativity => "Creativity",
            Metric::Energy => "Energy",
            Metric::Productivity => "Productivity",
            Metric::Satisfaction => "Satisfaction",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "focus" => Ok(Metric::Focus),
            "creativity" => Ok(Metric::Creativity),
            "energy" => Ok(Metric::Energy),
            "productivity" => Ok(Metric::Productivity),
            "satisfaction" => Ok(Metric::Satisfaction),
            other => Err(format!(
                "unknown metric '{other}' (expected focus, creativity, energy, productivity or satisfaction)"
            )),
        }
    }
}

/// Ratings in [0,10] for the metrics rated so far.
///
/// Keys are fixed; a partially filled map sums only what is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailyScores(BTreeMap<Metric, u8>);

impl DailyScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a metric's rating, clamped to [0,10].
    pub fn set(&mut self, metric: Metric, rating: u8) {
        self.0.insert(metric, rating.min(MAX_RATING));
    }

    pub fn get(&self, metric: Metric) -> Option<u8> {
        self.0.get(&metric).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of the ratings present in the map.
    pub fn total(&self) -> u32 {
        self.0.values().map(|&v| u32::from(v)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, u8)> + '_ {
        self.0.iter().map(|(&m, &v)| (m, v))
    }
}

/// A single goal for the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique id derived from the creation timestamp (epoch milliseconds).
    pub id: i64,
    pub text: String,
    #[serde(default)]
    pub important: bool,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Utc::now().timestamp_millis(),
            text: text.into(),
            important: false,
            completed: false,
        }
    }
}

/// The persisted state for one calendar date.
///
/// `total_tasks`, `completed_tasks` and `total_rating` are derived fields,
/// recomputed by [`merge`](Self::merge) on every update that touches their
/// source. `final_score` is written exactly once by finalization, after
/// which `is_day_completed` stays true for that date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DailyRecord {
    pub tasks: Vec<Task>,
    pub total_tasks: u32,
    pub completed_tasks: u32,
    pub reflection_answers: Vec<String>,
    pub scores: DailyScores,
    pub total_rating: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_score: Option<f64>,
    pub is_day_completed: bool,
}

/// A partial update over the current day's record.
///
/// Absent fields keep their current value; present fields overwrite.
#[derive(Debug, Clone, Default)]
pub struct DailyUpdate {
    pub tasks: Option<Vec<Task>>,
    pub reflection_answers: Option<Vec<String>>,
    pub scores: Option<DailyScores>,
    pub final_score: Option<f64>,
    pub is_day_completed: Option<bool>,
}

impl DailyUpdate {
    pub fn tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Some(tasks),
            ..Self::default()
        }
    }

    pub fn reflection_answers(answers: Vec<String>) -> Self {
        Self {
            reflection_answers: Some(answers),
            ..Self::default()
        }
    }

    pub fn scores(scores: DailyScores) -> Self {
        Self {
            scores: Some(scores),
            ..Self::default()
        }
    }

    /// Update locking in the day: sets the final score and marks completion.
    pub fn finalized(final_score: f64) -> Self {
        Self {
            final_score: Some(final_score),
            is_day_completed: Some(true),
            ..Self::default()
        }
    }
}

impl DailyRecord {
    /// Apply a partial update over this record, recomputing derived fields
    /// for whichever of `tasks`/`scores` the update carried.
    pub fn merge(&self, update: DailyUpdate) -> DailyRecord {
        let mut merged = self.clone();
        let tasks_changed = update.tasks.is_some();
        let scores_changed = update.scores.is_some();

        if let Some(tasks) = update.tasks {
            merged.tasks = tasks;
        }
        if let Some(answers) = update.reflection_answers {
            merged.reflection_answers = answers;
        }
        if let Some(scores) = update.scores {
            merged.scores = scores;
        }
        if let Some(final_score) = update.final_score {
            merged.final_score = Some(final_score);
        }
        if let Some(is_day_completed) = update.is_day_completed {
            merged.is_day_completed = is_day_completed;
        }

        if tasks_changed {
            merged.total_tasks = merged.tasks.len() as u32;
            merged.completed_tasks = merged.tasks.iter().filter(|t| t.completed).count() as u32;
        }
        if scores_changed {
            merged.total_rating = merged.scores.total();
        }

        merged
    }

    /// Tasks in presentation order: pending before completed, important
    /// first within each group. Storage order is untouched.
    pub fn sorted_tasks(&self) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self.tasks.iter().collect();
        tasks.sort_by_key(|t| (t.completed, !t.important));
        tasks
    }
}

/// Compute a day's final score in [0,100].
///
/// Pure: `round1(completed/total * rating/50 * 100)`, 0 when the day has no
/// tasks regardless of the rating total.
pub fn compute_final_score(record: &DailyRecord) -> f64 {
    if record.total_tasks == 0 {
        return 0.0;
    }
    let task_ratio = f64::from(record.completed_tasks) / f64::from(record.total_tasks);
    let rating_ratio = f64::from(record.total_rating) / f64::from(MAX_TOTAL_RATING);
    let score = (task_ratio * rating_ratio * 100.0).clamp(0.0, 100.0);
    (score * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn task(id: i64, text: &str, important: bool, completed: bool) -> Task {
        Task {
            id,
            text: text.into(),
            important,
            completed,
        }
    }

    #[test]
    fn merge_keeps_absent_fields() {
        let current = DailyRecord {
            reflection_answers: vec!["yes".into()],
            final_score: Some(12.5),
            ..Default::default()
        };

        let merged = current.merge(DailyUpdate::tasks(vec![task(1, "read", false, false)]));

        assert_eq!(merged.reflection_answers, vec!["yes".to_string()]);
        assert_eq!(merged.final_score, Some(12.5));
        assert_eq!(merged.tasks.len(), 1);
    }

    #[test]
    fn merge_recomputes_task_counts() {
        let current = DailyRecord::default();
        let merged = current.merge(DailyUpdate::tasks(vec![
            task(1, "a", false, true),
            task(2, "b", true, false),
            task(3, "c", false, true),
        ]));

        assert_eq!(merged.total_tasks, 3);
        assert_eq!(merged.completed_tasks, 2);
    }

    #[test]
    fn merge_recomputes_rating_total() {
        let mut scores = DailyScores::new();
        scores.set(Metric::Focus, 7);
        scores.set(Metric::Energy, 4);

        let merged = DailyRecord::default().merge(DailyUpdate::scores(scores));

        assert_eq!(merged.total_rating, 11);
    }

    #[test]
    fn merge_without_tasks_leaves_counts_alone() {
        let current = DailyRecord {
            tasks: vec![task(1, "a", false, true)],
            total_tasks: 1,
            completed_tasks: 1,
            ..Default::default()
        };

        let merged = current.merge(DailyUpdate::reflection_answers(vec!["fine".into()]));

        assert_eq!(merged.total_tasks, 1);
        assert_eq!(merged.completed_tasks, 1);
    }

    #[test]
    fn finalized_update_locks_the_day() {
        let merged = DailyRecord::default().merge(DailyUpdate::finalized(42.0));
        assert_eq!(merged.final_score, Some(42.0));
        assert!(merged.is_day_completed);
    }

    #[test]
    fn scores_clamp_to_max_rating() {
        let mut scores = DailyScores::new();
        scores.set(Metric::Creativity, 200);
        assert_eq!(scores.get(Metric::Creativity), Some(MAX_RATING));
    }

    #[test]
    fn final_score_matches_reference_example() {
        let record = DailyRecord {
            total_tasks: 4,
            completed_tasks: 2,
            total_rating: 30,
            ..Default::default()
        };
        assert_eq!(compute_final_score(&record), 30.0);
    }

    #[test]
    fn final_score_zero_without_tasks() {
        let record = DailyRecord {
            total_tasks: 0,
            completed_tasks: 0,
            total_rating: 50,
            ..Default::default()
        };
        assert_eq!(compute_final_score(&record), 0.0);
    }

    #[test]
    fn final_score_rounds_to_one_decimal() {
        // 1/3 * 10/50 * 100 = 6.666...
        let record = DailyRecord {
            total_tasks: 3,
            completed_tasks: 1,
            total_rating: 10,
            ..Default::default()
        };
        assert_eq!(compute_final_score(&record), 6.7);
    }

    #[test]
    fn sorted_tasks_puts_pending_important_first() {
        let record = DailyRecord {
            tasks: vec![
                task(1, "done", false, true),
                task(2, "plain", false, false),
                task(3, "key", true, false),
                task(4, "done-important", true, true),
            ],
            ..Default::default()
        };

        let order: Vec<i64> = record.sorted_tasks().iter().map(|t| t.id).collect();
        assert_eq!(order, vec![3, 2, 4, 1]);
    }

    #[test]
    fn record_round_trips_through_json() {
        let mut scores = DailyScores::new();
        scores.set(Metric::Satisfaction, 9);
        let record = DailyRecord {
            tasks: vec![task(1, "write", true, true)],
            total_tasks: 1,
            completed_tasks: 1,
            reflection_answers: vec!["shipped it".into()],
            scores,
            total_rating: 9,
            final_score: Some(18.0),
            is_day_completed: true,
        };

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"totalTasks\":1"));
        assert!(json.contains("\"isDayCompleted\":true"));

        let back: DailyRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn partial_json_deserializes_with_defaults() {
        let record: DailyRecord =
            serde_json::from_str(r#"{"tasks":[{"id":1,"text":"walk"}]}"#).unwrap();
        assert_eq!(record.tasks.len(), 1);
        assert!(!record.is_day_completed);
        assert_eq!(record.final_score, None);
    }

    proptest! {
        #[test]
        fn derived_counts_always_match_tasks(flags in prop::collection::vec(any::<(bool, bool)>(), 0..32)) {
            let tasks: Vec<Task> = flags
                .iter()
                .enumerate()
                .map(|(i, &(important, completed))| Task {
                    id: i as i64,
                    text: format!("task {i}"),
                    important,
                    completed,
                })
                .collect();
            let completed = tasks.iter().filter(|t| t.completed).count() as u32;

            let merged = DailyRecord::default().merge(DailyUpdate::tasks(tasks.clone()));

            prop_assert_eq!(merged.total_tasks as usize, tasks.len());
            prop_assert_eq!(merged.completed_tasks, completed);
        }
    }
}
