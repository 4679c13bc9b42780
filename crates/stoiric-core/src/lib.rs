//! # Stoiric Core Library
//!
//! This library provides the core business logic for Stoiric, a personal
//! daily-journaling companion: set goals for the day, complete them, answer
//! the evening reflection prompts, rate the day, and lock in a final score.
//! The CLI binary is a thin presentation layer over this library.
//!
//! ## Architecture
//!
//! - **Daily Record Engine**: owns the schema of a day's record, the
//!   merge/derive rules for partial updates, and the date-keyed read/write
//!   path for "today" and for history views
//! - **Aggregation Engine**: scans all persisted records on demand to build
//!   the completed-days map and the consecutive-day streak
//! - **Storage**: an async key-value adapter with a SQLite-backed
//!   implementation, plus an in-memory one for tests and embedders
//! - **Quote Service**: fetches the stoic quote of the day and caches it in
//!   the same store
//!
//! ## Key Components
//!
//! - [`DailyJournal`]: record engine and aggregation entry point
//! - [`DailyRecord`]: the persisted state for one calendar date
//! - [`KvStore`]: storage adapter trait
//! - [`Debouncer`]: trailing-edge write coalescing policy
//! - [`Config`]: application configuration management

pub mod aggregate;
pub mod clock;
pub mod config;
pub mod daily;
pub mod debounce;
pub mod error;
pub mod journal;
pub mod quote;
pub mod storage;

pub use aggregate::DailyLog;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use daily::{compute_final_score, DailyRecord, DailyScores, DailyUpdate, Metric, Task};
pub use debounce::Debouncer;
pub use error::{ConfigError, CoreError, QuoteError, StorageError};
pub use journal::DailyJournal;
pub use quote::{Quote, QuoteService};
pub use storage::{KvStore, MemoryKvStore, SqliteKvStore};
