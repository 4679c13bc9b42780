//! Shared helpers for CLI commands.

use std::sync::Arc;

use stoiric_core::{DailyJournal, DailyRecord, KvStore, Metric, SqliteKvStore};

/// The evening reflection prompts, in order. The record stores one answer
/// per prompt; screens show a closing message once all four are answered.
pub const REFLECTION_QUESTIONS: [&str; 4] = [
    "Did you achieve your priority of the day?",
    "What worked well?",
    "What went wrong?",
    "What did you learn today?",
];

pub fn open_store() -> Result<Arc<dyn KvStore>, Box<dyn std::error::Error>> {
    Ok(Arc::new(SqliteKvStore::open()?))
}

pub fn open_journal() -> Result<DailyJournal, Box<dyn std::error::Error>> {
    Ok(DailyJournal::new(open_store()?))
}

/// Print today's goals in display order.
pub fn print_tasks(record: &DailyRecord) {
    if record.tasks.is_empty() {
        println!("No goals yet. Add one with `stoiric day add <text>`.");
        return;
    }
    for task in record.sorted_tasks() {
        let mark = if task.completed { "x" } else { " " };
        let star = if task.important { " *" } else { "" };
        println!("[{mark}] {}  {}{star}", task.id, task.text);
    }
    println!(
        "{}/{} completed",
        record.completed_tasks, record.total_tasks
    );
}

/// Print a full record: goals, answers, ratings, score.
pub fn print_record(record: &DailyRecord) {
    print_tasks(record);

    if !record.reflection_answers.is_empty() {
        println!();
        for (question, answer) in REFLECTION_QUESTIONS
            .iter()
            .zip(record.reflection_answers.iter())
        {
            println!("Q: {question}");
            println!("A: {answer}");
        }
    }

    if !record.scores.is_empty() {
        println!();
        for metric in Metric::ALL {
            match record.scores.get(metric) {
                Some(rating) => println!("{metric:<13}{rating}/10"),
                None => println!("{metric:<13}-"),
            }
        }
        println!("Total rating: {}/50", record.total_rating);
    }

    if let Some(score) = record.final_score {
        println!();
        println!("Final score: {score:.1} / 100");
    }
}
