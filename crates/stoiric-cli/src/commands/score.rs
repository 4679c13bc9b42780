use clap::Subcommand;
use stoiric_core::{compute_final_score, Metric};

use crate::common;

#[derive(Subcommand)]
pub enum ScoreAction {
    /// Rate one metric for today (0-10)
    Rate { metric: Metric, value: u8 },
    /// Show today's ratings
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Compute and lock in today's final score
    Finalize,
}

pub async fn run(action: ScoreAction) -> Result<(), Box<dyn std::error::Error>> {
    let journal = common::open_journal()?;

    if !journal.is_today_started().await {
        return Err("add at least one goal before rating the day (`stoiric day add`)".into());
    }

    match action {
        ScoreAction::Rate { metric, value } => {
            if journal.is_today_completed().await {
                return Err("today is already finalized; ratings can no longer change".into());
            }
            if value > 10 {
                return Err(format!("rating must be between 0 and 10, got {value}").into());
            }
            let mut scores = journal.read_today().await.unwrap_or_default().scores;
            scores.set(metric, value);
            let record = journal.set_scores(scores).await;
            println!("{metric}: {value}/10 (total {}/50)", record.total_rating);
        }
        ScoreAction::Show { json } => {
            let record = journal.read_today().await.unwrap_or_default();
            if json {
                println!("{}", serde_json::to_string_pretty(&record.scores)?);
            } else {
                for metric in Metric::ALL {
                    match record.scores.get(metric) {
                        Some(rating) => println!("{metric:<13}{rating}/10"),
                        None => println!("{metric:<13}-"),
                    }
                }
                println!("Total rating: {}/50", record.total_rating);
            }
        }
        ScoreAction::Finalize => {
            if journal.is_today_completed().await {
                return Err("today is already finalized".into());
            }
            let current = journal.read_today().await.unwrap_or_default();
            let score = compute_final_score(&current);
            journal.finalize(score).await;
            println!("Final score: {score:.1} / 100");
        }
    }
    Ok(())
}
