use chrono::{Datelike, NaiveDate};
use clap::Subcommand;

use crate::common;

#[derive(Subcommand)]
pub enum LogAction {
    /// List all recorded days
    List {
        #[arg(long)]
        json: bool,
    },
    /// Show one day's record (YYYY-MM-DD)
    Show { date: NaiveDate },
    /// Current month with completed days marked
    Calendar,
}

pub async fn run(action: LogAction) -> Result<(), Box<dyn std::error::Error>> {
    let journal = common::open_journal()?;

    match action {
        LogAction::List { json } => {
            let logs = journal.list_all_records().await;
            if json {
                println!("{}", serde_json::to_string_pretty(&logs)?);
                return Ok(());
            }
            if logs.is_empty() {
                println!("No journal entries yet.");
                return Ok(());
            }
            for log in logs {
                let status = match (log.record.is_day_completed, log.record.final_score) {
                    (true, Some(score)) => format!("{score:.1}"),
                    (true, None) => "0.0".to_string(),
                    (false, _) => "in progress".to_string(),
                };
                println!(
                    "{}  {:>2}/{:<2} goals  {status}",
                    log.date, log.record.completed_tasks, log.record.total_tasks
                );
            }
        }
        LogAction::Show { date } => match journal.read_date(date).await {
            Some(record) => {
                println!("{date}");
                println!();
                common::print_record(&record);
            }
            None => println!("No record for {date}"),
        },
        LogAction::Calendar => {
            let completed = journal.completed_days().await;
            let today = journal.today();
            let first = today.with_day(1).unwrap_or(today);

            println!("{}", today.format("%B %Y"));
            println!("Mo Tu We Th Fr Sa Su");

            let mut line = String::new();
            for _ in 0..first.weekday().num_days_from_monday() {
                line.push_str("   ");
            }
            let mut cursor = first;
            while cursor.month() == today.month() {
                let mark = if completed.contains_key(&cursor) {
                    '*'
                } else {
                    ' '
                };
                line.push_str(&format!("{:>2}{mark}", cursor.day()));
                if cursor.weekday().num_days_from_monday() == 6 {
                    println!("{}", line.trim_end());
                    line.clear();
                }
                cursor = match cursor.succ_opt() {
                    Some(next) => next,
                    None => break,
                };
            }
            if !line.is_empty() {
                println!("{}", line.trim_end());
            }
            println!();
            println!("* completed day");
        }
    }
    Ok(())
}
