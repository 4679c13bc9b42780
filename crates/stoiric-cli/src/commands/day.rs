use clap::Subcommand;
use stoiric_core::Task;

use crate::common;

#[derive(Subcommand)]
pub enum DayAction {
    /// Add a goal for today
    Add {
        text: String,
        /// Mark the goal as important
        #[arg(long)]
        important: bool,
    },
    /// List today's goals
    List {
        #[arg(long)]
        json: bool,
    },
    /// Mark a goal completed
    Done { id: i64 },
    /// Mark a goal as not completed
    Undo { id: i64 },
    /// Toggle a goal's important flag
    Star { id: i64 },
    /// Replace a goal's text
    Edit { id: i64, text: String },
}

pub async fn run(action: DayAction) -> Result<(), Box<dyn std::error::Error>> {
    let journal = common::open_journal()?;

    // The engine stays permissive; the gate lives here.
    if !matches!(action, DayAction::List { .. }) && journal.is_today_completed().await {
        return Err("today is already finalized; goals can no longer change".into());
    }

    match action {
        DayAction::Add { text, important } => {
            let mut tasks = journal.read_today().await.unwrap_or_default().tasks;
            let mut task = Task::new(text);
            task.important = important;
            tasks.push(task);
            let record = journal.set_tasks(tasks).await;
            println!("Added goal ({} today)", record.total_tasks);
        }
        DayAction::List { json } => {
            let record = journal.read_today().await.unwrap_or_default();
            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                common::print_tasks(&record);
            }
        }
        DayAction::Done { id } => {
            let record = edit_task(&journal, id, |t| t.completed = true).await?;
            println!(
                "{}/{} completed",
                record.completed_tasks, record.total_tasks
            );
        }
        DayAction::Undo { id } => {
            let record = edit_task(&journal, id, |t| t.completed = false).await?;
            println!(
                "{}/{} completed",
                record.completed_tasks, record.total_tasks
            );
        }
        DayAction::Star { id } => {
            let record = edit_task(&journal, id, |t| t.important = !t.important).await?;
            common::print_tasks(&record);
        }
        DayAction::Edit { id, text } => {
            edit_task(&journal, id, |t| t.text = text).await?;
            println!("Goal updated");
        }
    }
    Ok(())
}

async fn edit_task(
    journal: &stoiric_core::DailyJournal,
    id: i64,
    apply: impl FnOnce(&mut Task),
) -> Result<stoiric_core::DailyRecord, Box<dyn std::error::Error>> {
    let mut tasks = journal.read_today().await.unwrap_or_default().tasks;
    let task = tasks
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or_else(|| format!("no goal with id {id}"))?;
    apply(task);
    Ok(journal.set_tasks(tasks).await)
}
