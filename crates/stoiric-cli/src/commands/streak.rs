use crate::common;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let journal = common::open_journal()?;
    let completed = journal.completed_days().await;
    let streak = journal.streak().await;

    println!("Completed days: {}", completed.len());
    println!("Current streak: {streak}");
    Ok(())
}
