use crate::common;

pub async fn run(yes: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !yes {
        return Err("this deletes every journal entry; pass --yes to confirm".into());
    }
    let journal = common::open_journal()?;
    journal.clear_all().await;
    println!("All journal data cleared.");
    Ok(())
}
