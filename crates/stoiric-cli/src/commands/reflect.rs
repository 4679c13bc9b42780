use clap::Subcommand;

use crate::common::{self, REFLECTION_QUESTIONS};

#[derive(Subcommand)]
pub enum ReflectAction {
    /// Answer the next reflection question
    Answer { text: String },
    /// Show the questions and answers so far
    Show,
}

pub async fn run(action: ReflectAction) -> Result<(), Box<dyn std::error::Error>> {
    let journal = common::open_journal()?;

    if !journal.is_today_started().await {
        return Err("add at least one goal before reflecting (`stoiric day add`)".into());
    }

    match action {
        ReflectAction::Answer { text } => {
            if journal.is_today_completed().await {
                return Err("today is already finalized".into());
            }
            let mut answers = journal
                .read_today()
                .await
                .unwrap_or_default()
                .reflection_answers;
            if answers.len() >= REFLECTION_QUESTIONS.len() {
                return Err("all reflection questions are answered; rate your day with `stoiric score`".into());
            }
            answers.push(text);
            let record = journal.set_reflection_answers(answers).await;

            match REFLECTION_QUESTIONS.get(record.reflection_answers.len()) {
                Some(next) => println!("{next}"),
                None => println!("Great job reflecting! Rate your day with `stoiric score`."),
            }
        }
        ReflectAction::Show => {
            let record = journal.read_today().await.unwrap_or_default();
            for (i, question) in REFLECTION_QUESTIONS.iter().enumerate() {
                println!("Q: {question}");
                match record.reflection_answers.get(i) {
                    Some(answer) => println!("A: {answer}"),
                    None => {
                        println!("A: (unanswered)");
                        break;
                    }
                }
            }
        }
    }
    Ok(())
}
