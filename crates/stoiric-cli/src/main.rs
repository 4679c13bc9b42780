use clap::{Parser, Subcommand};

mod commands;
mod common;

#[derive(Parser)]
#[command(name = "stoiric", version, about = "Stoiric daily journal CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Today's goals
    Day {
        #[command(subcommand)]
        action: commands::day::DayAction,
    },
    /// Evening reflection
    Reflect {
        #[command(subcommand)]
        action: commands::reflect::ReflectAction,
    },
    /// Day ratings and final score
    Score {
        #[command(subcommand)]
        action: commands::score::ScoreAction,
    },
    /// Journal history
    Log {
        #[command(subcommand)]
        action: commands::log::LogAction,
    },
    /// Current completion streak
    Streak,
    /// Stoic quote of the day
    Quote,
    /// Delete every stored record
    Clear {
        /// Skip the confirmation check
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Day { action } => commands::day::run(action).await,
        Commands::Reflect { action } => commands::reflect::run(action).await,
        Commands::Score { action } => commands::score::run(action).await,
        Commands::Log { action } => commands::log::run(action).await,
        Commands::Streak => commands::streak::run().await,
        Commands::Quote => commands::quote::run().await,
        Commands::Clear { yes } => commands::clear::run(yes).await,
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
