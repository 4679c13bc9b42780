use stoiric_core::quote::fallback_quote;
use stoiric_core::{Config, QuoteService};

use crate::common;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    if !config.quote.enabled {
        println!("Quote of the day is disabled in config.");
        return Ok(());
    }

    let service = QuoteService::new(common::open_store()?).with_url(config.quote.url);
    let quote = match service.daily_quote().await {
        Ok(quote) => quote,
        Err(error) => {
            tracing::debug!(%error, "quote fetch failed, using fallback");
            fallback_quote()
        }
    };

    println!("\"{}\"", quote.text);
    println!("  -- {}", quote.author);
    Ok(())
}
