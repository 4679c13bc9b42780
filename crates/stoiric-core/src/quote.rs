//! Daily stoic quote with a per-day cache in the key-value store.
//!
//! One fetch per calendar day: the quote and the date it was fetched live
//! under their own store keys, and the cache is reused while the stored
//! date still matches today. Cache write failures are non-fatal.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::error::QuoteError;
use crate::storage::KvStore;

/// Store key for the cached quote payload.
pub const QUOTE_KEY: &str = "dailyQuote";

/// Store key for the date the cached quote was fetched.
pub const QUOTE_DATE_KEY: &str = "quoteDate";

/// Default quote endpoint.
pub const DEFAULT_QUOTE_URL: &str = "https://stoic-quotes.com/api/quote";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub author: String,
}

/// Shown when the endpoint is unreachable.
pub fn fallback_quote() -> Quote {
    Quote {
        text: "You have power over your mind - not outside events. Realize this, and you will find strength."
            .to_string(),
        author: "Marcus Aurelius".to_string(),
    }
}

/// Fetches and caches the quote of the day.
pub struct QuoteService {
    client: reqwest::Client,
    store: Arc<dyn KvStore>,
    clock: Arc<dyn Clock>,
    url: String,
}

impl QuoteService {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self {
            client: reqwest::Client::new(),
            store,
            clock: Arc::new(SystemClock),
            url: DEFAULT_QUOTE_URL.to_string(),
        }
    }

    /// Override the quote endpoint.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Override the clock (for tests).
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Today's quote: cached when already fetched today, fresh otherwise.
    pub async fn daily_quote(&self) -> Result<Quote, QuoteError> {
        let today = self.clock.today().format("%Y-%m-%d").to_string();

        let cached_date = self.store.get(QUOTE_DATE_KEY).await.ok().flatten();
        if cached_date.as_deref() == Some(today.as_str()) {
            if let Ok(Some(json)) = self.store.get(QUOTE_KEY).await {
                if let Ok(quote) = serde_json::from_str(&json) {
                    return Ok(quote);
                }
            }
        }

        let quote = self.fetch().await?;
        if let Ok(json) = serde_json::to_string(&quote) {
            if let Err(error) = self.store.set(QUOTE_KEY, &json).await {
                debug!(%error, "quote cache write failed");
            }
            if let Err(error) = self.store.set(QUOTE_DATE_KEY, &today).await {
                debug!(%error, "quote date cache write failed");
            }
        }
        Ok(quote)
    }

    async fn fetch(&self) -> Result<Quote, QuoteError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(QuoteError::BadStatus(status.as_u16()));
        }
        Ok(response.json::<Quote>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::storage::MemoryKvStore;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn service(server_url: &str, today: NaiveDate) -> (Arc<MemoryKvStore>, QuoteService) {
        let store = Arc::new(MemoryKvStore::new());
        let adapter: Arc<dyn KvStore> = store.clone();
        let service = QuoteService::new(adapter)
            .with_url(format!("{server_url}/api/quote"))
            .with_clock(Arc::new(FixedClock::new(today)));
        (store, service)
    }

    #[tokio::test]
    async fn fetches_once_then_serves_from_cache() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/quote")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"text":"The obstacle is the way.","author":"Marcus Aurelius"}"#)
            .expect(1)
            .create_async()
            .await;

        let (_, service) = service(&server.url(), date(2026, 8, 29));

        let first = service.daily_quote().await.unwrap();
        let second = service.daily_quote().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.author, "Marcus Aurelius");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn stale_cache_triggers_a_refetch() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/quote")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"text":"Waste no more time arguing.","author":"Marcus Aurelius"}"#)
            .expect(1)
            .create_async()
            .await;

        let (store, service) = service(&server.url(), date(2026, 8, 29));
        store
            .set(QUOTE_KEY, r#"{"text":"old","author":"old"}"#)
            .await
            .unwrap();
        store.set(QUOTE_DATE_KEY, "2026-08-28").await.unwrap();

        let quote = service.daily_quote().await.unwrap();
        assert_eq!(quote.text, "Waste no more time arguing.");
        assert_eq!(
            store.get(QUOTE_DATE_KEY).await.unwrap().as_deref(),
            Some("2026-08-29")
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn server_error_surfaces_as_bad_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/quote")
            .with_status(503)
            .create_async()
            .await;

        let (_, service) = service(&server.url(), date(2026, 8, 29));
        match service.daily_quote().await {
            Err(QuoteError::BadStatus(503)) => {}
            other => panic!("expected BadStatus(503), got {other:?}"),
        }
    }
}
