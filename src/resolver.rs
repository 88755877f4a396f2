//! Daily quote resolution
//!
//! `QuoteResolver` returns the quote for a day, reusing the cached record when
//! it was written for the same day, asking the remote source otherwise, and
//! falling back to the built-in table when that fails. It never returns an
//! error: every failure degrades to the fallback quote.

use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::Mutex;

use crate::cache::QuoteStore;
use crate::clock::Clock;
use crate::data::{fallback_quote, CacheRecord, DayKey, Quote, QuoteSource, RemoteQuoteSource};

/// Resolves the quote of the day
pub struct QuoteResolver {
    store: QuoteStore,
    source: Arc<dyn RemoteQuoteSource>,
    clock: Arc<dyn Clock>,
    /// Serializes read-fetch-write so concurrent callers never lose an update
    lock: Mutex<()>,
}

impl QuoteResolver {
    pub fn new(
        store: QuoteStore,
        source: Arc<dyn RemoteQuoteSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            source,
            clock,
            lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &QuoteStore {
        &self.store
    }

    /// Resolves the quote for today according to the injected clock
    pub async fn resolve(&self) -> Quote {
        let today = self.clock.today();
        self.resolve_for(today).await
    }

    /// Resolves the quote for `day`
    ///
    /// # Behavior
    /// - Returns the cached quote if the record was written for `day`
    /// - Otherwise fetches from the remote source and caches it as `remote`
    /// - On fetch failure, caches and returns the fallback quote for `day`
    /// - A failed write is logged; the quote is still returned
    pub async fn resolve_for(&self, day: DayKey) -> Quote {
        let _guard = self.lock.lock().await;

        if let Some(quote) = self.cached_quote(day) {
            debug!("cache hit for {}", day);
            return quote;
        }

        let (quote, source) = match self.source.fetch_today().await {
            Ok(quote) => {
                info!("fetched remote quote for {}", day);
                (quote, QuoteSource::Remote)
            }
            Err(e) => {
                warn!("remote quote unavailable, using fallback: {}", e);
                (fallback_quote(day), QuoteSource::Fallback)
            }
        };

        let record = CacheRecord::new(day, quote, source, self.clock.now());
        if let Err(e) = self.store.write(&record) {
            warn!(
                "failed to persist quote to {}: {}",
                self.store.path().display(),
                e
            );
        }

        record.quote
    }

    /// Reads the store, treating missing or unreadable data as no cache
    fn cached_quote(&self, day: DayKey) -> Option<Quote> {
        match self.store.read() {
            Ok(record) => record.and_then(|r| r.quote_for(day).cloned()),
            Err(e) => {
                warn!(
                    "ignoring unreadable quote data at {}: {}",
                    self.store.path().display(),
                    e
                );
                None
            }
        }
    }
}
