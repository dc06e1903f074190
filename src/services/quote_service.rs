use std::num::NonZeroUsize;

use lru::LruCache;
use tracing::debug;

use crate::{
    api::{
        Fetch, Screener,
        quote::{get_quote, validate_ticker},
    },
    error::Result,
    models::{Overview, Quote},
};

/// Quote and screener lookups over one fetcher, with a bounded LRU of quotes
/// keyed by upper-cased ticker.
pub struct QuoteService<F: Fetch> {
    fetcher: F,
    cache: LruCache<String, Quote>,
}

impl<F: Fetch> QuoteService<F> {
    pub fn new(fetcher: F, capacity: NonZeroUsize) -> Self {
        Self {
            fetcher,
            cache: LruCache::new(capacity),
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn get_quote(&mut self, ticker: &str) -> Result<Quote> {
        let key = validate_ticker(ticker)?.to_uppercase();

        if let Some(quote) = self.cache.get(&key) {
            debug!("Quote cache hit for {}", key);
            return Ok(quote.clone());
        }

        debug!("Quote cache miss for {}", key);
        let quote = get_quote(&self.fetcher, &key)?;
        self.cache.put(key, quote.clone());
        Ok(quote)
    }

    pub fn screen<'a>(&self, screener: &'a mut Screener) -> Result<&'a [Overview]> {
        screener.fetch_all(&self.fetcher)
    }

    /// Drops the cached quote for `ticker`, returning it if present.
    pub fn invalidate(&mut self, ticker: &str) -> Option<Quote> {
        self.cache.pop(&ticker.trim().to_uppercase())
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    pub fn capacity(&self) -> NonZeroUsize {
        self.cache.cap()
    }
}
