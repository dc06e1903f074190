use std::{num::NonZeroUsize, str::FromStr, time::Duration};

use crate::error::{Result, ScrapeError};

pub const BASE_URL: &str = "https://finviz.com";
pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; finviz-quotes)";
pub const DEFAULT_CACHE_SIZE: NonZeroUsize = match NonZeroUsize::new(32) {
    Some(size) => size,
    None => panic!("default cache size must be non-zero"),
};

/// Settings for the HTTP fetcher and the quote cache, read from the
/// environment (`.env` is honoured by the binary).
#[derive(Clone, Debug)]
pub struct Config {
    pub base_url: String,
    pub timeout: Duration,
    /// Retries after the first attempt (FINVIZ_RETRIES)
    pub retries: u32,
    /// Base backoff, doubled on every retry (FINVIZ_BACKOFF_MS)
    pub backoff: Duration,
    pub user_agent: String,
    pub proxy: Option<String>,
    /// Capacity of the quote LRU (FINVIZ_CACHE_SIZE)
    pub cache_size: NonZeroUsize,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
            retries: 2,
            backoff: Duration::from_millis(1800),
            user_agent: USER_AGENT.to_string(),
            proxy: None,
            cache_size: DEFAULT_CACHE_SIZE,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<L>(lookup: L) -> Result<Self>
    where
        L: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let cache_size: usize = parse_var(&lookup, "FINVIZ_CACHE_SIZE")?
            .unwrap_or(defaults.cache_size.get());

        Ok(Self {
            base_url: lookup("FINVIZ_BASE_URL").unwrap_or(defaults.base_url),
            timeout: parse_var(&lookup, "FINVIZ_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            retries: parse_var(&lookup, "FINVIZ_RETRIES")?.unwrap_or(defaults.retries),
            backoff: parse_var(&lookup, "FINVIZ_BACKOFF_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.backoff),
            user_agent: lookup("FINVIZ_USER_AGENT").unwrap_or(defaults.user_agent),
            proxy: lookup("FINVIZ_PROXY").filter(|proxy| !proxy.trim().is_empty()),
            cache_size: NonZeroUsize::new(cache_size).ok_or_else(|| {
                ScrapeError::Config("FINVIZ_CACHE_SIZE must be greater than zero".to_string())
            })?,
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
        })
    }
}

fn parse_var<L, T>(lookup: &L, key: &str) -> Result<Option<T>>
where
    L: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key)
        .map(|value| {
            value
                .trim()
                .parse::<T>()
                .map_err(|_| ScrapeError::Config(format!("{} must be a number, got '{}'", key, value)))
        })
        .transpose()
}
