use std::{thread, time::Duration};

use reqwest::{
    StatusCode,
    blocking::{Client, Response},
};
use scraper::Html;
use tracing::{debug, info, warn};

use crate::{
    api::quote::QUOTE_PATH,
    config::Config,
    error::{Result, ScrapeError},
};

/// Query-string pairs handed to [`Fetch::fetch`].
pub type QueryParams = Vec<(&'static str, String)>;

/// The only I/O boundary of the crate: one GET, one parsed document.
///
/// Implementations own retry policy; callers never retry on their own.
pub trait Fetch {
    fn fetch(&self, path: &str, params: &[(&'static str, String)]) -> Result<Html>;
}

impl<F: Fetch + ?Sized> Fetch for &F {
    fn fetch(&self, path: &str, params: &[(&'static str, String)]) -> Result<Html> {
        (**self).fetch(path, params)
    }
}

#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: Client,
    base_url: String,
    retries: u32,
    backoff: Duration,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str());

        if let Some(proxy_url) = &config.proxy {
            let proxy = reqwest::Proxy::all(proxy_url).map_err(ScrapeError::HttpClient)?;
            builder = builder.proxy(proxy);
        }

        Ok(Self {
            client: builder.build().map_err(ScrapeError::HttpClient)?,
            base_url: config.base_url.clone(),
            retries: config.retries,
            backoff: config.backoff,
        })
    }

    pub fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    fn send(&self, url: &str, params: &[(&'static str, String)]) -> reqwest::Result<Response> {
        self.client
            .get(url)
            .query(params)
            .send()
            .and_then(Response::error_for_status)
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, path: &str, params: &[(&'static str, String)]) -> Result<Html> {
        let url = self.url(path);
        info!("GET {} {:?}", url, params);

        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.send(&url, params) {
                Ok(response) => {
                    debug!("{} answered {}", url, response.status());
                    let body = response.text().map_err(|source| {
                        ScrapeError::TransportUnhandled {
                            url: url.clone(),
                            source,
                        }
                    })?;
                    if body.trim().is_empty() {
                        return Err(ScrapeError::EmptyDocument { url });
                    }
                    return Ok(Html::parse_document(&body));
                }
                Err(err) if err.status() == Some(StatusCode::NOT_FOUND) && path == QUOTE_PATH => {
                    return Err(ScrapeError::RemoteNotFound { url });
                }
                Err(err) if is_retryable(&err) => {
                    if attempt > self.retries {
                        return Err(ScrapeError::TransportExhausted {
                            url,
                            attempts: attempt,
                            source: err,
                        });
                    }
                    let delay = backoff_delay(self.backoff, attempt);
                    warn!(
                        "Attempt {} for {} failed ({}), retrying in {:?}",
                        attempt, url, err, delay
                    );
                    thread::sleep(delay);
                }
                Err(source) => return Err(ScrapeError::TransportUnhandled { url, source }),
            }
        }
    }
}

/// Wait before retrying after failed `attempt` (1-based): `base`, doubled per
/// attempt, capped at `Duration::MAX`.
pub(crate) fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1)))
}

fn is_retryable(err: &reqwest::Error) -> bool {
    if err.is_connect() || err.is_timeout() {
        return true;
    }
    err.status().is_some_and(|status| {
        status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
    })
}

pub fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
