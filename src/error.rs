use thiserror::Error;

/// Input rejected before any request is made.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("ticker cannot be empty")]
    EmptyTicker,
    #[error("{field}={value} is not allowed, expected one of: {allowed}")]
    InvalidChoice {
        field: &'static str,
        value: String,
        allowed: String,
    },
    #[error("required field '{0}' is missing")]
    MissingField(&'static str),
    #[error("field '{field}' does not hold a {expected} value")]
    KindMismatch {
        field: &'static str,
        expected: &'static str,
    },
}

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("request to {url} failed after {attempts} attempt(s): {source}")]
    TransportExhausted {
        url: String,
        attempts: u32,
        source: reqwest::Error,
    },

    #[error("{url} returned 404")]
    RemoteNotFound { url: String },

    #[error("empty document returned by {url}")]
    EmptyDocument { url: String },

    #[error("unhandled transport failure for {url}: {source}")]
    TransportUnhandled { url: String, source: reqwest::Error },

    #[error("ticker '{ticker}' not found")]
    NotFound { ticker: String },

    #[error("malformed document: {0}")]
    MalformedDocument(String),

    #[error("invalid numeric format: '{input}'")]
    InvalidNumericFormat { input: String },

    #[error("field '{field}' has unexpected value '{value}': {reason}")]
    InvalidField {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("invalid CSS selector '{css}': {reason}")]
    InvalidSelector { css: &'static str, reason: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl ScrapeError {
    /// Negative lookups callers are expected to handle, not crash on.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::RemoteNotFound { .. })
    }

    /// Fetch failures. `RemoteNotFound` is left out: it answers the lookup
    /// and is reported by [`Self::is_not_found`] instead.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::TransportExhausted { .. }
                | Self::EmptyDocument { .. }
                | Self::TransportUnhandled { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
