use scraper::Html;
use tracing::debug;

use super::{
    document::{cells_of, selector, text_of},
    fetch::Fetch,
};
use crate::{
    error::{Result, ScrapeError, ValidationError},
    models::{Quote, QuoteBuilder, RawQuote},
    utils::{normalize, number::PLACEHOLDER},
};

pub const QUOTE_PATH: &str = "/quote.ashx";

const CONTAINER: &str = r#"div[class="fv-container py-2.5"]"#;
const TICKER: &str = "h1.quote-header_ticker-wrapper_ticker";
const COMPANY: &str = "h2.quote-header_ticker-wrapper_company";
const WEBSITE: &str = "a.tab-link.block.truncate";
const FACETS: &str = r#"a[class="tab-link"]"#;
const DETAIL_ROWS: &str = "tr.table-dark-row";

/// Sector, industry, country and exchange, in the order the links appear.
const FACET_KEYS: [&str; 4] = ["sector", "industry", "country", "exchange"];

const REPEATED_LABEL: &str = "EPS next Y";
const REPEATED_LABEL_RENAME: &str = "EPS growth next Y";

pub fn validate_ticker(ticker: &str) -> Result<&str> {
    let ticker = ticker.trim();
    if ticker.is_empty() {
        return Err(ValidationError::EmptyTicker.into());
    }
    Ok(ticker)
}

/// Fetches and builds the quote for `ticker`.
pub fn get_quote<F: Fetch + ?Sized>(fetcher: &F, ticker: &str) -> Result<Quote> {
    let ticker = validate_ticker(ticker)?;
    let document = fetcher.fetch(QUOTE_PATH, &[("t", ticker.to_string())])?;
    let raw = extract_quote(&document, ticker)?;
    QuoteBuilder::new(raw).build()
}

/// Reads the header block and the detail table of a quote page into a flat
/// canonical-label → value mapping.
pub fn extract_quote(document: &Html, ticker: &str) -> Result<RawQuote> {
    let mut raw = RawQuote::new();

    let container = document
        .select(&selector(CONTAINER)?)
        .next()
        .ok_or_else(|| ScrapeError::NotFound {
            ticker: ticker.to_string(),
        })?;

    let displayed_ticker = container
        .select(&selector(TICKER)?)
        .next()
        .ok_or_else(|| ScrapeError::MalformedDocument("ticker header is missing".into()))?;
    raw.insert("ticker".into(), Some(text_of(displayed_ticker)));

    let company = container
        .select(&selector(COMPANY)?)
        .next()
        .ok_or_else(|| ScrapeError::MalformedDocument("company header is missing".into()))?;
    raw.insert("company".into(), Some(text_of(company)));

    let website = company
        .select(&selector(WEBSITE)?)
        .next()
        .and_then(|link| link.value().attr("href"))
        .filter(|href| href.starts_with("http://") || href.starts_with("https://"));
    if let Some(website) = website {
        raw.insert("website".into(), Some(website.to_string()));
    }

    let facets: Vec<String> = container.select(&selector(FACETS)?).map(text_of).collect();
    if facets.len() < FACET_KEYS.len() {
        return Err(ScrapeError::MalformedDocument(format!(
            "expected {} classification links, found {}",
            FACET_KEYS.len(),
            facets.len()
        )));
    }
    for (key, value) in FACET_KEYS.iter().zip(facets) {
        raw.insert(key.to_string(), Some(value));
    }

    for row in document.select(&selector(DETAIL_ROWS)?) {
        let cells = cells_of(row);
        if cells.is_empty() || cells.len() % 2 != 0 {
            return Err(ScrapeError::MalformedDocument(format!(
                "detail row has {} cells, expected label/value pairs",
                cells.len()
            )));
        }

        for pair in cells.chunks_exact(2) {
            let mut name = text_of(pair[0]);
            let Some(mut label) = normalize(&name) else {
                continue;
            };
            if raw.contains_key(&label) && name == REPEATED_LABEL {
                name = REPEATED_LABEL_RENAME.to_string();
                label = normalize(&name).unwrap_or(label);
            }

            let value = text_of(pair[1]);
            let value = (value != PLACEHOLDER).then_some(value);
            raw.insert(label, value);
        }
    }

    debug!("Extracted {} fields for {}", raw.len(), ticker);
    Ok(raw)
}
