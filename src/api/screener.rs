use std::{fmt, sync::LazyLock};

use derive_getters::Getters;
use regex::Regex;
use scraper::Html;
use tracing::{debug, info};

use super::{
    document::{cells_of, selector, text_of},
    fetch::{Fetch, QueryParams},
};
use crate::{
    error::{Result, ScrapeError, ValidationError},
    models::{
        Exchange, Index, OVERVIEW_FIELDS, Order, Overview, Signal, Table, choices::parse_choice,
    },
    utils::number::PLACEHOLDER,
};

pub const SCREENER_PATH: &str = "/screener.ashx";
pub const PAGE_SIZE: u64 = 20;

const TOTAL: &str = "#screener-total";
const RESULTS_ROWS: &str = "#screener-table tr";
/// Header and control rows preceding the data rows of the results table.
const SKIPPED_ROWS: usize = 3;

static TOTAL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s(\d+)").expect("total pattern is a valid regex"));

/// Filters and ordering of one screener listing.
#[derive(Clone, Debug, Default, Eq, Getters, PartialEq)]
pub struct ScreenerQuery {
    exchange: Option<Exchange>,
    index: Option<Index>,
    signal: Option<Signal>,
    table: Table,
    order: Order,
}

impl ScreenerQuery {
    pub fn new(
        exchange: Option<Exchange>,
        index: Option<Index>,
        signal: Option<Signal>,
        order: Order,
    ) -> Self {
        Self {
            exchange,
            index,
            signal,
            table: Table::Overview,
            order,
        }
    }

    /// Validates user-supplied filter values against their enumerated domains.
    pub fn parse(
        exchange: Option<&str>,
        index: Option<&str>,
        signal: Option<&str>,
        order: Option<&str>,
    ) -> std::result::Result<Self, ValidationError> {
        Ok(Self::new(
            exchange.map(|v| parse_choice("exchange", v)).transpose()?,
            index.map(|v| parse_choice("index", v)).transpose()?,
            signal.map(|v| parse_choice("signal", v)).transpose()?,
            order
                .map(|v| parse_choice("order_by", v))
                .transpose()?
                .unwrap_or_default(),
        ))
    }

    /// Query string for the 1-based `page`.
    pub fn params(&self, page: u64) -> QueryParams {
        let mut params = vec![
            ("v", self.table.to_string()),
            ("o", self.order.to_string()),
            ("r", ((page - 1) * PAGE_SIZE + 1).to_string()),
        ];

        let filters: Vec<String> = [
            self.exchange.map(|exchange| exchange.to_string()),
            self.index.map(|index| index.to_string()),
        ]
        .into_iter()
        .flatten()
        .collect();
        if !filters.is_empty() {
            params.push(("f", filters.join(",")));
        }

        if let Some(signal) = self.signal {
            params.push(("s", signal.to_string()));
        }

        params
    }
}

/// A screener listing that fetches every result page on first use and keeps
/// the rows for later calls.
#[derive(Clone, Debug)]
pub struct Screener {
    query: ScreenerQuery,
    total: u64,
    pages: u64,
    items: Option<Vec<Overview>>,
}

impl Screener {
    pub fn new(query: ScreenerQuery) -> Self {
        Self {
            query,
            total: 0,
            pages: 0,
            items: None,
        }
    }

    pub fn query(&self) -> &ScreenerQuery {
        &self.query
    }

    /// Result count announced by the first page; 0 until fetched.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn pages(&self) -> u64 {
        self.pages
    }

    /// Every row of the listing. Only the first call touches the network.
    pub fn fetch_all<F: Fetch + ?Sized>(&mut self, fetcher: &F) -> Result<&[Overview]> {
        if self.items.is_none() {
            let items = self.collect_pages(fetcher)?;
            self.items = Some(items);
        }
        Ok(self.items.as_deref().unwrap_or_default())
    }

    fn collect_pages<F: Fetch + ?Sized>(&mut self, fetcher: &F) -> Result<Vec<Overview>> {
        let mut items = Vec::new();
        let mut page = 1;

        loop {
            let document = fetcher.fetch(SCREENER_PATH, &self.query.params(page))?;

            if page == 1 {
                self.total = read_total(&document)?;
                self.pages = total_pages(self.total, PAGE_SIZE);
                info!("Screener {}: {} results on {} pages", self, self.total, self.pages);
            }
            if self.total == 0 {
                break;
            }

            let rows = read_rows(&document)?;
            debug!("Page {}/{} yielded {} rows", page, self.pages, rows.len());
            items.extend(rows);

            if page >= self.pages {
                break;
            }
            page += 1;
        }

        Ok(items)
    }

    pub fn len(&self) -> usize {
        self.items.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<&Overview> {
        self.items.as_ref().and_then(|items| items.get(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Overview> {
        self.items.iter().flatten()
    }
}

impl fmt::Display for Screener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |value: Option<String>| value.unwrap_or_else(|| "-".to_string());
        write!(
            f,
            "<Screener exchange={}, index={}, signal={}, table={}, order_by={}, total={}, pages={}>",
            show(self.query.exchange.map(|v| v.to_string())),
            show(self.query.index.map(|v| v.to_string())),
            show(self.query.signal.map(|v| v.to_string())),
            self.query.table,
            self.query.order,
            self.total,
            self.pages,
        )
    }
}

/// Number of pages needed for `total` results, rounding any remainder up.
pub fn total_pages(total: u64, page_size: u64) -> u64 {
    if page_size == 0 {
        return 0;
    }
    let pages = total / page_size;
    if total % page_size > 0 { pages + 1 } else { pages }
}

/// Reads the result count from the `Total: 8123 #1` marker. A missing
/// marker counts as no results.
pub fn read_total(document: &Html) -> Result<u64> {
    let Some(marker) = document.select(&selector(TOTAL)?).next() else {
        return Ok(0);
    };
    let text = text_of(marker);

    let total = TOTAL_PATTERN
        .captures(&text)
        .and_then(|captures| captures.get(1))
        .map(|count| count.as_str().parse::<u64>())
        .transpose()
        .map_err(|e| ScrapeError::MalformedDocument(format!("screener total '{}': {}", text, e)))?;

    Ok(total.unwrap_or(0))
}

/// Maps every data row of the results table onto an [`Overview`].
pub fn read_rows(document: &Html) -> Result<Vec<Overview>> {
    let row_selector = selector(RESULTS_ROWS)?;
    let mut rows = document.select(&row_selector).peekable();
    if rows.peek().is_none() {
        return Err(ScrapeError::MalformedDocument(
            "screener results table is missing".into(),
        ));
    }

    rows.skip(SKIPPED_ROWS)
        .map(|row| {
            let cells: Vec<Option<String>> = cells_of(row)
                .into_iter()
                .skip(1)
                .map(text_of)
                .map(|value| (value != PLACEHOLDER).then_some(value))
                .collect();
            if cells.len() < OVERVIEW_FIELDS.len() {
                return Err(ScrapeError::MalformedDocument(format!(
                    "screener row has {} data cells, expected {}",
                    cells.len(),
                    OVERVIEW_FIELDS.len()
                )));
            }

            let mut cells = cells.into_iter();
            let mut next = || cells.next().flatten();
            let ticker = next().ok_or_else(|| {
                ScrapeError::MalformedDocument("screener row without ticker".into())
            })?;
            Ok(Overview::new(
                ticker,
                next(),
                next(),
                next(),
                next(),
                next(),
                next(),
                next(),
                next(),
                next(),
            ))
        })
        .collect()
}
