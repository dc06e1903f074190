use derive_getters::Getters;
use derive_new::new;
use serde::Serialize;

/// Field order of one row in the overview table, after the row-number cell.
pub const OVERVIEW_FIELDS: [&str; 10] = [
    "ticker",
    "company",
    "sector",
    "industry",
    "country",
    "market_cap",
    "p_e",
    "price",
    "change",
    "volume",
];

/// One screener row. Values stay display-formatted (`"2.95T"`, `"0.45%"`);
/// coercion is left to the consumer.
#[derive(Clone, Debug, Eq, Getters, PartialEq, Serialize, new)]
pub struct Overview {
    ticker: String,
    company: Option<String>,
    sector: Option<String>,
    industry: Option<String>,
    country: Option<String>,
    market_cap: Option<String>,
    p_e: Option<String>,
    price: Option<String>,
    change: Option<String>,
    volume: Option<String>,
}
