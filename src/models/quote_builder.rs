use std::collections::BTreeMap;

use chrono::{Datelike, Local, NaiveDate};
use tracing::debug;

use super::{
    field::{FieldKind, FieldValue},
    quote::{QUOTE_FIELDS, Quote, RawQuote},
};
use crate::{
    error::{Result, ScrapeError, ValidationError},
    utils::{parse_quote_field, parse_scaled_number},
};

type Values = BTreeMap<&'static str, FieldValue>;
type Derivation = fn(&str, NaiveDate, &mut Values) -> Result<()>;

/// Composite fields that are split or reinterpreted before the generic pass.
/// Keyed by the canonical label they consume.
const DERIVATIONS: &[(&str, Derivation)] = &[
    ("index", derive_index),
    ("optionable", derive_optionable),
    ("shortable", derive_shortable),
    ("earnings", derive_earnings),
    ("volatility", derive_volatility),
];

/// Builds a [`Quote`] out of the flat label → value mapping of a quote page.
///
/// Unknown labels are ignored; missing identity fields fail the build.
#[derive(Clone, Debug)]
pub struct QuoteBuilder {
    raw: RawQuote,
    today: NaiveDate,
}

impl QuoteBuilder {
    pub fn new(raw: RawQuote) -> Self {
        Self {
            raw,
            today: Local::now().date_naive(),
        }
    }

    /// Reference date for the earnings roll-over.
    pub fn today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn build(self) -> Result<Quote> {
        let mut values = Values::new();

        for (label, derive) in DERIVATIONS {
            if let Some(Some(raw)) = self.raw.get(*label) {
                derive(raw.as_str(), self.today, &mut values)?;
            }
        }

        for spec in QUOTE_FIELDS {
            if values.contains_key(spec.name) {
                continue;
            }
            let value = match spec.kind {
                FieldKind::Identity | FieldKind::Text | FieldKind::Decimal => {
                    let raw = self.raw.get(spec.name).and_then(|value| value.as_deref());
                    parse_quote_field(spec.name, raw, spec.kind)?
                }
                // Only reachable through a derivation.
                FieldKind::Flag | FieldKind::Date | FieldKind::List => spec.kind.null(),
            };
            values.insert(spec.name, value);
        }

        ensure_complete(&values)?;
        let quote = Quote::from_values(&mut values)?;
        debug!("Built quote for {}", quote.ticker());
        Ok(quote)
    }
}

fn ensure_complete(values: &Values) -> Result<()> {
    for spec in QUOTE_FIELDS {
        match values.get(spec.name) {
            None => return Err(ValidationError::MissingField(spec.name).into()),
            Some(value) if spec.kind == FieldKind::Identity && value.is_null() => {
                return Err(ValidationError::MissingField(spec.name).into());
            }
            Some(_) => {}
        }
    }
    Ok(())
}

fn derive_index(raw: &str, _today: NaiveDate, values: &mut Values) -> Result<()> {
    values.insert("index", parse_quote_field("index", Some(raw), FieldKind::List)?);
    Ok(())
}

fn derive_optionable(raw: &str, _today: NaiveDate, values: &mut Values) -> Result<()> {
    values.insert(
        "is_optionable",
        parse_quote_field("is_optionable", Some(raw), FieldKind::Flag)?,
    );
    Ok(())
}

fn derive_shortable(raw: &str, _today: NaiveDate, values: &mut Values) -> Result<()> {
    values.insert(
        "is_shortable",
        parse_quote_field("is_shortable", Some(raw), FieldKind::Flag)?,
    );
    Ok(())
}

/// `"Nov 02 AMC"` → next Nov 02 on or after `today`, session `AMC`.
fn derive_earnings(raw: &str, today: NaiveDate, values: &mut Values) -> Result<()> {
    let invalid = |reason: &str| ScrapeError::InvalidField {
        field: "earnings",
        value: raw.to_string(),
        reason: reason.to_string(),
    };

    let tokens: Vec<&str> = raw.split_whitespace().collect();
    if tokens.len() < 2 {
        return Err(invalid("expected '<Mon> <Day> [session]'"));
    }

    let text = format!("{} {} {}", today.year(), tokens[0], tokens[1]);
    let mut date = NaiveDate::parse_from_str(&text, "%Y %b %d")
        .map_err(|e| invalid(&e.to_string()))?;
    if date < today {
        date = NaiveDate::from_ymd_opt(today.year() + 1, date.month(), date.day())
            .ok_or_else(|| invalid("date does not exist next year"))?;
    }

    let session = if tokens.len() > 2 {
        tokens.last().map(|token| token.to_string())
    } else {
        None
    };

    values.insert("earnings_at", FieldValue::Date(Some(date)));
    values.insert("earnings_market", FieldValue::Text(session));
    Ok(())
}

/// `"1.52% 1.71%"` → week and month volatility.
fn derive_volatility(raw: &str, _today: NaiveDate, values: &mut Values) -> Result<()> {
    let parts: Vec<&str> = raw.split_whitespace().collect();
    let [week, month] = parts.as_slice() else {
        return Err(ScrapeError::InvalidField {
            field: "volatility",
            value: raw.to_string(),
            reason: "expected '<week>% <month>%'".to_string(),
        });
    };

    values.insert(
        "volatility_w",
        FieldValue::Decimal(parse_scaled_number(Some(*week))?),
    );
    values.insert(
        "volatility_m",
        FieldValue::Decimal(parse_scaled_number(Some(*month))?),
    );
    Ok(())
}
