use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::{
    error::{Result, ScrapeError},
    models::field::{FieldKind, FieldValue},
};

pub const PLACEHOLDER: &str = "-";

const MILLION: u64 = 1_000_000;
const BILLION: u64 = 1_000_000_000;

/// Parses display numbers like `"59.24M"`, `"1.2B"`, `"5.23%"` or `"1,234.5"`.
///
/// `-` is the site's placeholder for a missing value and yields `None`.
/// Percentages keep the bare number (`"5%"` is `5`, not `0.05`).
pub fn parse_scaled_number(text: Option<&str>) -> Result<Option<Decimal>> {
    let Some(original) = text else {
        return Ok(None);
    };
    let trimmed = original.trim();
    if trimmed == PLACEHOLDER {
        return Ok(None);
    }

    let invalid = || ScrapeError::InvalidNumericFormat {
        input: original.to_string(),
    };

    let cleaned = trimmed.replace(',', "");

    if let Some((prefix, scale)) = split_scale(&cleaned) {
        let value = parse_exact(prefix).ok_or_else(invalid)?;
        let scaled = value.checked_mul(scale).ok_or_else(invalid)?;
        let integral = scaled.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        return Decimal::from_str(&integral.to_string())
            .map(Some)
            .map_err(|_| invalid());
    }

    if let Some(prefix) = cleaned.strip_suffix('%') {
        return parse_exact(prefix).map(Some).ok_or_else(invalid);
    }

    parse_exact(&cleaned).map(Some).ok_or_else(invalid)
}

fn split_scale(text: &str) -> Option<(&str, Decimal)> {
    if let Some(prefix) = text.strip_suffix('M') {
        Some((prefix, Decimal::from(MILLION)))
    } else {
        text.strip_suffix('B')
            .map(|prefix| (prefix, Decimal::from(BILLION)))
    }
}

fn parse_exact(text: &str) -> Option<Decimal> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(text).ok()
}

/// Coerces one raw quote value into the representation its declared kind
/// calls for.
pub fn parse_quote_field(
    field_name: &'static str,
    raw: Option<&str>,
    kind: FieldKind,
) -> Result<FieldValue> {
    let raw = raw.map(str::trim).filter(|value| *value != PLACEHOLDER);

    match kind {
        FieldKind::Identity | FieldKind::Text => Ok(FieldValue::Text(raw.map(String::from))),
        FieldKind::Decimal => parse_scaled_number(raw).map(FieldValue::Decimal),
        FieldKind::Flag => Ok(FieldValue::Flag(raw.map(|value| value == "Yes"))),
        FieldKind::List => Ok(FieldValue::List(raw.map(|value| {
            value
                .split(',')
                .map(|item| item.trim().to_string())
                .collect()
        }))),
        FieldKind::Date => raw
            .map(|value| {
                NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| ScrapeError::InvalidField {
                    field: field_name,
                    value: value.to_string(),
                    reason: e.to_string(),
                })
            })
            .transpose()
            .map(FieldValue::Date),
    }
}
