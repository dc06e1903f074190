use std::collections::BTreeMap;

use chrono::NaiveDate;
use derive_getters::Getters;
use rust_decimal::Decimal;
use serde::Serialize;

use super::field::{FieldKind, FieldSpec, FieldValue, FromFieldValue, ToFieldValue};
use crate::error::ValidationError;

/// Canonical label → raw display value, as read off a quote page.
/// `None` stands for the site's `-` placeholder.
pub type RawQuote = BTreeMap<String, Option<String>>;

macro_rules! field_type {
    (Identity) => { String };
    (Text) => { Option<String> };
    (Decimal) => { Option<Decimal> };
    (Flag) => { Option<bool> };
    (Date) => { Option<NaiveDate> };
    (List) => { Option<Vec<String>> };
}

macro_rules! quote_record {
    ($( $(#[$meta:meta])* $field:ident : $kind:ident ),* $(,)?) => {
        /// Snapshot of one company's quote page.
        #[derive(Clone, Debug, Getters, PartialEq, Serialize)]
        pub struct Quote {
            $( $(#[$meta])* $field: field_type!($kind), )*
        }

        /// Every field of [`Quote`] with its coercion kind, in page order.
        pub const QUOTE_FIELDS: &[FieldSpec] = &[
            $( FieldSpec { name: stringify!($field), kind: FieldKind::$kind }, )*
        ];

        impl Quote {
            pub(crate) fn from_values(
                values: &mut BTreeMap<&'static str, FieldValue>,
            ) -> Result<Self, ValidationError> {
                Ok(Self {
                    $(
                        $field: FromFieldValue::from_field_value(
                            stringify!($field),
                            values
                                .remove(stringify!($field))
                                .ok_or(ValidationError::MissingField(stringify!($field)))?,
                        )?,
                    )*
                })
            }

            /// Field name and value pairs in declaration order.
            pub fn values(&self) -> Vec<(&'static str, FieldValue)> {
                vec![ $( (stringify!($field), self.$field.to_field_value()), )* ]
            }
        }
    };
}

quote_record! {
    ticker: Identity,
    company: Identity,
    website: Text,
    sector: Identity,
    industry: Identity,
    country: Identity,
    exchange: Identity,
    /// Major index membership, e.g. `["DJIA", "S&P 500"]`.
    index: List,
    /// Price-to-Earnings (ttm)
    p_e: Decimal,
    eps_ttm: Decimal,
    insider_own: Decimal,
    shs_outstand: Decimal,
    perf_week: Decimal,
    market_cap: Decimal,
    forward_p_e: Decimal,
    /// EPS estimate for next year
    eps_next_y: Decimal,
    insider_trans: Decimal,
    shs_float: Decimal,
    perf_month: Decimal,
    income: Decimal,
    peg: Decimal,
    eps_next_q: Decimal,
    inst_own: Decimal,
    /// Short interest share / ratio, kept as displayed.
    short_float_ratio: Text,
    perf_quarter: Decimal,
    sales: Decimal,
    p_s: Decimal,
    eps_this_y: Decimal,
    inst_trans: Decimal,
    short_interest: Decimal,
    perf_half_y: Decimal,
    book_sh: Decimal,
    p_b: Decimal,
    /// EPS growth next year; the page shows it under a second "EPS next Y".
    eps_growth_next_y: Decimal,
    roa: Decimal,
    target_price: Decimal,
    perf_year: Decimal,
    cash_sh: Decimal,
    p_c: Decimal,
    eps_next_5y: Decimal,
    roe: Decimal,
    /// 52-week trading range, kept as displayed.
    ttm_range: Text,
    perf_ytd: Decimal,
    dividend: Decimal,
    p_fcf: Decimal,
    eps_past_5y: Decimal,
    roi: Decimal,
    /// Distance from the 52-week high.
    ttm_high: Decimal,
    beta: Decimal,
    dividend_percent: Decimal,
    quick_ratio: Decimal,
    sales_past_5y: Decimal,
    gross_margin: Decimal,
    /// Distance from the 52-week low.
    ttm_low: Decimal,
    atr: Decimal,
    employees: Decimal,
    current_ratio: Decimal,
    sales_q_q: Decimal,
    oper_margin: Decimal,
    rsi_14: Decimal,
    volatility_w: Decimal,
    volatility_m: Decimal,
    is_optionable: Flag,
    debt_eq: Decimal,
    eps_q_q: Decimal,
    profit_margin: Decimal,
    rel_volume: Decimal,
    prev_close: Decimal,
    is_shortable: Flag,
    lt_debt_eq: Decimal,
    /// Next earnings announcement.
    earnings_at: Date,
    /// BMO = before market open, AMC = after market close.
    earnings_market: Text,
    payout: Decimal,
    avg_volume: Decimal,
    price: Decimal,
    recom: Decimal,
    sma20: Decimal,
    sma50: Decimal,
    sma200: Decimal,
    volume: Decimal,
    change: Decimal,
}

impl Quote {
    /// Flat name → value view of the record. Every `ttm_*` field is also
    /// exposed under its `52w_*` display name.
    pub fn to_display_mapping(&self) -> BTreeMap<String, FieldValue> {
        let mut mapping = BTreeMap::new();
        for (name, value) in self.values() {
            if let Some(rest) = name.strip_prefix("ttm_") {
                mapping.insert(format!("52w_{}", rest), value.clone());
            }
            mapping.insert(name.to_string(), value);
        }
        mapping
    }
}

pub fn field_spec(name: &str) -> Option<&'static FieldSpec> {
    QUOTE_FIELDS.iter().find(|spec| spec.name == name)
}
