use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::ValidationError;

/// How a raw quote value is coerced into the record.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldKind {
    /// Required text; the record cannot exist without it.
    Identity,
    Text,
    Decimal,
    Flag,
    Date,
    List,
}

impl FieldKind {
    pub fn null(self) -> FieldValue {
        match self {
            FieldKind::Identity | FieldKind::Text => FieldValue::Text(None),
            FieldKind::Decimal => FieldValue::Decimal(None),
            FieldKind::Flag => FieldValue::Flag(None),
            FieldKind::Date => FieldValue::Date(None),
            FieldKind::List => FieldValue::List(None),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(Option<String>),
    Decimal(Option<Decimal>),
    Flag(Option<bool>),
    Date(Option<NaiveDate>),
    List(Option<Vec<String>>),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        match self {
            FieldValue::Text(value) => value.is_none(),
            FieldValue::Decimal(value) => value.is_none(),
            FieldValue::Flag(value) => value.is_none(),
            FieldValue::Date(value) => value.is_none(),
            FieldValue::List(value) => value.is_none(),
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Text(Some(value)) => write!(f, "{}", value),
            FieldValue::Decimal(Some(value)) => write!(f, "{}", value),
            FieldValue::Flag(Some(value)) => write!(f, "{}", value),
            FieldValue::Date(Some(value)) => write!(f, "{}", value),
            FieldValue::List(Some(values)) => write!(f, "{}", values.join(", ")),
            _ => write!(f, "-"),
        }
    }
}

/// Moves a coerced value into its typed slot on the record.
pub trait FromFieldValue: Sized {
    fn from_field_value(field: &'static str, value: FieldValue) -> Result<Self, ValidationError>;
}

pub trait ToFieldValue {
    fn to_field_value(&self) -> FieldValue;
}

impl FromFieldValue for String {
    fn from_field_value(field: &'static str, value: FieldValue) -> Result<Self, ValidationError> {
        match value {
            FieldValue::Text(Some(text)) if !text.is_empty() => Ok(text),
            FieldValue::Text(_) => Err(ValidationError::MissingField(field)),
            _ => Err(ValidationError::KindMismatch {
                field,
                expected: "text",
            }),
        }
    }
}

impl ToFieldValue for String {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Text(Some(self.clone()))
    }
}

macro_rules! optional_field {
    ($ty:ty, $variant:ident, $expected:literal) => {
        impl FromFieldValue for Option<$ty> {
            fn from_field_value(
                field: &'static str,
                value: FieldValue,
            ) -> Result<Self, ValidationError> {
                match value {
                    FieldValue::$variant(inner) => Ok(inner),
                    _ => Err(ValidationError::KindMismatch {
                        field,
                        expected: $expected,
                    }),
                }
            }
        }

        impl ToFieldValue for Option<$ty> {
            fn to_field_value(&self) -> FieldValue {
                FieldValue::$variant(self.clone())
            }
        }
    };
}

optional_field!(String, Text, "text");
optional_field!(Decimal, Decimal, "decimal");
optional_field!(bool, Flag, "flag");
optional_field!(NaiveDate, Date, "date");
optional_field!(Vec<String>, List, "list");
