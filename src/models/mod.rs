pub mod choices;
pub mod field;
pub mod overview;
pub mod quote;
pub mod quote_builder;

pub use choices::{Exchange, Index, Order, Signal, Table};
pub use field::{FieldKind, FieldSpec, FieldValue};
pub use overview::{OVERVIEW_FIELDS, Overview};
pub use quote::{QUOTE_FIELDS, Quote, RawQuote};
pub use quote_builder::QuoteBuilder;
