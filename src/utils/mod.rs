pub mod label;
pub mod number;

pub use label::normalize;
pub use number::{parse_quote_field, parse_scaled_number};
