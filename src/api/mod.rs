pub mod document;
pub mod fetch;
pub mod quote;
pub mod screener;

pub use fetch::{Fetch, HttpFetcher};
pub use quote::get_quote;
pub use screener::{Screener, ScreenerQuery};
