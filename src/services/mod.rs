pub mod export;
pub mod quote_service;

pub use export::write_overviews_csv;
pub use quote_service::QuoteService;
