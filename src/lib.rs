pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

#[cfg(test)]
mod test;

pub use error::{Result, ScrapeError, ValidationError};
