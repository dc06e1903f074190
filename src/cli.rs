use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::{
    api::{HttpFetcher, Screener, ScreenerQuery},
    config::Config,
    models::{Overview, Quote},
    services::{QuoteService, write_overviews_csv},
};

#[derive(Debug, Parser)]
#[command(name = "finviz-quotes", version, about = "Quotes and screener listings from finviz.com")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the full quote of one ticker
    Quote {
        ticker: String,
        /// Print the quote as JSON
        #[arg(long)]
        json: bool,
    },
    /// List every company matching the screener filters
    Screener {
        /// AMEX, NASDAQ or NYSE (or the exch_* code)
        #[arg(long)]
        exchange: Option<String>,
        /// SP500, NASDAQ100, DJIA or RUSSELL2000 (or the idx_* code)
        #[arg(long)]
        index: Option<String>,
        /// e.g. TOP_GAINERS, NEW_HIGH, UNUSUAL_VOLUME
        #[arg(long)]
        signal: Option<String>,
        /// e.g. TICKER_ASC, MARKETCAP_DESC, or the raw order code
        #[arg(long, allow_hyphen_values = true)]
        order: Option<String>,
        /// Write the rows to a CSV file instead of stdout
        #[arg(long)]
        csv: Option<String>,
        /// Print the rows as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(cli: Cli, config: &Config) -> Result<()> {
    let fetcher = HttpFetcher::new(config).context("Failed to set up HTTP client")?;
    let mut service = QuoteService::new(fetcher, config.cache_size);

    match cli.command {
        Command::Quote { ticker, json } => {
            let quote = service
                .get_quote(&ticker)
                .with_context(|| format!("Failed to get quote for {}", ticker))?;
            print_quote(&quote, json)
        }
        Command::Screener {
            exchange,
            index,
            signal,
            order,
            csv,
            json,
        } => {
            let query = ScreenerQuery::parse(
                exchange.as_deref(),
                index.as_deref(),
                signal.as_deref(),
                order.as_deref(),
            )?;
            let mut screener = Screener::new(query);
            let rows = service
                .screen(&mut screener)
                .context("Failed to run screener")?
                .to_vec();
            eprintln!("{}", screener);

            match csv {
                Some(path) => write_overviews_csv(&path, &rows)
                    .with_context(|| format!("Failed to write CSV to {}", path)),
                None => print_overviews(&rows, json),
            }
        }
    }
}

fn print_quote(quote: &Quote, json: bool) -> Result<()> {
    let mapping = quote.to_display_mapping();
    if json {
        println!("{}", serde_json::to_string_pretty(&mapping)?);
        return Ok(());
    }

    let width = mapping.keys().map(String::len).max().unwrap_or(0);
    for (name, value) in &mapping {
        println!("{:<width$}  {}", name, value, width = width);
    }
    Ok(())
}

fn print_overviews(rows: &[Overview], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(rows)?);
        return Ok(());
    }

    let show = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
    for row in rows {
        println!(
            "{:<6} {:<40} {:>10} {:>8} {:>10} {:>8} {:>12}",
            row.ticker(),
            show(row.company()),
            show(row.market_cap()),
            show(row.p_e()),
            show(row.price()),
            show(row.change()),
            show(row.volume()),
        );
    }
    Ok(())
}
