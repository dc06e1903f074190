use anyhow::Result;
use clap::Parser;
use finviz_quotes::{
    cli::{self, Cli},
    config::Config,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_level))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    cli::run(cli, &config)
}
