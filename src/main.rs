mod analyzer;
mod cli;
mod config;
mod fetcher;
mod ingest;
mod model;
mod normalizer;
mod report;
mod storage;
mod utils;

use analyzer::MomentumAnalyzer;
use anyhow::{bail, Context};
use chrono::Local;
use clap::Parser;
use cli::Cli;
use config::{load_config, AppConfig};
use fetcher::IntrinioClient;
use ingest::fetch_all;
use report::{render_report, write_report};
use storage::PriceStore;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use utils::months_before;

#[tokio::main]
async fn main() {
    // Logs go to stderr, the report to stdout
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli.conf)
        .with_context(|| format!("loading config {}", cli.conf.display()))?;

    if !cli.fetch && !cli.suggest {
        info!("Nothing to do: pass --fetch and/or --suggest");
        return Ok(());
    }

    let store = PriceStore::open(&config.database.path)
        .with_context(|| format!("opening price store {}", config.database.path))?;

    if cli.fetch {
        do_fetch(&config, &store).await?;
    }

    if cli.suggest {
        do_suggest(&config, &store)?;
    }

    Ok(())
}

async fn do_fetch(config: &AppConfig, store: &PriceStore) -> anyhow::Result<()> {
    let client = IntrinioClient::new(&config.provider).context("building provider client")?;
    let tickers = config.all_tickers();
    let end = Local::now().date_naive();
    let start = months_before(end, config.fetch_months);

    info!("Fetching {} tickers from {} to {}", tickers.len(), start, end);
    let summary = fetch_all(&client, store, &tickers, start, end).await;
    info!("Stored {} prices", summary.rows_written);

    if !summary.failed.is_empty() {
        bail!("fetch failed for: {}", summary.failed.join(", "));
    }
    Ok(())
}

fn do_suggest(config: &AppConfig, store: &PriceStore) -> anyhow::Result<()> {
    let today = Local::now().date_naive();
    info!("Computing momentum as of {}", today);

    let windows = MomentumAnalyzer::new(store, today)
        .all_windows(&config.modules)
        .context("computing momentum")?;

    let lines = render_report(&windows);
    write_report(std::io::stdout().lock(), &lines).context("writing report")?;
    Ok(())
}
