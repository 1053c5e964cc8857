use crate::fetcher::PriceFetcher;
use crate::storage::PriceStore;
use chrono::NaiveDate;
use futures::future::join_all;
use tracing::{info, warn};

/// Outcome of one ingestion run.
#[derive(Debug, Default)]
pub struct FetchSummary {
    pub rows_written: usize,
    pub failed: Vec<String>,
}

/// Fetches every ticker concurrently and upserts each ticker's rows.
///
/// A failing ticker is logged and recorded in the summary; the others still run.
pub async fn fetch_all<F: PriceFetcher + ?Sized>(
    fetcher: &F,
    store: &PriceStore,
    tickers: &[String],
    start: NaiveDate,
    end: NaiveDate,
) -> FetchSummary {
    let tasks = tickers.iter().map(|ticker| async move {
        info!("Fetching {}", ticker);
        (ticker, fetcher.fetch_prices(ticker, start, end).await)
    });
    let results = join_all(tasks).await;

    let mut summary = FetchSummary::default();
    for (ticker, result) in results {
        let rows = match result {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Fetch failed for {}: {}", ticker, e);
                summary.failed.push(ticker.clone());
                continue;
            }
        };

        match store.upsert_prices(&rows) {
            Ok(written) => {
                summary.rows_written += written;
                match store.count_prices(ticker) {
                    Ok(total) => info!("{}: stored {} prices ({} total)", ticker, written, total),
                    Err(e) => warn!("{}: stored {} prices, count failed: {}", ticker, written, e),
                }
            }
            Err(e) => {
                warn!("DB save error for {}: {}", ticker, e);
                summary.failed.push(ticker.clone());
            }
        }
    }
    summary
}
