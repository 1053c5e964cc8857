use crate::model::{FetchError, PriceRow};
use chrono::NaiveDate;

#[async_trait::async_trait]
pub trait PriceFetcher: Send + Sync {
    /// All observations of `ticker` between `start` and `end`, inclusive.
    async fn fetch_prices(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceRow>, FetchError>;
}
