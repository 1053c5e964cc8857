use crate::analyzer::anchor::{ratio, resolve};
use crate::model::{Anchor, AssetState, MomentumError};
use crate::storage::PriceSource;
use crate::utils::months_before;
use chrono::NaiveDate;
use tracing::debug;

/// Builds the momentum state of `ticker` over the last `months` calendar months.
///
/// A missing anchor at either end yields an uncalculated state; any other
/// failure is returned to the caller.
pub fn build<S: PriceSource + ?Sized>(
    source: &S,
    ticker: &str,
    months: u32,
    today: NaiveDate,
) -> Result<AssetState, MomentumError> {
    let start_date = months_before(today, months);

    let start = match resolve(source, ticker, start_date)? {
        Anchor::Found(observation) => observation,
        Anchor::NoData => {
            debug!("{}: no anchor near {} ({}m start)", ticker, start_date, months);
            return Ok(AssetState::not_calculated(ticker));
        }
    };
    let end = match resolve(source, ticker, today)? {
        Anchor::Found(observation) => observation,
        Anchor::NoData => {
            debug!("{}: no anchor near {} ({}m end)", ticker, today, months);
            return Ok(AssetState::not_calculated(ticker));
        }
    };

    let ratio = ratio(ticker, &start, &end)?;
    Ok(AssetState::calculated(ticker, ratio))
}
