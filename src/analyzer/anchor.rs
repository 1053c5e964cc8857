use crate::analyzer::ANCHOR_TOLERANCE_DAYS;
use crate::model::{Anchor, MomentumError, PriceObservation, StorageError};
use crate::storage::PriceSource;
use chrono::NaiveDate;

/// Finds the latest observation of `ticker` within the anchor tolerance of `target`.
///
/// Missing data is reported as `Anchor::NoData`; store failures are returned as errors.
pub fn resolve<S: PriceSource + ?Sized>(
    source: &S,
    ticker: &str,
    target: NaiveDate,
) -> Result<Anchor, StorageError> {
    Ok(match source.find_near(ticker, target, ANCHOR_TOLERANCE_DAYS)? {
        Some(observation) => Anchor::Found(observation),
        None => Anchor::NoData,
    })
}

/// Signed percentage change from `start` to `end`, unrounded.
pub fn ratio(
    ticker: &str,
    start: &PriceObservation,
    end: &PriceObservation,
) -> Result<f64, MomentumError> {
    if start.price == 0 {
        return Err(MomentumError::ZeroPrice {
            ticker: ticker.to_string(),
            day: start.day,
        });
    }
    Ok(100.0 * (end.price - start.price) as f64 / start.price as f64)
}
