// Storage module: price persistence and the lookup seam used by the analyzer.

pub mod sqlite;

pub use sqlite::PriceStore;

use crate::model::{PriceObservation, StorageError};
use chrono::NaiveDate;

/// Read access to stored price observations.
pub trait PriceSource {
    /// Returns the latest observation of `ticker` whose day lies within
    /// `tolerance_days` (inclusive) of `date`, or `None` when there is none.
    fn find_near(
        &self,
        ticker: &str,
        date: NaiveDate,
        tolerance_days: i64,
    ) -> Result<Option<PriceObservation>, StorageError>;
}
