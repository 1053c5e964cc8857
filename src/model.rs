// Core structs: PriceObservation, AssetState, ModuleState
use chrono::NaiveDate;
use thiserror::Error;

/// A single close price of a ticker on a given day, in minor currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceObservation {
    pub day: NaiveDate,
    pub price: i64,
}

/// Row written by ingestion, keyed by `(ticker, day)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceRow {
    pub ticker: String,
    pub day: NaiveDate,
    pub open: i64,
    pub close: i64,
}

/// Outcome of looking up an anchor price near a target date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Found(PriceObservation),
    NoData,
}

/// Momentum of one ticker over one lookback window.
///
/// `positive` is only meaningful after module aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetState {
    pub ticker: String,
    pub calculated: bool,
    pub ratio: f64,
    pub positive: bool,
}

impl AssetState {
    pub fn calculated(ticker: &str, ratio: f64) -> Self {
        Self {
            ticker: ticker.to_string(),
            calculated: true,
            ratio,
            positive: false,
        }
    }

    pub fn not_calculated(ticker: &str) -> Self {
        Self {
            ticker: ticker.to_string(),
            calculated: false,
            ratio: 0.0,
            positive: false,
        }
    }
}

/// Aggregated momentum of a module for one lookback window.
/// `states` are ordered by descending ratio.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleState {
    pub name: String,
    pub positive: bool,
    pub states: Vec<AssetState>,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider responded with status {0}")]
    Status(reqwest::StatusCode),
    #[error("request timed out")]
    Timeout,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Error)]
pub enum MomentumError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("zero start price for {ticker} on {day}")]
    ZeroPrice { ticker: String, day: NaiveDate },
    #[error("module \"default\" with at least one ticker is required")]
    MissingReference,
}
