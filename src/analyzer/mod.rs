// Analyzer module: momentum suggestion engine.

pub mod anchor;
pub mod asset_state;
pub mod module_state;

pub use module_state::{MomentumAnalyzer, WindowStates};

/// Lookback windows (in calendar months) reported for every module.
pub const LOOKBACK_WINDOWS: [u32; 4] = [3, 6, 9, 12];

/// Days on either side of a target date an anchor observation may fall.
pub const ANCHOR_TOLERANCE_DAYS: i64 = 3;
