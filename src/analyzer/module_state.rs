use crate::analyzer::{asset_state, LOOKBACK_WINDOWS};
use crate::config::DEFAULT_MODULE;
use crate::model::{AssetState, ModuleState, MomentumError};
use crate::storage::PriceSource;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::info;

/// Module states for each lookback window, in window order (3, 6, 9, 12 months).
pub type WindowStates = [BTreeMap<String, ModuleState>; 4];

/// Computes per-module momentum against the reference ticker.
pub struct MomentumAnalyzer<'a, S: PriceSource + ?Sized> {
    source: &'a S,
    today: NaiveDate,
}

impl<'a, S: PriceSource + ?Sized> MomentumAnalyzer<'a, S> {
    pub fn new(source: &'a S, today: NaiveDate) -> Self {
        Self { source, today }
    }

    pub fn asset_state(&self, ticker: &str, months: u32) -> Result<AssetState, MomentumError> {
        asset_state::build(self.source, ticker, months, self.today)
    }

    /// State of the first ticker of the `default` module.
    pub fn reference(
        &self,
        modules: &BTreeMap<String, Vec<String>>,
        months: u32,
    ) -> Result<AssetState, MomentumError> {
        let ticker = modules
            .get(DEFAULT_MODULE)
            .and_then(|tickers| tickers.first())
            .ok_or(MomentumError::MissingReference)?;
        self.asset_state(ticker, months)
    }

    /// Module states for one lookback window, keyed by module name.
    pub fn module_states(
        &self,
        modules: &BTreeMap<String, Vec<String>>,
        months: u32,
    ) -> Result<BTreeMap<String, ModuleState>, MomentumError> {
        let reference = self.reference(modules, months)?;
        info!(
            "{}m reference {}: {:.2}% (calculated: {})",
            months, reference.ticker, reference.ratio, reference.calculated
        );

        let mut result = BTreeMap::new();
        for (name, tickers) in modules {
            let states = tickers
                .iter()
                .map(|ticker| self.asset_state(ticker, months))
                .collect::<Result<Vec<_>, _>>()?;
            result.insert(name.clone(), classify_module(name, states, &reference));
        }
        Ok(result)
    }

    /// Module states for every lookback window, each computed from scratch.
    pub fn all_windows(
        &self,
        modules: &BTreeMap<String, Vec<String>>,
    ) -> Result<WindowStates, MomentumError> {
        let [m3, m6, m9, m12] = LOOKBACK_WINDOWS;
        Ok([
            self.module_states(modules, m3)?,
            self.module_states(modules, m6)?,
            self.module_states(modules, m9)?,
            self.module_states(modules, m12)?,
        ])
    }
}

fn beats_reference(state: &AssetState, reference: &AssetState) -> bool {
    state.ratio > reference.ratio && state.ratio > 0.0
}

/// Sorts members by descending ratio (stable) and flags positivity against `reference`.
pub fn classify_module(name: &str, mut states: Vec<AssetState>, reference: &AssetState) -> ModuleState {
    let positive = states.iter().any(|s| beats_reference(s, reference));

    states.sort_by(|a, b| b.ratio.total_cmp(&a.ratio));
    for state in states.iter_mut() {
        state.positive = beats_reference(state, reference);
    }

    ModuleState {
        name: name.to_string(),
        positive,
        states,
    }
}
