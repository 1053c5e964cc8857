// Text rendering of module momentum across the lookback windows.
use crate::analyzer::WindowStates;
use crate::model::{AssetState, ModuleState};
use crate::utils::sign;
use std::io::{self, Write};

pub fn render_asset(state: &AssetState) -> String {
    if !state.calculated {
        format!("!{}(not calculated)", state.ticker)
    } else {
        format!("{}{}({:.2}%)", sign(state.positive), state.ticker, state.ratio)
    }
}

fn render_states(states: &[AssetState]) -> String {
    states.iter().map(render_asset).collect::<Vec<_>>().join("; ")
}

/// Header plus one detail line per window for a single module.
pub fn render_module(
    name: &str,
    state3: &ModuleState,
    state6: &ModuleState,
    state9: &ModuleState,
    state12: &ModuleState,
) -> Vec<String> {
    vec![
        format!(
            "{} is {}3/{}6/{}9/{}12",
            name.to_uppercase(),
            sign(state3.positive),
            sign(state6.positive),
            sign(state9.positive),
            sign(state12.positive),
        ),
        format!(" 3m: {}", render_states(&state3.states)),
        format!(" 6m: {}", render_states(&state6.states)),
        format!(" 9m: {}", render_states(&state9.states)),
        format!(" 12m: {}", render_states(&state12.states)),
    ]
}

/// Renders every module in lexicographic order, blocks separated by an empty line.
///
/// Modules missing from any window are skipped.
pub fn render_report(windows: &WindowStates) -> Vec<String> {
    let [w3, w6, w9, w12] = windows;
    let mut lines = Vec::new();
    for (name, state3) in w3 {
        let (Some(state6), Some(state9), Some(state12)) = (w6.get(name), w9.get(name), w12.get(name)) else {
            continue;
        };
        lines.extend(render_module(&state3.name, state3, state6, state9, state12));
        lines.push(String::new());
    }
    lines
}

pub fn write_report<W: Write>(mut sink: W, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(sink, "{}", line)?;
    }
    sink.flush()
}
