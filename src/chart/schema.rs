//! The positional indicator schema.
//!
//! The backtester emits its indicator columns at fixed CSV positions, so
//! panel assignment is keyed by position, not by header name. The bindings
//! are declared here as data; changing the results layout means changing
//! this table.

use super::figure::Panel;

/// One indicator column → panel binding.
#[derive(Debug, Clone, Copy)]
pub struct IndicatorBinding {
    /// 0-based CSV position.
    pub column: usize,
    pub panel: Panel,
}

/// The fixed bindings, in render order. Columns outside this table are
/// never consulted.
pub const INDICATOR_BINDINGS: &[IndicatorBinding] = &[
    // DEMA
    IndicatorBinding {
        column: 11,
        panel: Panel::Trend,
    },
    // short EMA
    IndicatorBinding {
        column: 12,
        panel: Panel::Price,
    },
    // long EMA
    IndicatorBinding {
        column: 13,
        panel: Panel::Price,
    },
    // RSI
    IndicatorBinding {
        column: 14,
        panel: Panel::Oscillator,
    },
];

/// Binding for a CSV position, if that position carries an indicator.
pub fn binding_for(column: usize) -> Option<IndicatorBinding> {
    INDICATOR_BINDINGS
        .iter()
        .copied()
        .find(|b| b.column == column)
}
