use plotly::common::{Mode, Title};
use plotly::layout::{Axis, Layout};
use plotly::{Scatter, Trace};

use super::figure::{Figure, Panel, Series, SeriesMode};

/// Gap between stacked panels, as a fraction of plot height.
pub const VERTICAL_SPACING: f64 = 0.001;

const ROWS: usize = 3;

// ---------------------------------------------------------------------------
// Traces
// ---------------------------------------------------------------------------

/// Convert the figure's series into Plotly scatter traces, in order.
pub fn traces(figure: &Figure) -> Vec<Box<dyn Trace>> {
    figure
        .entries()
        .iter()
        .map(|(panel, series)| trace_for(*panel, series))
        .collect()
}

fn trace_for(panel: Panel, series: &Series) -> Box<dyn Trace> {
    let x: Vec<String> = series.x.iter().map(|t| t.to_rfc3339()).collect();
    let mode = match series.mode {
        SeriesMode::Lines => Mode::Lines,
        SeriesMode::Markers => Mode::Markers,
    };
    Scatter::new(x, series.y.clone())
        .name(&series.name)
        .mode(mode)
        .y_axis(axis_ref(panel))
}

/// Plotly y-axis reference for a panel.
fn axis_ref(panel: Panel) -> &'static str {
    match panel {
        Panel::Price => "y",
        Panel::Trend => "y2",
        Panel::Oscillator => "y3",
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Assemble the stacked layout: three rows, one column, row 1 at the
/// bottom, all rows on the single shared x axis.
pub fn layout(figure: &Figure) -> Layout {
    Layout::new()
        .title(Title::new(figure.title()))
        .x_axis(Axis::new().anchor("y"))
        .y_axis(Axis::new().domain(&panel_domain(1)).anchor("x"))
        .y_axis2(Axis::new().domain(&panel_domain(2)).anchor("x"))
        .y_axis3(Axis::new().domain(&panel_domain(3)).anchor("x"))
}

/// Vertical domain of a 1-based layout row.
fn panel_domain(row: usize) -> [f64; 2] {
    let height = (1.0 - VERTICAL_SPACING * (ROWS as f64 - 1.0)) / ROWS as f64;
    let bottom = (row as f64 - 1.0) * (height + VERTICAL_SPACING);
    [bottom, bottom + height]
}
