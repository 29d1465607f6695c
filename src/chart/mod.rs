/// Chart layer: figure model, the fixed panel layout, and Plotly assembly.
///
/// ```text
///   BacktestDataset ──▶ builder ──▶ Figure ──▶ render ──▶ traces + layout
///                          │
///                       schema (column → panel bindings)
/// ```

pub mod builder;
pub mod figure;
pub mod render;
pub mod schema;

pub use builder::build_figure;
pub use figure::{Figure, FigureBuilder, Panel, Series, SeriesMode};
