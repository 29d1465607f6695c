/// Data layer: the backtest results dataset and its CSV loader.
///
/// Architecture:
/// ```text
///    results.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → BacktestDataset
///   └──────────┘
///        │
///        ▼
///   ┌─────────────────┐
///   │ BacktestDataset  │  time columns + positional numeric columns
///   └─────────────────┘
/// ```

pub mod loader;
pub mod model;
