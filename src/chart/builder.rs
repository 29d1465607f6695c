use anyhow::{Context, Result};

use crate::data::model::{BacktestDataset, COL_BOUGHT_SIZE, COL_CLOSE, COL_SOLD_SIZE};

use super::figure::{Figure, FigureBuilder, Panel, Series, SeriesMode};
use super::schema;

// ---------------------------------------------------------------------------
// Figure builder
// ---------------------------------------------------------------------------

/// Build the three-panel figure from a results dataset.
///
/// Panel 1 gets the close-price line plus the bought/sold markers, then the
/// indicator columns are added panel by panel in binding order.
pub fn build_figure(dataset: &BacktestDataset, title: &str) -> Result<Figure> {
    let x = dataset.start_times().to_vec();
    let close = dataset
        .column_by_name(COL_CLOSE)
        .with_context(|| format!("dataset missing '{COL_CLOSE}' column"))?;
    let bought = dataset
        .column_by_name(COL_BOUGHT_SIZE)
        .with_context(|| format!("dataset missing '{COL_BOUGHT_SIZE}' column"))?;
    let sold = dataset
        .column_by_name(COL_SOLD_SIZE)
        .with_context(|| format!("dataset missing '{COL_SOLD_SIZE}' column"))?;

    let mut builder = FigureBuilder::new(title)
        .series(
            Panel::Price,
            Series::new("price", SeriesMode::Lines, x.clone(), close.to_vec()),
        )
        .series(
            Panel::Price,
            Series::new("bought", SeriesMode::Markers, x.clone(), markers(bought, close)),
        )
        .series(
            Panel::Price,
            Series::new("sold", SeriesMode::Markers, x.clone(), markers(sold, close)),
        );

    // Only the bound positions are consulted; every other column is
    // skipped regardless of its header.
    for column in 0..dataset.width() {
        let Some(binding) = schema::binding_for(column) else {
            continue;
        };
        let values = dataset
            .column(column)
            .with_context(|| format!("dataset missing indicator column {column}"))?;
        let name = dataset
            .header(column)
            .with_context(|| format!("dataset missing header for column {column}"))?;
        builder = builder.series(
            binding.panel,
            Series::new(name, SeriesMode::Lines, x.clone(), values.to_vec()),
        );
    }

    Ok(builder.build())
}

fn markers(sizes: &[f64], close: &[f64]) -> Vec<f64> {
    sizes
        .iter()
        .zip(close)
        .map(|(&size, &close)| trade_marker(size, close))
        .collect()
}

/// Marker value for one row: the close price where a fill happened, NaN
/// where the size is zero or blank so the point renders as a gap.
fn trade_marker(size: f64, close: f64) -> f64 {
    if size == 0.0 || size.is_nan() {
        f64::NAN
    } else {
        close
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_csv;
    use chrono::{DateTime, FixedOffset};
    use std::io::Write;

    fn ts(minute: u32) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(&format!("2017-06-10T00:{minute:02}:00Z")).unwrap()
    }

    /// 15-column dataset with recognisable values per column position.
    fn dataset(rows: usize) -> BacktestDataset {
        let headers: Vec<String> = [
            "start_time",
            "end_time",
            "low",
            "high",
            "open",
            "close",
            "volume",
            "bought_size",
            "sold_size",
            "budget",
            "invested",
            "dema-10-21",
            "ema-10",
            "ema-21",
            "rsi-14",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let start: Vec<_> = (0..rows).map(|i| ts(i as u32 * 5)).collect();
        let end: Vec<_> = (0..rows).map(|i| ts(i as u32 * 5 + 5)).collect();
        // Column at position p holds p*100 + row.
        let numeric: Vec<Vec<f64>> = (2..15)
            .map(|p| (0..rows).map(|r| (p * 100 + r) as f64).collect())
            .collect();

        BacktestDataset::new(headers, start, end, numeric)
    }

    #[test]
    fn test_panel_series_mapping() {
        let fig = build_figure(&dataset(4), "t").unwrap();

        let price: Vec<&str> = fig.series_in(Panel::Price).map(|s| s.name.as_str()).collect();
        assert_eq!(price, ["price", "bought", "sold", "ema-10", "ema-21"]);

        let trend: Vec<&str> = fig.series_in(Panel::Trend).map(|s| s.name.as_str()).collect();
        assert_eq!(trend, ["dema-10-21"]);

        let osc: Vec<&str> = fig
            .series_in(Panel::Oscillator)
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(osc, ["rsi-14"]);
    }

    #[test]
    fn test_modes_and_axis() {
        let ds = dataset(3);
        let fig = build_figure(&ds, "t").unwrap();

        for (_, series) in fig.entries() {
            assert_eq!(series.x, ds.start_times());
            let expected = match series.name.as_str() {
                "bought" | "sold" => SeriesMode::Markers,
                _ => SeriesMode::Lines,
            };
            assert_eq!(series.mode, expected);
        }
    }

    #[test]
    fn test_trade_marker_gap_quirk() {
        assert!(trade_marker(0.0, 2500.0).is_nan());
        assert!(trade_marker(f64::NAN, 2500.0).is_nan());
        assert_eq!(trade_marker(1.5, 2500.0), 2500.0);
        assert_eq!(trade_marker(-0.5, 2500.0), 2500.0);
    }

    #[test]
    fn test_unconsulted_columns_do_not_matter() {
        let mut a = dataset(3);
        let fig_a = build_figure(&a, "t").unwrap();

        // Perturb every column outside close/bought/sold and the four
        // indicator positions.
        let headers: Vec<String> = (0..a.width()).map(|i| a.header(i).unwrap().to_string()).collect();
        let mut numeric: Vec<Vec<f64>> = (2..15).map(|p| a.column(p).unwrap().to_vec()).collect();
        for p in [2usize, 3, 4, 6, 9, 10] {
            for v in &mut numeric[p - 2] {
                *v += 9999.0;
            }
        }
        a = BacktestDataset::new(headers, a.start_times().to_vec(), a.end_times().to_vec(), numeric);
        let fig_b = build_figure(&a, "t").unwrap();

        for ((_, sa), (_, sb)) in fig_a.entries().iter().zip(fig_b.entries()) {
            assert_eq!(sa.name, sb.name);
            assert_eq!(sa.y, sb.y);
        }
    }

    #[test]
    fn test_end_to_end_five_rows() {
        let header = "start_time,end_time,low,high,open,close,volume,\
                      bought_size,sold_size,budget,invested,dema-10-21,ema-10,ema-21,rsi-14";
        let closes = [2500.0, 2510.0, 2505.0, 2490.0, 2495.0];
        let bought = ["1.0", "", "0.0", "", ""];
        let sold = ["", "", "", "2.5", ""];

        let mut contents = format!("{header}\n");
        for i in 0..5 {
            contents.push_str(&format!(
                "2017-06-10T00:{:02}:00Z,2017-06-10T00:{:02}:00Z,\
                 {c},{c},{c},{c},10.0,{},{},1000.0,0.0,0.5,2500.0,2499.5,55.0\n",
                i * 5,
                i * 5 + 5,
                bought[i],
                sold[i],
                c = closes[i],
            ));
        }
        let path = std::env::temp_dir().join("trade-graph-builder-e2e.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();

        let ds = load_csv(&path).unwrap();
        let fig = build_figure(&ds, "MyChart").unwrap();

        assert_eq!(fig.title(), "MyChart");
        assert_eq!(fig.series_in(Panel::Price).count(), 5);
        assert_eq!(fig.series_in(Panel::Trend).count(), 1);
        assert_eq!(fig.series_in(Panel::Oscillator).count(), 1);

        let bought_series = fig
            .series_in(Panel::Price)
            .find(|s| s.name == "bought")
            .unwrap();
        assert_eq!(bought_series.y[0], 2500.0);
        assert!(bought_series.y[1].is_nan());
        assert!(bought_series.y[2].is_nan());
        assert!(bought_series.y[3].is_nan());

        let sold_series = fig.series_in(Panel::Price).find(|s| s.name == "sold").unwrap();
        assert_eq!(sold_series.y[3], 2490.0);
        assert!(sold_series.y[0].is_nan());
    }
}
