use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, FixedOffset};

use super::model::{
    BacktestDataset, COL_BOUGHT_SIZE, COL_CLOSE, COL_SOLD_SIZE, COL_START_TIME, MIN_COLUMNS,
    TIME_COLUMNS,
};

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Load a backtest results CSV.
///
/// Expected layout: a header row, date-times (RFC 3339) in columns 0 and 1,
/// numbers everywhere else. Blank numeric cells (the backtester leaves
/// `bought_size` / `sold_size` empty on rows without a fill) become NaN.
///
/// Anything else — missing file, fewer than [`MIN_COLUMNS`] columns, a
/// missing named column, an unparseable cell — is a fatal error.
pub fn load_csv(path: &Path) -> Result<BacktestDataset> {
    let mut reader =
        csv::Reader::from_path(path).with_context(|| format!("opening {}", path.display()))?;

    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.len() < MIN_COLUMNS {
        bail!(
            "CSV has {} columns, expected at least {MIN_COLUMNS}",
            headers.len()
        );
    }
    for required in [COL_START_TIME, COL_CLOSE, COL_BOUGHT_SIZE, COL_SOLD_SIZE] {
        if !headers.iter().any(|h| h == required) {
            bail!("CSV missing '{required}' column");
        }
    }

    let mut start_time = Vec::new();
    let mut end_time = Vec::new();
    let mut numeric: Vec<Vec<f64>> = vec![Vec::new(); headers.len() - TIME_COLUMNS];

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        if record.len() != headers.len() {
            bail!(
                "CSV row {row_no}: has {} fields, header has {}",
                record.len(),
                headers.len()
            );
        }

        start_time.push(parse_datetime(record.get(0).unwrap_or(""), row_no, &headers[0])?);
        end_time.push(parse_datetime(record.get(1).unwrap_or(""), row_no, &headers[1])?);

        for (col_idx, value) in record.iter().enumerate().skip(TIME_COLUMNS) {
            let parsed = parse_cell(value, row_no, &headers[col_idx])?;
            numeric[col_idx - TIME_COLUMNS].push(parsed);
        }
    }

    Ok(BacktestDataset::new(headers, start_time, end_time, numeric))
}

fn parse_datetime(s: &str, row: usize, col: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(s.trim())
        .with_context(|| format!("Row {row}, {col}: '{s}' is not an RFC 3339 date-time"))
}

fn parse_cell(s: &str, row: usize, col: &str) -> Result<f64> {
    let s = s.trim();
    if s.is_empty() {
        // Blank cell → NaN, the dataframe convention the chart relies on.
        return Ok(f64::NAN);
    }
    s.parse::<f64>()
        .with_context(|| format!("Row {row}, {col}: '{s}' is not a number"))
}
