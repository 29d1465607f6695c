use chrono::{DateTime, FixedOffset};

// ---------------------------------------------------------------------------
// Fixed schema
// ---------------------------------------------------------------------------

/// Columns that must be present by name.
pub const COL_START_TIME: &str = "start_time";
pub const COL_CLOSE: &str = "close";
pub const COL_BOUGHT_SIZE: &str = "bought_size";
pub const COL_SOLD_SIZE: &str = "sold_size";

/// The backtester writes 11 fixed columns followed by at least 4 indicator
/// columns, so a usable file carries 15 or more.
pub const MIN_COLUMNS: usize = 15;

/// Positions 0 and 1 hold date-times, not numbers.
pub const TIME_COLUMNS: usize = 2;

// ---------------------------------------------------------------------------
// BacktestDataset
// ---------------------------------------------------------------------------

/// One parsed results file.
///
/// Columns are addressed by their CSV position (0-based). Positions 0 and 1
/// are the parsed time columns; every other position is a numeric column
/// where a blank cell is stored as NaN.
#[derive(Debug, Clone)]
pub struct BacktestDataset {
    /// Header names in CSV order.
    headers: Vec<String>,
    /// Column 0 — the primary time axis.
    start_time: Vec<DateTime<FixedOffset>>,
    /// Column 1.
    end_time: Vec<DateTime<FixedOffset>>,
    /// Columns 2.. in CSV order, each `len()` values long.
    numeric: Vec<Vec<f64>>,
}

impl BacktestDataset {
    pub fn new(
        headers: Vec<String>,
        start_time: Vec<DateTime<FixedOffset>>,
        end_time: Vec<DateTime<FixedOffset>>,
        numeric: Vec<Vec<f64>>,
    ) -> Self {
        BacktestDataset {
            headers,
            start_time,
            end_time,
            numeric,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.start_time.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.start_time.is_empty()
    }

    /// Number of columns, time columns included.
    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// The primary time axis (column 0).
    pub fn start_times(&self) -> &[DateTime<FixedOffset>] {
        &self.start_time
    }

    /// Column 1; parsed but not charted.
    pub fn end_times(&self) -> &[DateTime<FixedOffset>] {
        &self.end_time
    }

    /// Header name at a CSV position.
    pub fn header(&self, index: usize) -> Option<&str> {
        self.headers.get(index).map(|s| s.as_str())
    }

    /// Numeric column at a CSV position. `None` for the time columns and
    /// for positions past the end.
    pub fn column(&self, index: usize) -> Option<&[f64]> {
        if index < TIME_COLUMNS {
            return None;
        }
        self.numeric.get(index - TIME_COLUMNS).map(|v| v.as_slice())
    }

    /// Numeric column by header name.
    pub fn column_by_name(&self, name: &str) -> Option<&[f64]> {
        let index = self.headers.iter().position(|h| h == name)?;
        self.column(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn ts(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn two_row_dataset() -> BacktestDataset {
        BacktestDataset::new(
            vec!["start_time".into(), "end_time".into(), "close".into()],
            vec![ts("2017-06-10T00:00:00Z"), ts("2017-06-10T00:05:00Z")],
            vec![ts("2017-06-10T00:05:00Z"), ts("2017-06-10T00:10:00Z")],
            vec![vec![2501.0, 2502.5]],
        )
    }

    #[test]
    fn test_positional_access() {
        let ds = two_row_dataset();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.width(), 3);
        assert!(ds.column(0).is_none());
        assert!(ds.column(1).is_none());
        assert_eq!(ds.column(2), Some(&[2501.0, 2502.5][..]));
        assert!(ds.column(3).is_none());
    }

    #[test]
    fn test_named_access() {
        let ds = two_row_dataset();
        assert_eq!(ds.column_by_name("close"), Some(&[2501.0, 2502.5][..]));
        assert!(ds.column_by_name("start_time").is_none());
        assert!(ds.column_by_name("volume").is_none());
    }
}
