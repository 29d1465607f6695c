use chrono::{DateTime, FixedOffset};

// ---------------------------------------------------------------------------
// Panel – one row of the stacked layout
// ---------------------------------------------------------------------------

/// The three stacked chart panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    /// Row 1: price, trade markers, EMA overlays.
    Price,
    /// Row 2: the DEMA trend indicator.
    Trend,
    /// Row 3: the RSI oscillator.
    Oscillator,
}

impl Panel {
    /// 1-based layout row.
    pub fn row(self) -> usize {
        match self {
            Panel::Price => 1,
            Panel::Trend => 2,
            Panel::Oscillator => 3,
        }
    }
}

// ---------------------------------------------------------------------------
// Series – one trace
// ---------------------------------------------------------------------------

/// How a series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesMode {
    Lines,
    Markers,
}

/// A named (timestamp, value) sequence. Never mutated after creation;
/// NaN values render as gaps.
#[derive(Debug, Clone)]
pub struct Series {
    pub name: String,
    pub mode: SeriesMode,
    pub x: Vec<DateTime<FixedOffset>>,
    pub y: Vec<f64>,
}

impl Series {
    pub fn new(
        name: impl Into<String>,
        mode: SeriesMode,
        x: Vec<DateTime<FixedOffset>>,
        y: Vec<f64>,
    ) -> Self {
        Series {
            name: name.into(),
            mode,
            x,
            y,
        }
    }
}

// ---------------------------------------------------------------------------
// Figure – the assembled chart
// ---------------------------------------------------------------------------

/// The complete chart: a title plus panel-assigned series, in insertion
/// order. Built once via [`FigureBuilder`], then only read.
#[derive(Debug, Clone)]
pub struct Figure {
    title: String,
    panels: Vec<(Panel, Series)>,
}

impl Figure {
    pub fn title(&self) -> &str {
        &self.title
    }

    /// All series with their panel assignment, in insertion order.
    pub fn entries(&self) -> &[(Panel, Series)] {
        &self.panels
    }

    /// Series assigned to one panel, in insertion order.
    pub fn series_in(&self, panel: Panel) -> impl Iterator<Item = &Series> {
        self.panels
            .iter()
            .filter(move |(p, _)| *p == panel)
            .map(|(_, s)| s)
    }

    pub fn series_count(&self) -> usize {
        self.panels.len()
    }
}

/// Accumulates `(panel, series)` pairs, then produces the final [`Figure`]
/// in one step.
#[derive(Debug)]
pub struct FigureBuilder {
    title: String,
    panels: Vec<(Panel, Series)>,
}

impl FigureBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        FigureBuilder {
            title: title.into(),
            panels: Vec::new(),
        }
    }

    pub fn series(mut self, panel: Panel, series: Series) -> Self {
        self.panels.push((panel, series));
        self
    }

    pub fn build(self) -> Figure {
        Figure {
            title: self.title,
            panels: self.panels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_insertion_order() {
        let fig = FigureBuilder::new("t")
            .series(Panel::Price, Series::new("a", SeriesMode::Lines, vec![], vec![]))
            .series(Panel::Trend, Series::new("b", SeriesMode::Lines, vec![], vec![]))
            .series(Panel::Price, Series::new("c", SeriesMode::Markers, vec![], vec![]))
            .build();

        assert_eq!(fig.series_count(), 3);
        let price: Vec<&str> = fig.series_in(Panel::Price).map(|s| s.name.as_str()).collect();
        assert_eq!(price, ["a", "c"]);
        assert_eq!(fig.series_in(Panel::Oscillator).count(), 0);
    }

    #[test]
    fn test_panel_rows() {
        assert_eq!(Panel::Price.row(), 1);
        assert_eq!(Panel::Trend.row(), 2);
        assert_eq!(Panel::Oscillator.row(), 3);
    }
}
