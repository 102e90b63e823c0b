//! Summary metrics for a windowed series

use serde::Serialize;

use crate::data::Series;

/// Headline numbers shown above the price chart.
///
/// Derived read-only from a series and recomputed for every request.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct MetricsSummary {
    pub last_close: f64,
    /// Last close minus the first close of the window
    pub change: f64,
    /// `change / first close * 100`, zero when the first close is zero
    pub pct_change: f64,
    pub high: f64,
    pub low: f64,
    pub volume: u64,
}

impl MetricsSummary {
    /// Summarize `series`; an empty series yields all zeros
    pub fn from_series(series: &Series) -> Self {
        let (Some(first), Some(last)) = (series.first(), series.last()) else {
            return Self::default();
        };

        let change = last.close - first.close;
        let pct_change = if first.close != 0.0 {
            change / first.close * 100.0
        } else {
            0.0
        };

        Self {
            last_close: last.close,
            change,
            pct_change,
            high: series.iter().map(|p| p.high).fold(f64::NEG_INFINITY, f64::max),
            low: series.iter().map(|p| p.low).fold(f64::INFINITY, f64::min),
            volume: series.iter().map(|p| p.volume_or_zero()).sum(),
        }
    }

    /// Display cards: last price with delta, high, low and volume
    pub fn cards(&self, ticker: &str) -> Vec<MetricCard> {
        vec![
            MetricCard {
                label: format!("{} Last Price", ticker),
                value: format!("{:.2} USD", self.last_close),
                delta: Some(format!("{:.2} ({:.2}%)", self.change, self.pct_change)),
            },
            MetricCard {
                label: "High".to_string(),
                value: format!("{:.2} USD", self.high),
                delta: None,
            },
            MetricCard {
                label: "Low".to_string(),
                value: format!("{:.2} USD", self.low),
                delta: None,
            },
            MetricCard {
                label: "Volume".to_string(),
                value: group_thousands(self.volume),
                delta: None,
            },
        ]
    }
}

/// A formatted metric ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricCard {
    pub label: String,
    pub value: String,
    pub delta: Option<String>,
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
