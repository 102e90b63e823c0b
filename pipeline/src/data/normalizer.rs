//! Raw CSV rows to a canonical [`Series`]

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::data::{PricePoint, Series};

/// One record as delivered by the daily CSV endpoint.
///
/// Every field is kept as text so that parsing problems surface here rather
/// than in the transport layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Open")]
    pub open: String,
    #[serde(rename = "High")]
    pub high: String,
    #[serde(rename = "Low")]
    pub low: String,
    #[serde(rename = "Close")]
    pub close: String,
    #[serde(rename = "Volume", default)]
    pub volume: Option<String>,
}

impl RawRow {
    pub fn new(
        date: &str,
        open: &str,
        high: &str,
        low: &str,
        close: &str,
        volume: Option<&str>,
    ) -> Self {
        Self {
            date: date.to_string(),
            open: open.to_string(),
            high: high.to_string(),
            low: low.to_string(),
            close: close.to_string(),
            volume: volume.map(str::to_string),
        }
    }
}

/// A row the normalizer could not turn into a [`PricePoint`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowRejection {
    /// Zero-based position of the row in the input
    pub index: usize,
    pub reason: String,
}

/// Normalizer output
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    pub series: Series,
    pub rejected: Vec<RowRejection>,
}

/// Convert raw rows into a time-ordered, day-deduplicated series.
///
/// Rows with an unparsable date or price are skipped and reported; the
/// OHLC ordering (`low <= open, close <= high`) is not checked.
pub fn normalize(rows: &[RawRow]) -> Normalized {
    let mut points = Vec::with_capacity(rows.len());
    let mut rejected = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        match parse_row(row) {
            Ok(point) => points.push(point),
            Err(reason) => {
                warn!(index, %reason, "Skipping malformed price row");
                rejected.push(RowRejection { index, reason });
            }
        }
    }

    let series = Series::from_vec(points);
    debug!(
        input = rows.len(),
        points = series.len(),
        rejected = rejected.len(),
        "Normalized price rows"
    );

    Normalized { series, rejected }
}

fn parse_row(row: &RawRow) -> Result<PricePoint, String> {
    let date = parse_date(&row.date)?;
    let open = parse_price("Open", &row.open)?;
    let high = parse_price("High", &row.high)?;
    let low = parse_price("Low", &row.low)?;
    let close = parse_price("Close", &row.close)?;
    let volume = row.volume.as_deref().and_then(parse_volume);

    Ok(PricePoint::new(date, open, high, low, close, volume))
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    let trimmed = raw.trim();
    // Accept "2024-03-01" as well as "2024-03-01 00:00:00" / "2024-03-01T00:00:00".
    let day = trimmed
        .split(|c: char| c == ' ' || c == 'T')
        .next()
        .unwrap_or_default();

    NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|e| format!("invalid Date {:?}: {}", raw, e))
}

fn parse_price(column: &str, raw: &str) -> Result<f64, String> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("invalid {} {:?}", column, raw))
}

fn parse_volume(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    if let Ok(v) = trimmed.parse::<u64>() {
        return Some(v);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Some(v.trunc() as u64),
        _ => None,
    }
}
