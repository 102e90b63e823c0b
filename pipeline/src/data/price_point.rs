//! Daily OHLCV price points and the ordered series built from them

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Exchange timezone used when projecting trading days for display.
pub const EXCHANGE_TZ: Tz = chrono_tz::US::Eastern;

/// One trading day of OHLCV data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Trading day (timezone-naive, as delivered by the source)
    pub date: NaiveDate,
    /// Opening price
    pub open: f64,
    /// High price
    pub high: f64,
    /// Low price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Volume, `None` when the source has no volume column
    pub volume: Option<u64>,
}

impl PricePoint {
    /// Create a new price point
    pub fn new(
        date: NaiveDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: Option<u64>,
    ) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// The trading day interpreted as midnight UTC
    pub fn timestamp(&self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.date.and_time(NaiveTime::MIN))
    }

    /// The UTC timestamp projected onto the exchange timezone
    pub fn exchange_time(&self) -> DateTime<Tz> {
        self.timestamp().with_timezone(&EXCHANGE_TZ)
    }

    /// Volume with a missing value counted as zero
    pub fn volume_or_zero(&self) -> u64 {
        self.volume.unwrap_or(0)
    }
}

/// Time-ordered collection of price points, one per trading day.
///
/// Construction always sorts ascending by date and collapses duplicate days
/// to the last point supplied for that day.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Series {
    points: Vec<PricePoint>,
}

impl Series {
    /// Create new empty series
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Create from a vector of points in any order
    pub fn from_vec(mut points: Vec<PricePoint>) -> Self {
        // Stable sort keeps input order within a day, so the last duplicate wins.
        points.sort_by_key(|p| p.date);

        let mut deduped: Vec<PricePoint> = Vec::with_capacity(points.len());
        for point in points {
            match deduped.last_mut() {
                Some(prev) if prev.date == point.date => *prev = point,
                _ => deduped.push(point),
            }
        }

        Self { points: deduped }
    }

    /// Get number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if series is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get point at index
    pub fn get(&self, index: usize) -> Option<&PricePoint> {
        self.points.get(index)
    }

    /// Get first (oldest) point
    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    /// Get last (newest) point
    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Get all points
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PricePoint> {
        self.points.iter()
    }

    /// Get close prices as vector
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// Get high prices as vector
    pub fn highs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.high).collect()
    }

    /// Get low prices as vector
    pub fn lows(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.low).collect()
    }

    /// Get volumes as vector, missing volumes counted as zero
    pub fn volumes(&self) -> Vec<u64> {
        self.points.iter().map(PricePoint::volume_or_zero).collect()
    }

    /// Keep only the points matching `predicate`, preserving order
    pub fn filter<F>(&self, predicate: F) -> Self
    where
        F: Fn(&PricePoint) -> bool,
    {
        Self {
            points: self.points.iter().filter(|p| predicate(*p)).cloned().collect(),
        }
    }
}

impl From<Vec<PricePoint>> for Series {
    fn from(points: Vec<PricePoint>) -> Self {
        Self::from_vec(points)
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a PricePoint;
    type IntoIter = std::slice::Iter<'a, PricePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn point(d: u32, close: f64) -> PricePoint {
        PricePoint::new(day(d), close, close + 1.0, close - 1.0, close, Some(100))
    }

    #[test]
    fn test_series_sorts_and_dedups() {
        let series =
            Series::from_vec(vec![point(5, 3.0), point(1, 1.0), point(5, 4.0), point(3, 2.0)]);

        assert_eq!(series.len(), 3);
        assert_eq!(series.closes(), vec![1.0, 2.0, 4.0]);
        assert!(series.points().windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_exchange_time_projects_to_eastern() {
        let p = point(1, 10.0);
        let eastern = p.exchange_time();

        assert_eq!(eastern.with_timezone(&Utc), p.timestamp());
        // Midnight UTC in March (EST, UTC-5) is the previous evening in New York.
        assert_eq!(eastern.date_naive(), day(1).pred_opt().unwrap());
    }

    #[test]
    fn test_missing_volume_counts_as_zero() {
        let mut p = point(2, 10.0);
        p.volume = None;
        let series = Series::from_vec(vec![p, point(3, 11.0)]);

        assert_eq!(series.volumes(), vec![0, 100]);
    }
}
