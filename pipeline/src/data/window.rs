//! Trailing time windows over a [`Series`]

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::data::Series;
use crate::error::PipelineError;

/// Trailing window selector offered by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeWindow {
    #[default]
    #[serde(rename = "5d")]
    FiveDays,
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "max")]
    Max,
}

impl TimeWindow {
    pub const ALL: [TimeWindow; 6] = [
        TimeWindow::FiveDays,
        TimeWindow::OneMonth,
        TimeWindow::ThreeMonths,
        TimeWindow::SixMonths,
        TimeWindow::OneYear,
        TimeWindow::Max,
    ];

    /// Calendar days covered by the window, `None` for unbounded
    pub fn days(&self) -> Option<i64> {
        match self {
            Self::FiveDays => Some(5),
            Self::OneMonth => Some(30),
            Self::ThreeMonths => Some(90),
            Self::SixMonths => Some(180),
            Self::OneYear => Some(365),
            Self::Max => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FiveDays => "5d",
            Self::OneMonth => "1mo",
            Self::ThreeMonths => "3mo",
            Self::SixMonths => "6mo",
            Self::OneYear => "1y",
            Self::Max => "max",
        }
    }

    /// Earliest timestamp kept by the window relative to `now`
    pub fn start(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.days().map(|days| now - Duration::days(days))
    }

    /// Points whose timestamp is at or after `now - days`.
    ///
    /// `Max` returns the series unchanged.
    pub fn select(&self, series: &Series, now: DateTime<Utc>) -> Series {
        match self.start(now) {
            Some(start) if !series.is_empty() => series.filter(|p| p.timestamp() >= start),
            _ => series.clone(),
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeWindow {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|w| w.as_str() == key)
            .ok_or_else(|| PipelineError::UnknownWindow(s.to_string()))
    }
}
