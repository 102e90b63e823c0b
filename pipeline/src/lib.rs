//! stockdash-pipeline: daily stock data in, dashboard-ready analytics out
//!
//! This crate turns raw daily OHLCV rows into the numbers a stock dashboard
//! shows, using [ta-rs](https://github.com/greyblake/ta-rs) for the
//! window-based indicators.
//!
//! # Features
//!
//! - **Data Management**: CSV row normalization, day-ordered series, trailing windows
//! - **Technical Indicators**: SMA, EMA, RSI, MACD, Bollinger Bands, Stochastic
//! - **Metrics**: last close, change, period extrema, volume, watchlist quotes
//! - **Chart View Models**: overlay/sub-chart layout and newest-first tables
//!
//! # Example
//!
//! ```no_run
//! use stockdash_pipeline::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let rows = vec![RawRow::new("2024-03-01", "10", "11", "9", "10.5", Some("1200"))];
//!     let request = DashboardRequest::new(Ticker::parse("amd")?, TimeWindow::Max);
//!     let dashboard = Dashboard::build(&rows, &request, chrono::Utc::now())?;
//!     println!("{:?}", dashboard.metrics);
//!     Ok(())
//! }
//! ```

pub mod chart;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod indicators;
pub mod metrics;
pub mod ticker;

// Re-export commonly used types
pub mod prelude {
    pub use crate::chart::*;
    pub use crate::dashboard::*;
    pub use crate::data::*;
    pub use crate::error::PipelineError;
    pub use crate::indicators::*;
    pub use crate::metrics::*;
    pub use crate::ticker::Ticker;

    pub use anyhow::{Context, Result};
}

/// Result type alias
pub type Result<T> = anyhow::Result<T>;
