//! Technical indicators module
//!
//! Streaming indicators over closing prices (plus high/low for the
//! stochastic oscillator), using the `ta` crate where its definition matches
//! the textbook one. Every `calculate_*` helper returns a column aligned
//! with its input, `None` where history is insufficient.

pub mod rsi;
pub mod macd;
pub mod ema;
pub mod sma;
pub mod bb;
pub mod stochastic;
pub mod frame;
pub mod kind;

pub use rsi::*;
pub use macd::*;
pub use ema::*;
pub use sma::*;
pub use bb::*;
pub use stochastic::*;
pub use frame::*;
pub use kind::*;

/// Indicator trait for single-input indicators
pub trait Indicator {
    /// Get the name of the indicator
    fn name(&self) -> &str;

    /// Update indicator with new value
    fn update(&mut self, value: f64);

    /// Get current indicator value
    fn value(&self) -> Option<f64>;

    /// Check if indicator is ready (has enough data)
    fn is_ready(&self) -> bool;
}
