//! Data management module
//!
//! Handles daily OHLCV points, normalization of raw source rows and
//! trailing-window selection.

pub mod normalizer;
pub mod price_point;
pub mod window;

pub use normalizer::*;
pub use price_point::*;
pub use window::*;
