//! View models for the charting layer

pub mod spec;
pub mod table;

pub use spec::*;
pub use table::*;
