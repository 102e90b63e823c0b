//! Bollinger Bands indicator

use crate::error::PipelineError;
use crate::indicators::Indicator;
use serde::Serialize;
use ta::indicators::BollingerBands as TaBollingerBands;
use ta::Next;

/// Bollinger Bands indicator wrapper
#[derive(Debug)]
pub struct BollingerBands {
    inner: TaBollingerBands,
    period: usize,
    update_count: usize,
    last_output: Option<BBResult>,
}

impl BollingerBands {
    /// Create new Bollinger Bands indicator
    pub fn new(period: usize, std_dev: f64) -> Result<Self, PipelineError> {
        if !std_dev.is_finite() || std_dev <= 0.0 {
            return Err(PipelineError::InvalidParameter {
                indicator: "BollingerBands",
                reason: format!("band multiplier must be positive, got {}", std_dev),
            });
        }
        let inner = TaBollingerBands::new(period, std_dev)
            .map_err(|_| PipelineError::invalid_period("BollingerBands", period))?;
        Ok(Self {
            inner,
            period,
            update_count: 0,
            last_output: None,
        })
    }

    /// Get upper band
    pub fn upper(&self) -> Option<f64> {
        self.last_output.as_ref().map(|o| o.upper)
    }

    /// Get middle band (SMA)
    pub fn middle(&self) -> Option<f64> {
        self.last_output.as_ref().map(|o| o.middle)
    }

    /// Get lower band
    pub fn lower(&self) -> Option<f64> {
        self.last_output.as_ref().map(|o| o.lower)
    }

    pub fn output(&self) -> Option<BBResult> {
        self.last_output
    }
}

impl Indicator for BollingerBands {
    fn name(&self) -> &str {
        "BollingerBands"
    }

    fn update(&mut self, value: f64) {
        let output = self.inner.next(value);
        self.update_count += 1;
        if self.update_count >= self.period {
            self.last_output = Some(BBResult {
                upper: output.upper,
                middle: output.average,
                lower: output.lower,
            });
        }
    }

    fn value(&self) -> Option<f64> {
        self.middle()
    }

    fn is_ready(&self) -> bool {
        self.update_count >= self.period
    }
}

/// Bollinger Bands result structure
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BBResult {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Calculate Bollinger Bands from a series of values
pub fn calculate_bollinger(
    values: &[f64],
    period: usize,
    std_dev: f64,
) -> Result<Vec<Option<BBResult>>, PipelineError> {
    let mut bb = BollingerBands::new(period, std_dev)?;
    Ok(values
        .iter()
        .map(|&value| {
            bb.update(value);
            bb.output()
        })
        .collect())
}
