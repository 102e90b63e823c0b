//! EMA (Exponential Moving Average) indicator

use crate::error::PipelineError;
use crate::indicators::Indicator;

/// EMA with smoothing factor `2 / (period + 1)`, seeded with the SMA of the
/// first `period` values.
#[derive(Debug, Clone)]
pub struct EMA {
    period: usize,
    k: f64,
    update_count: usize,
    seed_sum: f64,
    last_value: Option<f64>,
}

impl EMA {
    /// Create new EMA indicator
    pub fn new(period: usize) -> Result<Self, PipelineError> {
        if period == 0 {
            return Err(PipelineError::invalid_period("EMA", period));
        }
        Ok(Self {
            period,
            k: 2.0 / (period as f64 + 1.0),
            update_count: 0,
            seed_sum: 0.0,
            last_value: None,
        })
    }

    /// Get EMA period
    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for EMA {
    fn name(&self) -> &str {
        "EMA"
    }

    fn update(&mut self, value: f64) {
        self.update_count += 1;
        self.last_value = match self.last_value {
            Some(prev) => Some(value * self.k + prev * (1.0 - self.k)),
            None => {
                self.seed_sum += value;
                if self.update_count == self.period {
                    Some(self.seed_sum / self.period as f64)
                } else {
                    None
                }
            }
        };
    }

    fn value(&self) -> Option<f64> {
        self.last_value
    }

    fn is_ready(&self) -> bool {
        self.last_value.is_some()
    }
}

/// Calculate EMA from a series of values
pub fn calculate_ema(values: &[f64], period: usize) -> Result<Vec<Option<f64>>, PipelineError> {
    let mut ema = EMA::new(period)?;
    Ok(values
        .iter()
        .map(|&value| {
            ema.update(value);
            ema.value()
        })
        .collect())
}
