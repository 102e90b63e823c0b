//! Ticker symbols with the market suffix convention of the data source

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::PipelineError;

/// Market suffix appended to US listings
pub const US_SUFFIX: &str = ".US";

/// Upper-cased ticker carrying its market suffix, e.g. `AMD.US`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ticker(String);

impl Ticker {
    /// Trim, upper-case and suffix user input
    pub fn parse(input: &str) -> Result<Self, PipelineError> {
        let symbol = input.trim().to_uppercase();
        let valid = !symbol.is_empty()
            && symbol
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '_'));
        if !valid || symbol == US_SUFFIX {
            return Err(PipelineError::InvalidTicker(input.to_string()));
        }

        if symbol.ends_with(US_SUFFIX) {
            Ok(Self(symbol))
        } else {
            Ok(Self(format!("{}{}", symbol, US_SUFFIX)))
        }
    }

    /// Full ticker, e.g. `AMD.US`
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Symbol without the market suffix, e.g. `AMD`
    pub fn symbol(&self) -> &str {
        self.0.strip_suffix(US_SUFFIX).unwrap_or(&self.0)
    }

    /// Lower-case key used in source URLs, e.g. `amd.us`
    pub fn source_key(&self) -> String {
        self.0.to_lowercase()
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Ticker {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Ticker {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}
