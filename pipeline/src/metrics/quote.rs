//! Watchlist quote cards

use serde::Serialize;

use crate::data::Series;

/// Default symbols shown in the quote strip
pub const DEFAULT_WATCHLIST: [&str; 4] = ["AAPL", "GOOGL", "JPM", "NVDA"];

/// Price direction over the card's window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Flat,
}

impl Direction {
    fn of(change: f64) -> Self {
        if change > 0.0 {
            Self::Up
        } else if change < 0.0 {
            Self::Down
        } else {
            Self::Flat
        }
    }

    /// Colour used by the card
    pub fn color(&self) -> &'static str {
        match self {
            Self::Up => "green",
            Self::Down => "red",
            Self::Flat => "gray",
        }
    }
}

/// Compact quote: last price and change against the window's first open
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteCard {
    pub symbol: String,
    pub last_price: f64,
    pub change: f64,
    pub pct_change: f64,
    pub direction: Direction,
}

impl QuoteCard {
    /// Build a card from an already windowed series, `None` when it is empty.
    ///
    /// Price and change are rounded to cents before the percentage is taken.
    pub fn from_series(symbol: &str, series: &Series) -> Option<Self> {
        let first = series.first()?;
        let last = series.last()?;

        let last_price = round2(last.close);
        let change = round2(last_price - first.open);
        let pct_change = if first.open != 0.0 {
            round2(change / first.open * 100.0)
        } else {
            0.0
        };

        Some(Self {
            symbol: symbol.to_string(),
            last_price,
            change,
            pct_change,
            direction: Direction::of(change),
        })
    }

    /// `+1.23 (+0.45%)`
    pub fn change_label(&self) -> String {
        format!("{:+.2} ({:+.2}%)", self.change, self.pct_change)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::PricePoint;
    use chrono::NaiveDate;

    fn point(day: u32, open: f64, close: f64) -> PricePoint {
        let date = NaiveDate::from_ymd_opt(2024, 6, day).unwrap();
        PricePoint::new(date, open, close, open, close, None)
    }

    #[test]
    fn test_card_uses_first_open() {
        let series = Series::from_vec(vec![
            point(3, 100.0, 101.0),
            point(4, 101.0, 102.004),
            point(5, 102.0, 104.0),
        ]);
        let card = QuoteCard::from_series("AAPL", &series).unwrap();

        assert_eq!(card.last_price, 104.0);
        assert_eq!(card.change, 4.0);
        assert_eq!(card.pct_change, 4.0);
        assert_eq!(card.direction, Direction::Up);
        assert_eq!(card.direction.color(), "green");
        assert_eq!(card.change_label(), "+4.00 (+4.00%)");
    }

    #[test]
    fn test_card_direction_and_empty() {
        let series = Series::from_vec(vec![point(3, 50.0, 49.0), point(4, 49.0, 48.0)]);
        let card = QuoteCard::from_series("JPM", &series).unwrap();
        assert_eq!(card.direction, Direction::Down);

        assert!(QuoteCard::from_series("JPM", &Series::new()).is_none());
    }

    #[test]
    fn test_zero_open_does_not_divide() {
        let series = Series::from_vec(vec![point(3, 0.0, 1.0)]);
        let card = QuoteCard::from_series("X", &series).unwrap();
        assert_eq!(card.pct_change, 0.0);
    }
}
