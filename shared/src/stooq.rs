use std::time::Duration;

use stockdash_pipeline::data::RawRow;
use stockdash_pipeline::ticker::Ticker;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Failure to obtain daily rows for a ticker.
///
/// Every variant is treated by callers as "no data": a warning for the
/// user and an empty series for the pipeline.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("data source answered with HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV header has no {0} column")]
    MissingColumn(&'static str),

    #[error("no data found for {0}")]
    NoData(String),
}

/// Client for the Stooq daily CSV download endpoint
#[derive(Debug, Clone)]
pub struct StooqClient {
    pub base_url: String,
    client: reqwest::Client,
}

impl StooqClient {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url, client })
    }

    /// Download the full daily history for `ticker`
    pub async fn fetch_daily(&self, ticker: &Ticker) -> Result<Vec<RawRow>, FetchError> {
        let key = ticker.source_key();
        debug!(%ticker, url = %self.base_url, "Requesting daily CSV");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("s", key.as_str()), ("i", "d")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let body = response.text().await?;
        let rows = parse_daily_csv(&body)?;
        if rows.is_empty() {
            return Err(FetchError::NoData(ticker.to_string()));
        }

        info!(%ticker, rows = rows.len(), "Fetched daily history");
        Ok(rows)
    }
}

/// Decode a `Date,Open,High,Low,Close[,Volume]` CSV body.
///
/// Stooq answers unknown symbols with a bare `No data` line, which yields
/// no rows. Records that are short or unreadable are kept with their
/// missing fields left empty so the normalizer rejects and reports them;
/// only a bad or incomplete header fails the whole body.
pub fn parse_daily_csv(body: &str) -> Result<Vec<RawRow>, FetchError> {
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("no data") {
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(trimmed.as_bytes());

    let columns = Columns::from_headers(reader.headers()?)?;

    let mut rows = Vec::new();
    for (index, result) in reader.records().enumerate() {
        match result {
            Ok(record) => {
                if record.len() < columns.required_len() {
                    warn!(index, fields = record.len(), "Short CSV record");
                }
                rows.push(columns.row(&record));
            }
            Err(e) => {
                warn!(index, error = %e, "Unreadable CSV record");
                rows.push(RawRow::default());
            }
        }
    }

    Ok(rows)
}

/// Column positions resolved from the CSV header
#[derive(Debug, Clone, Copy)]
struct Columns {
    date: usize,
    open: usize,
    high: usize,
    low: usize,
    close: usize,
    volume: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, FetchError> {
        let find = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
        let require =
            |name: &'static str| find(name).ok_or(FetchError::MissingColumn(name));

        Ok(Self {
            date: require("Date")?,
            open: require("Open")?,
            high: require("High")?,
            low: require("Low")?,
            close: require("Close")?,
            volume: find("Volume"),
        })
    }

    fn required_len(&self) -> usize {
        [self.date, self.open, self.high, self.low, self.close]
            .into_iter()
            .max()
            .map_or(0, |last| last + 1)
    }

    fn row(&self, record: &csv::StringRecord) -> RawRow {
        let field = |index: usize| record.get(index).unwrap_or_default().to_string();
        RawRow {
            date: field(self.date),
            open: field(self.open),
            high: field(self.high),
            low: field(self.low),
            close: field(self.close),
            volume: self
                .volume
                .and_then(|index| record.get(index))
                .filter(|v| !v.is_empty())
                .map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockdash_pipeline::data::normalize;

    #[test]
    fn test_parse_daily_csv() {
        let body = "Date,Open,High,Low,Close,Volume\n\
                    2024-03-01,10.0,11.0,9.5,10.5,12000\n\
                    2024-03-04,10.5,12.0,10.0,11.5,\n";
        let rows = parse_daily_csv(body).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            RawRow::new("2024-03-01", "10.0", "11.0", "9.5", "10.5", Some("12000"))
        );
        assert_eq!(rows[1].volume, None);
    }

    #[test]
    fn test_parse_without_volume_column() {
        let body = "Date,Open,High,Low,Close\n2024-03-01,1,2,0.5,1.5\n";
        let rows = parse_daily_csv(body).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].close, "1.5");
        assert_eq!(rows[0].volume, None);
    }

    #[test]
    fn test_no_data_body() {
        assert!(parse_daily_csv("No data").unwrap().is_empty());
        assert!(parse_daily_csv("   ").unwrap().is_empty());
    }

    #[test]
    fn test_unexpected_layout_is_an_error() {
        let body = "Symbol,Price\nAMD,150\n";
        assert!(matches!(parse_daily_csv(body), Err(FetchError::MissingColumn("Date"))));
    }

    #[test]
    fn test_truncated_record_keeps_neighbours() {
        let body = "Date,Open,High,Low,Close,Volume\n\
                    2024-03-01,10.0,11.0,9.5,10.5,12000\n\
                    2024-03-04,10.5,12.0\n\
                    2024-03-05,11.0,11.5,10.0,11.2,9000\n";
        let rows = parse_daily_csv(body).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].date, "2024-03-04");
        assert_eq!(rows[1].close, "");
        assert_eq!(rows[1].volume, None);

        let normalized = normalize(&rows);
        assert_eq!(normalized.series.closes(), vec![10.5, 11.2]);
        assert_eq!(normalized.rejected.len(), 1);
        assert_eq!(normalized.rejected[0].index, 1);
    }

    #[test]
    fn test_header_only_body_has_no_rows() {
        assert!(parse_daily_csv("Date,Open,High,Low,Close,Volume\n").unwrap().is_empty());
    }
}
