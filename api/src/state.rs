use shared::{Config, StooqClient};
use stockdash_pipeline::data::RawRow;
use stockdash_pipeline::ticker::Ticker;
use tracing::warn;

#[derive(Clone)]
pub struct AppState {
    pub client: StooqClient,
    pub watchlist: Vec<String>,
    pub default_ticker: String,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, anyhow::Error> {
        let client = StooqClient::new(config.stooq_base_url.clone(), config.fetch_timeout)?;
        Ok(AppState {
            client,
            watchlist: config.watchlist.clone(),
            default_ticker: config.default_ticker.clone(),
        })
    }

    /// Fetch daily rows, turning any failure into a user-facing warning and no rows
    pub async fn load_rows(&self, ticker: &Ticker) -> (Vec<RawRow>, Option<String>) {
        match self.client.fetch_daily(ticker).await {
            Ok(rows) => (rows, None),
            Err(e) => {
                warn!(%ticker, error = %e, "Price data unavailable");
                (Vec::new(), Some(format!("Could not load data for {}: {}", ticker, e)))
            }
        }
    }
}
