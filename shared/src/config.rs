use std::time::Duration;

use dotenv::dotenv;
use stockdash_pipeline::metrics::DEFAULT_WATCHLIST;

pub struct Config {
    pub stooq_base_url: String,
    pub bind_addr: String,
    pub watchlist: Vec<String>,
    pub default_ticker: String,
    pub fetch_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenv().ok();

        let fetch_timeout_secs: u64 = std::env::var("FETCH_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map_err(|e| {
                anyhow::anyhow!("FETCH_TIMEOUT_SECS must be a whole number of seconds: {}", e)
            })?;

        Ok(Config {
            stooq_base_url: std::env::var("STOOQ_BASE_URL")
                .unwrap_or_else(|_| "https://stooq.com/q/d/l/".to_string()),
            bind_addr: std::env::var("API_BIND_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:9999".to_string()),
            watchlist: std::env::var("WATCHLIST")
                .map(|list| parse_watchlist(&list))
                .unwrap_or_else(|_| DEFAULT_WATCHLIST.iter().map(|s| s.to_string()).collect()),
            default_ticker: std::env::var("DEFAULT_TICKER").unwrap_or_else(|_| "AMD".to_string()),
            fetch_timeout: Duration::from_secs(fetch_timeout_secs),
        })
    }
}

fn parse_watchlist(list: &str) -> Vec<String> {
    list.split(',')
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}
