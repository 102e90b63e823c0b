pub mod config;
pub mod stooq;

pub use config::Config;
pub use stooq::{parse_daily_csv, FetchError, StooqClient};
