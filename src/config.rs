//! Runtime settings read from the environment (after `.env` is loaded).

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PRODUCT_URL: &str = "http://localhost:4200/api/products/product.json";
const DEFAULT_TICK_MS: u64 = 250;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub product_url: String,
    pub log_dir: PathBuf,
    pub tick_rate: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let product_url = lookup("PRODUCT_API_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PRODUCT_URL.to_string());

        let log_dir = lookup("PRODUCT_LIST_LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(std::env::temp_dir);

        let tick_ms = lookup("PRODUCT_LIST_TICK_MS")
            .and_then(|ms| ms.parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_TICK_MS);

        Self {
            product_url,
            log_dir,
            tick_rate: Duration::from_millis(tick_ms),
        }
    }
}
