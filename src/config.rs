use std::path::PathBuf;
use std::time::Duration;

use crate::error::{AppError, Result};

pub const LISTINGS_API_URL: &str = "https://shopee.ph/api/v4/recommend/recommend";

/// Recommendation bundle that backs a shop's "products" tab.
pub const BUNDLE: &str = "shop_page_product_tab_main";
pub const SECTION: &str = "shop_page_product_tab_main_sec";

/// Single fixed-size page per shop. Listings past this are never requested.
pub const PAGE_LIMIT: u32 = 999;
pub const PAGE_OFFSET: u32 = 0;

/// Listing prices are fixed-point integers scaled by this factor.
pub const PRICE_SCALE: f64 = 100_000.0;

pub const SHOP_ID_FILE: &str = "booze_shop_id.csv";
pub const OUTPUT_FILE_PREFIX: &str = "product_raw_data_";

/// Format of the `extraction_date` column stamped on every row.
pub const EXTRACTION_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Format of the date suffix in output file names.
pub const FILE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Rows per INSERT statement. 26 binds each keeps a statement well under
/// SQLite's 32766 host-parameter limit.
pub const MAX_ROWS_PER_INSERT: usize = 1000;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub log_level: String,
    /// File listing one shop id per line (SHOP_ID_FILE)
    pub shop_id_file: PathBuf,
    /// Directory receiving the .db and .csv outputs (OUTPUT_DIR)
    pub output_dir: PathBuf,
    /// Pause after every shop that yielded listings (RATE_LIMIT_SECS)
    pub rate_limit: Duration,
    /// Per-request timeout (REQUEST_TIMEOUT_SECS). Unset leaves the client default.
    pub request_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_url: std::env::var("LISTINGS_API_URL")
                .unwrap_or_else(|_| LISTINGS_API_URL.to_string()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            shop_id_file: std::env::var("SHOP_ID_FILE")
                .unwrap_or_else(|_| SHOP_ID_FILE.to_string())
                .into(),
            output_dir: std::env::var("OUTPUT_DIR")
                .unwrap_or_else(|_| ".".to_string())
                .into(),
            rate_limit: Duration::from_secs(
                std::env::var("RATE_LIMIT_SECS")
                    .unwrap_or_else(|_| "5".to_string())
                    .parse::<u64>()
                    .map_err(|_| {
                        AppError::Config("RATE_LIMIT_SECS must be a whole number of seconds".to_string())
                    })?,
            ),
            request_timeout: match std::env::var("REQUEST_TIMEOUT_SECS") {
                Ok(raw) => Some(Duration::from_secs(raw.parse::<u64>().map_err(|_| {
                    AppError::Config("REQUEST_TIMEOUT_SECS must be a whole number of seconds".to_string())
                })?)),
                Err(_) => None,
            },
        })
    }
}
