mod config;
mod csv_sink;
mod db;
mod error;
mod extractor;
mod fetcher;
mod pacing;
mod pipeline;
mod shop_ids;
mod types;
mod user_agent;

use chrono::Local;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::pipeline::{Run, RunContext};
use crate::shop_ids::{load_shop_ids, ShopIds};

#[tokio::main]
async fn main() {
    let cfg = Config::from_env().unwrap_or_else(|e| {
        eprintln!("Config error: {e}");
        std::process::exit(1);
    });
    init_logging(&cfg.log_level);

    if let Err(e) = scrape(cfg).await {
        error!("Scrape aborted: {e}");
        std::process::exit(1);
    }
}

fn init_logging(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .init();
}

async fn scrape(cfg: Config) -> Result<()> {
    let shop_ids = load_shop_ids(&cfg.shop_id_file);
    report_shop_ids(&cfg, &shop_ids);

    let ctx = RunContext::new(&cfg, Local::now().naive_local());
    let summary = Run::start(&cfg, ctx.clone())
        .await?
        .execute(&shop_ids.ids)
        .await?;
    summary.log(&ctx);

    Ok(())
}

fn report_shop_ids(cfg: &Config, shop_ids: &ShopIds) {
    match &shop_ids.read_error {
        Some(e @ AppError::ShopIdsNotFound(_)) => error!("{e}"),
        Some(e) => warn!(
            kept = shop_ids.ids.len(),
            "An error occurred: {e}. Continuing with the ids read so far."
        ),
        None => {}
    }
    info!("Loaded {} shop ids from {}", shop_ids.ids.len(), cfg.shop_id_file.display());
}
