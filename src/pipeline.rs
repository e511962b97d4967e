use std::path::PathBuf;

use chrono::NaiveDateTime;
use tracing::{debug, info};

use crate::config::{Config, EXTRACTION_DATE_FORMAT, FILE_DATE_FORMAT, OUTPUT_FILE_PREFIX};
use crate::csv_sink::CsvWriter;
use crate::db::ProductTableWriter;
use crate::error::Result;
use crate::extractor::extract_row;
use crate::fetcher::{FetchOutcome, ListingFetcher};
use crate::pacing::Pacer;
use crate::types::ProductRow;

/// Everything fixed for the lifetime of one run: the timestamp stamped on
/// every row and the two output files.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub extraction_date: String,
    pub db_path: PathBuf,
    pub csv_path: PathBuf,
}

impl RunContext {
    pub fn new(cfg: &Config, started_at: NaiveDateTime) -> Self {
        let stem = format!("{OUTPUT_FILE_PREFIX}{}", started_at.format(FILE_DATE_FORMAT));
        Self {
            extraction_date: started_at.format(EXTRACTION_DATE_FORMAT).to_string(),
            db_path: cfg.output_dir.join(format!("{stem}.db")),
            csv_path: cfg.output_dir.join(format!("{stem}.csv")),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub shops_total: usize,
    /// Rows written to each sink.
    pub records: usize,
    /// Shops that returned at least one listing.
    pub scraped: usize,
    /// Shops answered with no sections or an empty item list.
    pub empty: usize,
    /// Shops skipped on a non-200 status or a failed request.
    pub failed: usize,
}

impl RunSummary {
    /// Every shop that did not yield listings, whatever the reason.
    pub fn shops_without_stock(&self) -> usize {
        self.shops_total - self.scraped
    }

    fn record_skip(&mut self, outcome: &FetchOutcome) {
        match outcome {
            FetchOutcome::NoItems | FetchOutcome::NoSections => self.empty += 1,
            FetchOutcome::BadStatus(_) | FetchOutcome::Failed(_) => self.failed += 1,
            FetchOutcome::Listings(_) => {}
        }
    }

    pub fn log(&self, ctx: &RunContext) {
        info!("Total of {} records has been extracted.", self.records);
        info!("Total number of shop scraped: {}", self.scraped);
        info!(
            empty = self.empty,
            failed = self.failed,
            "Total number of shop that has no stocks: {}",
            self.shops_without_stock()
        );
        info!("Check your extracted data on {}.", ctx.db_path.display());
    }
}

/// One pass over the shop ids: fetch, flatten, write both sinks, pace.
pub struct Run {
    ctx: RunContext,
    fetcher: ListingFetcher,
    table: ProductTableWriter,
    csv: CsvWriter,
    pacer: Pacer,
}

impl Run {
    /// Opens both sinks. The table and the CSV file are recreated empty.
    pub async fn start(cfg: &Config, ctx: RunContext) -> Result<Self> {
        std::fs::create_dir_all(&cfg.output_dir)?;
        let table = ProductTableWriter::open(&ctx.db_path).await?;
        let csv = CsvWriter::create(&ctx.csv_path)?;
        info!(
            extraction_date = %ctx.extraction_date,
            db = %table.path().display(),
            csv = %csv.path().display(),
            "Run started"
        );

        Ok(Self {
            fetcher: ListingFetcher::new(cfg)?,
            pacer: Pacer::from_interval(cfg.rate_limit),
            ctx,
            table,
            csv,
        })
    }

    pub async fn execute(mut self, shop_ids: &[String]) -> Result<RunSummary> {
        let mut summary = RunSummary {
            shops_total: shop_ids.len(),
            ..Default::default()
        };

        for shop_id in shop_ids {
            let items = match self.fetcher.fetch(shop_id).await {
                FetchOutcome::Listings(items) => items,
                skipped => {
                    debug!(shop_id = %shop_id, outcome = skipped.label(), "shop skipped");
                    summary.record_skip(&skipped);
                    continue;
                }
            };

            let rows: Vec<ProductRow> = items
                .iter()
                .map(|item| extract_row(item, &self.ctx.extraction_date))
                .collect();
            self.table.append(&rows).await?;
            self.csv.append(&rows)?;
            info!(
                shop_id = %shop_id,
                items = rows.len(),
                "{} items have been written to {}. {shop_id}",
                rows.len(),
                self.ctx.db_path.display()
            );

            summary.records += rows.len();
            summary.scraped += 1;

            self.pacer.wait().await;
        }

        self.table.close().await;
        self.csv.close()?;
        Ok(summary)
    }
}
