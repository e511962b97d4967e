use std::path::{Path, PathBuf};

use sqlx::query_builder::Separated;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, info};

use crate::config::MAX_ROWS_PER_INSERT;
use crate::error::Result;
use crate::types::{Cell, ProductRow, PRODUCT_COLUMNS};

const DROP_PRODUCTS: &str = "DROP TABLE IF EXISTS Products";

const CREATE_PRODUCTS: &str = r#"
CREATE TABLE IF NOT EXISTS Products (
    "product_name" TEXT,
    "current_stock" INTEGER,
    "shop_name" TEXT,
    "shop_id" INTEGER,
    "brand" TEXT,
    "unique_item_id" INTEGER,
    "sold_per_month" INTEGER,
    "historical_sold" INTEGER,
    "liked_count" INTEGER,
    "variation_type" TEXT,
    "variation" TEXT,
    "current_price" REAL,
    "min_price" REAL,
    "max_price" REAL,
    "lowest_price_guarantee" TEXT,
    "current_discount_percentage" INTEGER,
    "rating_star" INTEGER,
    "shopee_verified" TEXT,
    "official_shop" TEXT,
    "cc_installment" TEXT,
    "none_cc_installment" TEXT,
    "preferred_seller" TEXT,
    "shop_location" TEXT,
    "shop_rating" INTEGER,
    "cod" TEXT,
    "extraction_date" DATETIME
)
"#;

/// The `Products` table of one run's database file.
///
/// `open` replaces any table left by an earlier run on the same file, then
/// batches are appended until `close`.
pub struct ProductTableWriter {
    pool: SqlitePool,
    path: PathBuf,
}

impl ProductTableWriter {
    pub async fn open(path: &Path) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        sqlx::query(DROP_PRODUCTS).execute(&pool).await?;
        sqlx::query(CREATE_PRODUCTS).execute(&pool).await?;
        info!("Database ready at {}", path.display());

        Ok(Self { pool, path: path.to_path_buf() })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Insert a batch in one transaction, chunked into multi-row INSERTs.
    pub async fn append(&self, rows: &[ProductRow]) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;
        for chunk in rows.chunks(MAX_ROWS_PER_INSERT) {
            let mut builder = QueryBuilder::<Sqlite>::new(insert_prefix());
            builder.push_values(chunk, |mut b, row| {
                for cell in row.cells() {
                    push_cell(&mut b, cell);
                }
            });
            builder.build().execute(&mut *tx).await?;
        }
        tx.commit().await?;

        debug!(rows = rows.len(), "appended to Products");
        Ok(())
    }

    pub async fn close(self) {
        self.pool.close().await;
    }
}

fn insert_prefix() -> String {
    let columns = PRODUCT_COLUMNS
        .iter()
        .map(|c| format!("\"{c}\""))
        .collect::<Vec<_>>()
        .join(", ");
    format!("INSERT INTO Products ({columns}) ")
}

fn push_cell(b: &mut Separated<'_, '_, Sqlite, &'static str>, cell: Cell) {
    match cell {
        Cell::Null => b.push_bind(None::<String>),
        Cell::Integer(i) => b.push_bind(i),
        Cell::Real(r) => b.push_bind(r),
        Cell::Text(s) => b.push_bind(s),
        Cell::Bool(v) => b.push_bind(v),
    };
}
