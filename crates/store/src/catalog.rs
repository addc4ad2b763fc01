use async_trait::async_trait;
use chrono::{DateTime, Utc};
use nedan_core::catalog::entity::{PriceHistoryEvent, Product, ProductHistory};
use nedan_core::catalog::query::{CatalogFilter, CatalogQuery};
use nedan_core::config::DatabaseConfig;
use nedan_core::store::error::StoreError;
use nedan_core::store::port::CatalogStore;
use sqlx::{
    FromRow, SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use crate::sql::{self, PRODUCT_COLUMNS};

/// `products` 表的原始行，列名与表结构一一对应。
#[derive(Debug, FromRow)]
struct ProductRow {
    asin: String,
    title: String,
    subtitle: Option<String>,
    pattern: Option<String>,
    style: Option<String>,
    image_url: Option<String>,
    product_link: Option<String>,
    affiliate_link: Option<String>,
    price: Option<f64>,
    price_added: Option<f64>,
    stock_status: Option<String>,
    reviews: Option<i64>,
    stars: Option<f64>,
    date_added: Option<DateTime<Utc>>,
    last_checkdate: Option<DateTime<Utc>>,
    last_pricechange: Option<f64>,
    last_pricechange_percent: Option<f64>,
    wishlist_name: Option<String>,
}

impl From<ProductRow> for Product {
    fn from(r: ProductRow) -> Self {
        Self {
            asin: r.asin,
            title: r.title,
            subtitle: r.subtitle,
            pattern: r.pattern,
            style: r.style,
            image_url: r.image_url,
            product_link: r.product_link,
            affiliate_link: r.affiliate_link,
            price: r.price,
            price_added: r.price_added,
            stock_status: r.stock_status,
            reviews: r.reviews,
            stars: r.stars,
            date_added: r.date_added,
            last_checkdate: r.last_checkdate,
            last_pricechange: r.last_pricechange,
            last_pricechange_percent: r.last_pricechange_percent,
            wishlist_name: r.wishlist_name,
        }
    }
}

/// 将 sqlx 错误归类为连接类或语句类存储错误。
fn map_sqlx_err(e: sqlx::Error) -> StoreError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StoreError::Connection(e.to_string())
        }
        other => StoreError::Database(other.to_string()),
    }
}

/// CatalogStore 的 SQLite 实现。
///
/// # Summary
/// 通过共享的 `SqlitePool` 只读访问 `products` 与 `price_history` 两张表。
///
/// # Invariants
/// * 每个端口方法只在自身作用域内持有连接，返回时 (含错误路径) 自动归还连接池。
/// * 不执行任何写操作；`init_schema` 只建结构。
pub struct SqliteCatalogStore {
    pool: SqlitePool,
}

impl SqliteCatalogStore {
    /// 根据数据库配置创建连接池。
    ///
    /// # Logic
    /// 1. `init_schema` 开启时确保数据库所在目录存在，并允许创建数据库文件。
    /// 2. 按配置的连接数与获取超时建立连接池，每个连接注册 `REGEXP` 函数供搜索使用。
    /// 3. `init_schema` 开启时执行幂等建表。
    ///
    /// # Arguments
    /// * `config` - 数据库配置。
    ///
    /// # Returns
    /// * `Result<Self, StoreError>` - 存储实例或错误。
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let db_path = Path::new(&config.path);
        if config.init_schema {
            if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| StoreError::InitError(e.to_string()))?;
            }
        }

        info!(
            path = %config.path,
            max_connections = config.max_connections,
            "Connecting to catalog database"
        );

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(config.init_schema)
            .with_regexp();

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let store = Self { pool };
        if config.init_schema {
            store.init_schema().await?;
        }
        Ok(store)
    }

    /// 使用已有连接池构建存储。连接池须以 `with_regexp()` 建立，否则搜索会失败。
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 幂等地创建 `products` / `price_history` 表及索引。
    pub async fn init_schema(&self) -> Result<(), StoreError> {
        sqlx::raw_sql(sql::SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::InitError(e.to_string()))?;
        info!("Catalog schema ensured");
        Ok(())
    }

    /// 获取内部连接池引用。
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// 关闭连接池。
    pub async fn close(&self) {
        info!("Closing catalog database pool");
        self.pool.close().await;
    }
}

#[async_trait]
impl CatalogStore for SqliteCatalogStore {
    async fn fetch_products(&self, query: &CatalogQuery) -> Result<Vec<Product>, StoreError> {
        let mut qb = sql::select_products(query);
        debug!(sql = qb.sql(), ?query, "fetch_products");

        let rows = qb
            .build_query_as::<ProductRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_err)?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn count_products(&self, filter: &CatalogFilter) -> Result<u64, StoreError> {
        let mut qb = sql::count_products(filter);
        debug!(sql = qb.sql(), ?filter, "count_products");

        let count: i64 = qb
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_err)?;

        u64::try_from(count).map_err(|e| StoreError::Database(e.to_string()))
    }

    /// # Summary
    /// 读取单个商品及其调价事件。
    ///
    /// # Logic
    /// 1. 从连接池获取一个连接，作用域结束时自动归还。
    /// 2. 查询商品行；不存在则直接返回 `None`。
    /// 3. 在同一连接上查询该商品的全部调价事件。
    async fn product_with_history(
        &self,
        asin: &str,
    ) -> Result<Option<ProductHistory>, StoreError> {
        let mut conn = self.pool.acquire().await.map_err(map_sqlx_err)?;

        let select_product = format!("SELECT {} FROM products WHERE asin = ?", PRODUCT_COLUMNS);
        let row = sqlx::query_as::<_, ProductRow>(&select_product)
            .bind(asin)
            .fetch_optional(&mut *conn)
            .await
            .map_err(map_sqlx_err)?;

        let Some(row) = row else {
            debug!(asin, "product not found");
            return Ok(None);
        };

        let events = sqlx::query_as::<_, (String, f64, DateTime<Utc>)>(
            r#"
            SELECT asin, price, updated_at
            FROM price_history
            WHERE asin = ?
            ORDER BY updated_at ASC
            "#,
        )
        .bind(asin)
        .fetch_all(&mut *conn)
        .await
        .map_err(map_sqlx_err)?;

        debug!(asin, events = events.len(), "loaded price history");

        Ok(Some(ProductHistory {
            product: row.into(),
            events: events
                .into_iter()
                .map(|r| PriceHistoryEvent {
                    asin: r.0,
                    price: r.1,
                    updated_at: r.2,
                })
                .collect(),
        }))
    }

    async fn list_categories(&self) -> Result<Vec<String>, StoreError> {
        sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT wishlist_name
            FROM products
            WHERE wishlist_name IS NOT NULL AND wishlist_name <> ''
            ORDER BY wishlist_name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_err)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_err)?;
        Ok(())
    }
}
