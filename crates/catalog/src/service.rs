use nedan_core::catalog::entity::{
    Listing, PriceDropSummary, PriceSeries, Product, ProductHistory, ProductSummary, ProductView,
};
use nedan_core::catalog::error::CatalogError;
use nedan_core::catalog::query::SortOrder;
use nedan_core::store::port::CatalogStore;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::history::reconstruct_series;
use crate::pagination::{FetchMode, PagePolicy, page_count, page_policy};
use crate::projector;
use crate::query::{ViewSpec, build_query};

/// # Summary
/// `CatalogService` 是目录读取链路的唯一入口：
/// 查询构建 → 存储执行 → 结果投影 → (详情) 价格历史重建。
///
/// # Invariants
/// - 只读，无跨请求可变状态。
/// - 存储故障一律以 `StoreUnavailable` 上抛，绝不降级为空列表。
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
    policy: PagePolicy,
}

impl CatalogService {
    /// 使用进程级分页策略创建服务。
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            store,
            policy: page_policy(),
        }
    }

    /// 使用指定分页策略创建服务 (测试或多实例部署)。
    pub fn with_policy(store: Arc<dyn CatalogStore>, policy: PagePolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> PagePolicy {
        self.policy
    }

    /// # Summary
    /// 列表 / 分类 / 搜索视图。
    ///
    /// # Arguments
    /// * `view` - 视图请求。
    /// * `mode` - 首屏模式附带总数，增量模式跳过计数查询。
    ///
    /// # Returns
    /// * `Result<Listing<ProductSummary>, CatalogError>` - 当前窗口的商品摘要。
    pub async fn list(
        &self,
        view: &ViewSpec,
        mode: FetchMode,
    ) -> Result<Listing<ProductSummary>, CatalogError> {
        self.fetch_page(view, mode, projector::summary).await
    }

    /// "近期最大降价" 视图，排序固定为降价百分比升序。
    pub async fn list_price_drops(
        &self,
        view: &ViewSpec,
        mode: FetchMode,
    ) -> Result<Listing<PriceDropSummary>, CatalogError> {
        let view = view.clone().sort(SortOrder::PriceDrop);
        self.fetch_page(&view, mode, projector::price_drop_summary).await
    }

    /// # Logic
    /// 1. 构建有界查询 (校验失败直接返回 `InvalidQuery`，不触达存储)。
    /// 2. 拉取窗口数据。
    /// 3. 仅首屏模式执行计数查询；两种模式共用同一个过滤条件。
    /// 4. 投影为调用方需要的记录形态。
    async fn fetch_page<T>(
        &self,
        view: &ViewSpec,
        mode: FetchMode,
        project: fn(Product) -> T,
    ) -> Result<Listing<T>, CatalogError> {
        let query = build_query(view, &self.policy)
            .inspect_err(|e| warn!("Rejected view {:?}: {}", view, e))?;
        let page = view.page.max(1);

        let rows = self.store.fetch_products(&query).await.map_err(|e| {
            warn!("Catalog fetch failed for {:?}: {}", query.filter, e);
            CatalogError::from(e)
        })?;

        let (total, pages) = match mode {
            FetchMode::Initial => {
                let total = self.store.count_products(&query.filter).await.map_err(|e| {
                    warn!("Catalog count failed for {:?}: {}", query.filter, e);
                    CatalogError::from(e)
                })?;
                (Some(total), Some(page_count(total, query.window.limit)))
            }
            FetchMode::Incremental => (None, None),
        };

        debug!(
            "Listed {} rows (page={}, size={}, mode={:?}, total={:?})",
            rows.len(),
            page,
            query.window.limit,
            mode,
            total
        );

        Ok(Listing {
            items: rows.into_iter().map(project).collect(),
            page,
            page_size: query.window.limit,
            total,
            page_count: pages,
        })
    }

    /// # Summary
    /// 单品详情视图：详情记录 + 重建后的价格序列。
    ///
    /// # Logic
    /// 1. 校验 `asin` 非空。
    /// 2. 在同一连接内读取商品行与全部调价事件。
    /// 3. 商品不存在时返回 `NotFound`，不返回空序列。
    /// 4. 重建价格序列并投影详情。
    pub async fn product_view(&self, asin: &str) -> Result<ProductView, CatalogError> {
        let history = self.load_history(asin).await?;
        let series = reconstruct_series(&history.product, history.events);
        Ok(ProductView {
            detail: projector::detail(history.product),
            series,
        })
    }

    /// 仅重建价格序列。
    pub async fn reconstruct(&self, asin: &str) -> Result<PriceSeries, CatalogError> {
        let history = self.load_history(asin).await?;
        Ok(reconstruct_series(&history.product, history.events))
    }

    async fn load_history(&self, asin: &str) -> Result<ProductHistory, CatalogError> {
        if asin.is_empty() {
            return Err(CatalogError::InvalidQuery("asin must not be empty".to_string()));
        }

        let history = self.store.product_with_history(asin).await.map_err(|e| {
            warn!("History fetch failed for {}: {}", asin, e);
            CatalogError::from(e)
        })?;

        match history {
            Some(h) => {
                debug!("Loaded {} with {} price events", asin, h.events.len());
                Ok(h)
            }
            None => Err(CatalogError::NotFound(format!("product {}", asin))),
        }
    }

    /// 全部分类名，按字母序。
    pub async fn categories(&self) -> Result<Vec<String>, CatalogError> {
        Ok(self.store.list_categories().await?)
    }

    /// 存储连通性检查。
    pub async fn health(&self) -> Result<(), CatalogError> {
        Ok(self.store.health_check().await?)
    }
}
