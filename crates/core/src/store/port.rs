use super::error::StoreError;
use crate::catalog::entity::{Product, ProductHistory};
use crate::catalog::query::{CatalogFilter, CatalogQuery};
use async_trait::async_trait;

/// # Summary
/// 商品目录的只读存储接口。数据由外部采集进程写入，核心层只读不写。
///
/// # Invariants
/// - 所有用户输入的值必须以绑定参数的形式到达数据库，禁止拼接进 SQL 文本。
/// - 每次调用独立获取连接，并保证在任何退出路径 (包括错误) 上归还。
/// - 实现者不得吞掉错误返回空结果。
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// # Summary
    /// 按查询条件读取一页商品行。
    ///
    /// # Logic
    /// 1. 将过滤条件渲染为参数化的 WHERE 子句。
    /// 2. 按排序键 + `asin` 决胜键排序。
    /// 3. 应用 `LIMIT` / `OFFSET` 窗口。
    ///
    /// # Arguments
    /// * `query`: 已校验的目录查询。
    ///
    /// # Returns
    /// 当前窗口内的原始商品行。
    async fn fetch_products(&self, query: &CatalogQuery) -> Result<Vec<Product>, StoreError>;

    /// # Summary
    /// 统计满足过滤条件的商品总数，用于首屏分页信息。
    ///
    /// # Arguments
    /// * `filter`: 与 `fetch_products` 相同的过滤条件。
    ///
    /// # Returns
    /// 商品总数。
    async fn count_products(&self, filter: &CatalogFilter) -> Result<u64, StoreError>;

    /// # Summary
    /// 读取单个商品及其全部调价事件。
    ///
    /// # Logic
    /// 在同一个请求级连接上依次执行两次查询；商品不存在时不再查询历史。
    ///
    /// # Arguments
    /// * `asin`: 商品标识。
    ///
    /// # Returns
    /// 存在返回 `Some(ProductHistory)`，否则返回 `None`。事件顺序不做保证。
    async fn product_with_history(&self, asin: &str)
        -> Result<Option<ProductHistory>, StoreError>;

    /// # Summary
    /// 列出所有分类 (去重、升序)。
    async fn list_categories(&self) -> Result<Vec<String>, StoreError>;

    /// 执行一次最小往返以确认存储可达。
    async fn health_check(&self) -> Result<(), StoreError>;
}
