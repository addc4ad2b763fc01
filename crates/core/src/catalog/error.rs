use crate::store::error::StoreError;
use thiserror::Error;

/// # Summary
/// 目录查询域的统一错误类型，调用方 (HTTP 层) 可一一映射为响应状态。
///
/// # Invariants
/// - 存储失败永远以 `StoreUnavailable` 上抛，绝不折叠为空结果集。
/// - 本层不做任何重试。
#[derive(Error, Debug)]
pub enum CatalogError {
    /// 调用方输入非法：空分类名、空搜索词、未知排序、非正的分页大小等
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
    /// 请求的商品不存在
    #[error("Not found: {0}")]
    NotFound(String),
    /// 存储不可达或语句执行失败
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
}
