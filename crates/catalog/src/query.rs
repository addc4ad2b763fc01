//! # 查询构建器
//!
//! 把视图请求 (范围 + 排序 + 页码) 校验并转换为有界的 [`CatalogQuery`]。

use nedan_core::catalog::error::CatalogError;
use nedan_core::catalog::query::{CatalogFilter, CatalogQuery, Scope, SortOrder};

use crate::pagination::{PagePolicy, compute_window};

/// # Summary
/// 一次目录视图请求。
///
/// # Invariants
/// - `page_size` 为 `None` 时使用分页策略的默认值。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSpec {
    pub filter: CatalogFilter,
    pub sort: SortOrder,
    pub page: i64,
    pub page_size: Option<i64>,
}

impl ViewSpec {
    /// 以标题排序、第 1 页、默认页大小创建视图。
    pub fn new(filter: CatalogFilter) -> Self {
        Self {
            filter,
            sort: SortOrder::Title,
            page: 1,
            page_size: None,
        }
    }

    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }

    pub fn page_size(mut self, page_size: Option<i64>) -> Self {
        self.page_size = page_size;
        self
    }
}

/// # Summary
/// 构建有界目录查询。
///
/// # Logic
/// 1. 校验过滤条件：分类名与搜索词不能为空串，其余原样透传。
/// 2. 通过分页策略解析每页条数 (非正数报错，超限截断)。
/// 3. 计算窗口 (页码小于 1 按 1 处理)。
///
/// # Arguments
/// * `view` - 视图请求。
/// * `policy` - 分页策略。
///
/// # Returns
/// * `Result<CatalogQuery, CatalogError>` - 查询或 `InvalidQuery`。
pub fn build_query(view: &ViewSpec, policy: &PagePolicy) -> Result<CatalogQuery, CatalogError> {
    validate_filter(&view.filter)?;
    let page_size = policy.resolve_page_size(view.page_size)?;
    let window = compute_window(view.page, page_size)?;

    Ok(CatalogQuery {
        filter: view.filter.clone(),
        sort: view.sort,
        window,
    })
}

fn validate_filter(filter: &CatalogFilter) -> Result<(), CatalogError> {
    match &filter.scope {
        Scope::All => Ok(()),
        Scope::Category(name) if name.is_empty() => Err(CatalogError::InvalidQuery(
            "category name must not be empty".to_string(),
        )),
        Scope::Search(term) if term.is_empty() => Err(CatalogError::InvalidQuery(
            "search term must not be empty".to_string(),
        )),
        Scope::Category(_) | Scope::Search(_) => Ok(()),
    }
}
