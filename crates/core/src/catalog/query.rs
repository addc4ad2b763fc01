use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// # Summary
/// 目录视图的基础范围。
///
/// # Invariants
/// - `Category` / `Search` 中的字符串原样透传，不做大小写或空白归一化。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scope {
    /// 全部商品，不加过滤
    All,
    /// 按 `wishlist_name` 精确匹配
    Category(String),
    /// 对 `title` 或 `asin` 做大小写不敏感的子串匹配
    Search(String),
}

/// # Summary
/// 一个视图的完整过滤条件：基础范围 + 可组合的 "仅有货" 开关，多个条件之间为 AND。
///
/// # Invariants
/// - `InStockOnly` 即 `Scope::All` 且 `in_stock_only = true`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFilter {
    pub scope: Scope,
    pub in_stock_only: bool,
}

impl CatalogFilter {
    pub fn all() -> Self {
        Self {
            scope: Scope::All,
            in_stock_only: false,
        }
    }

    pub fn in_stock_only() -> Self {
        Self {
            scope: Scope::All,
            in_stock_only: true,
        }
    }

    pub fn by_category(name: impl Into<String>) -> Self {
        Self {
            scope: Scope::Category(name.into()),
            in_stock_only: false,
        }
    }

    pub fn search(term: impl Into<String>) -> Self {
        Self {
            scope: Scope::Search(term.into()),
            in_stock_only: false,
        }
    }

    /// 叠加 "仅有货" 条件。
    pub fn in_stock(mut self, in_stock_only: bool) -> Self {
        self.in_stock_only = in_stock_only;
        self
    }

    /// # Summary
    /// 是否需要排除价格为 0 (或缺失) 的商品。
    ///
    /// # Logic
    /// 仅在 "分类 + 仅有货" 组合下生效，用于屏蔽采集不完整的数据；
    /// 普通列表与搜索不受影响。
    pub fn excludes_unpriced(&self) -> bool {
        self.in_stock_only && matches!(self.scope, Scope::Category(_))
    }
}

/// # Summary
/// 结果排序方式，所有排序最终都以 `asin` 作为决胜键，保证分页稳定。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    /// 标题升序
    Title,
    /// `last_pricechange_percent` 升序 (降幅最大者在前，无调价记录者在后)
    PriceDrop,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "title" => Ok(SortOrder::Title),
            "price_drop" | "price-drop" => Ok(SortOrder::PriceDrop),
            _ => Err(format!("Unknown sort order: {}", s)),
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOrder::Title => write!(f, "title"),
            SortOrder::PriceDrop => write!(f, "price_drop"),
        }
    }
}

/// # Summary
/// 数据源查询窗口，对应 SQL 的 `LIMIT` / `OFFSET`。
///
/// # Invariants
/// - `limit > 0`，`offset >= 0`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub limit: i64,
    pub offset: i64,
}

/// # Summary
/// 已校验、有界的目录查询，由查询构建器产出，交由存储端口执行。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    pub filter: CatalogFilter,
    pub sort: SortOrder,
    pub window: Window,
}
