//! # 分页策略
//!
//! 全进程共享的分页大小配置、窗口计算，以及首屏 / 增量两种拉取模式的约定。

use nedan_core::catalog::error::CatalogError;
use nedan_core::catalog::query::Window;
use nedan_core::config::CatalogConfig;
use std::str::FromStr;
use std::sync::OnceLock;

/// 默认每页条数
pub const DEFAULT_PAGE_SIZE: i64 = 20;
/// 单次请求允许的最大每页条数
pub const MAX_PAGE_SIZE: i64 = 100;

static PAGE_POLICY: OnceLock<PagePolicy> = OnceLock::new();

/// # Summary
/// 分页策略，启动时从配置安装一次，之后只读。
///
/// # Invariants
/// - `0 < default_page_size <= max_page_size`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePolicy {
    pub default_page_size: i64,
    pub max_page_size: i64,
}

impl Default for PagePolicy {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

impl PagePolicy {
    /// 从配置构建并校验分页策略。
    pub fn from_config(config: &CatalogConfig) -> Result<Self, CatalogError> {
        if config.default_page_size <= 0 || config.max_page_size < config.default_page_size {
            return Err(CatalogError::InvalidQuery(format!(
                "invalid page policy: default={} max={}",
                config.default_page_size, config.max_page_size
            )));
        }
        Ok(Self {
            default_page_size: config.default_page_size,
            max_page_size: config.max_page_size,
        })
    }

    /// # Summary
    /// 解析单次请求的每页条数。
    ///
    /// # Logic
    /// 1. 未指定时使用默认值。
    /// 2. 非正数视为非法输入。
    /// 3. 超过上限时截断为上限。
    pub fn resolve_page_size(&self, requested: Option<i64>) -> Result<i64, CatalogError> {
        match requested {
            None => Ok(self.default_page_size),
            Some(size) if size <= 0 => Err(CatalogError::InvalidQuery(format!(
                "page_size must be positive, got {}",
                size
            ))),
            Some(size) => Ok(size.min(self.max_page_size)),
        }
    }
}

/// 安装进程级分页策略。只有第一次调用生效，返回本次是否生效。
pub fn install_page_policy(policy: PagePolicy) -> bool {
    PAGE_POLICY.set(policy).is_ok()
}

/// 当前生效的分页策略，未安装时返回默认值。
pub fn page_policy() -> PagePolicy {
    PAGE_POLICY.get().copied().unwrap_or_default()
}

/// # Summary
/// 计算查询窗口。
///
/// # Logic
/// 1. `page < 1` 一律按第 1 页处理，偏移量永不为负。
/// 2. `offset = (page - 1) * page_size`，溢出时饱和。
///
/// # Arguments
/// * `page` - 页码 (从 1 开始)。
/// * `page_size` - 每页条数，必须为正。
///
/// # Returns
/// * `Result<Window, CatalogError>` - 窗口或 `InvalidQuery`。
pub fn compute_window(page: i64, page_size: i64) -> Result<Window, CatalogError> {
    if page_size <= 0 {
        return Err(CatalogError::InvalidQuery(format!(
            "page_size must be positive, got {}",
            page_size
        )));
    }
    let page = page.max(1);
    Ok(Window {
        limit: page_size,
        offset: (page - 1).saturating_mul(page_size),
    })
}

/// 根据总数计算页数。
pub fn page_count(total: u64, page_size: i64) -> u64 {
    match u64::try_from(page_size) {
        Ok(size) if size > 0 => total.div_ceil(size),
        _ => 0,
    }
}

/// # Summary
/// 列表拉取模式。
///
/// # Invariants
/// - 两种模式共享完全相同的过滤与排序逻辑，避免首屏与后续页结果漂移。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// 首屏渲染：返回窗口数据 + 总数 (用于计算页数)
    Initial,
    /// 无限滚动的增量拉取：只返回窗口数据，跳过计数查询
    Incremental,
}

impl FromStr for FetchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "initial" => Ok(FetchMode::Initial),
            "incremental" => Ok(FetchMode::Incremental),
            _ => Err(format!("Unknown fetch mode: {}", s)),
        }
    }
}
