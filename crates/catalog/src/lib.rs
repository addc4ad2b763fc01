//! # `nedan-catalog` - 目录查询与价格历史重建
//!
//! 无状态的只读业务层：把视图请求构建为有界查询、把原始行投影为摘要/详情、
//! 并把三类价格来源合并为一条按时间排序的价格序列。
//! 对外只暴露 [`service::CatalogService`] 门面，具体存储通过 `CatalogStore` 注入。

pub mod history;
pub mod pagination;
pub mod projector;
pub mod query;
pub mod service;
