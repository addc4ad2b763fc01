//! # `nedan-store` - 目录存储适配器
//!
//! 基于 `sqlx` + SQLite 实现 `nedan-core` 中定义的 `CatalogStore` 端口。
//! 所有过滤条件经由 `sql` 模块渲染为参数化语句。

pub mod catalog;
pub(crate) mod sql;

#[cfg(any(test, feature = "test-utils"))]
pub mod fixtures;
