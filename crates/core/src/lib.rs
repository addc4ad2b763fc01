//! # `nedan-core` - 领域核心
//!
//! 定义商品目录的实体、查询模型、存储端口 (Port) 与错误类型。
//! 本 crate 不包含任何 I/O 实现，具体存储由 `nedan-store` 提供，
//! 业务编排由 `nedan-catalog` 完成。

pub mod catalog {
    pub mod entity;
    pub mod error;
    pub mod query;
}

pub mod store {
    pub mod error;
    pub mod port;
}

pub mod config;
