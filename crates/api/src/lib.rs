//! # `nedan-api` - HTTP API 网关
//!
//! 本 crate 是 Nedan 商品目录的 HTTP/REST 服务入口。
//! 使用 `axum` 构建路由与控制器，通过 `utoipa` 自动生成 OpenAPI 3.0 Swagger 文档。
//!
//! ## 架构职责
//! - 接收浏览器首屏渲染与无限滚动增量拉取的 HTTP 请求
//! - 解析查询参数并调用下层 `CatalogService`
//! - 将领域模型转换为 DTO 返回给前端
//! - 区分 "没有结果" (200 + 空列表) 与 "查询失败" (4xx/5xx)

pub mod error;
pub mod server;
pub mod types;

pub mod routes {
    pub mod categories;
    pub mod health;
    pub mod products;
    pub mod search;
}
