use std::sync::Arc;

use nedan_api::server::{AppState, start_server};
use nedan_catalog::pagination::{PagePolicy, install_page_policy};
use nedan_catalog::service::CatalogService;
use nedan_store::catalog::SqliteCatalogStore;
use tracing::{info, warn};

mod settings;
mod telemetry;

/// # Summary
/// 应用启动入口，纯粹的 DI 容器。
/// 负责实例化具体的存储实现并通过 Arc<dyn Trait> 注入到 CatalogService。
///
/// # Logic
/// 1. 加载分层配置并初始化全局日志。
/// 2. 安装进程级分页策略 (之后只读)。
/// 3. 实例化基础设施层 (SQLite 目录存储)。
/// 4. 构造应用服务层 (CatalogService)。
/// 5. 启动 HTTP 服务，直到收到退出信号。
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 配置与日志
    let config = settings::load_config()?;
    let _log_guard = telemetry::init_tracing(&config.log)?;
    info!("Nedan catalog starting...");

    // 2. 分页策略
    let policy = PagePolicy::from_config(&config.catalog)?;
    if !install_page_policy(policy) {
        warn!("Page policy already installed, keeping the existing one");
    }

    // 3. 基础设施层
    let store = Arc::new(SqliteCatalogStore::connect(&config.database).await?);

    // 4. 应用服务层
    let catalog = Arc::new(CatalogService::new(store.clone()));
    info!(
        "CatalogService initialized (page_size={}, max={})",
        catalog.policy().default_page_size,
        catalog.policy().max_page_size
    );

    // 5. 对外服务
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    start_server(AppState { catalog }, &bind_addr).await?;

    store.close().await;
    info!("Shutdown complete.");
    Ok(())
}
