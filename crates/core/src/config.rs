use serde::{Deserialize, Serialize};

/// 全局应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub catalog: CatalogConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    // SQLite 数据库文件路径
    pub path: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    // 首次部署时是否建表 (仅结构，不写数据)
    pub init_schema: bool,
}

/// 分页策略配置，启动后只读。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub default_page_size: i64,
    pub max_page_size: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    // RUST_LOG 未设置时使用的过滤级别
    pub level: String,
    // 滚动日志目录，为空则只输出到标准输出
    pub dir: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                path: "data/catalog.db".to_string(),
                max_connections: 8,
                acquire_timeout_secs: 5,
                init_schema: false,
            },
            catalog: CatalogConfig {
                default_page_size: 20,
                max_page_size: 100,
            },
            log: LogConfig {
                level: "info".to_string(),
                dir: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.path, "data/catalog.db");
        assert!(!config.database.init_schema);
        assert_eq!(config.catalog.default_page_size, 20);
        assert_eq!(config.catalog.max_page_size, 100);
        assert_eq!(config.log.level, "info");
    }
}
