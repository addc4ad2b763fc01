use config::{Config, ConfigError, Environment, File};
use nedan_core::config::AppConfig;

/// 配置文件路径 (不含扩展名)，可通过 `NEDAN_CONFIG` 覆盖
const DEFAULT_CONFIG_PATH: &str = "config/nedan";

/// # Summary
/// 加载分层配置。
///
/// # Logic
/// 1. 以 `AppConfig::default()` 作为最底层。
/// 2. 叠加可选的配置文件 (`NEDAN_CONFIG` 或 `config/nedan.toml`)。
/// 3. 叠加 `NEDAN__` 前缀的环境变量，层级以 `__` 分隔，如 `NEDAN__SERVER__PORT=9000`。
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let path = std::env::var("NEDAN_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    load_from(&path, true)
}

/// 从指定文件加载，`with_env` 控制是否叠加环境变量层。
pub fn load_from(path: &str, with_env: bool) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder()
        .add_source(Config::try_from(&AppConfig::default())?)
        .add_source(File::with_name(path).required(false));

    if with_env {
        builder = builder.add_source(
            Environment::with_prefix("NEDAN")
                .separator("__")
                .try_parsing(true),
        );
    }

    builder.build()?.try_deserialize()
}
