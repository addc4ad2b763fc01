use thiserror::Error;

/// # Summary
/// 存储层错误枚举，处理数据库连接、查询执行失败等问题。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
/// - "记录不存在" 不属于存储错误，由端口方法以 `Option` / 空列表表达。
#[derive(Error, Debug)]
pub enum StoreError {
    /// 无法获取数据库连接 (连接池耗尽、文件不可访问等)
    #[error("Connection error: {0}")]
    Connection(String),
    /// 语句执行或结果解码失败
    #[error("Database error: {0}")]
    Database(String),
    /// 初始化存储失败
    #[error("Initialization error: {0}")]
    InitError(String),
}
