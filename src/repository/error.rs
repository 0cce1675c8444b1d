// ==========================================
// Maverick 物流运营 - 仓储层错误
// ==========================================
// 来源: rusqlite 错误 / 连接锁 / 落库数据无法还原
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 单行查询无结果
    #[error("记录不存在: {entity}(id={id})")]
    NotFound { entity: String, id: String },

    /// 共享连接的 Mutex 已中毒
    #[error("共享连接不可用: {0}")]
    LockError(String),

    #[error("SQL 执行失败: {0}")]
    DatabaseQueryError(String),

    #[error("唯一键冲突: {0}")]
    UniqueConstraintViolation(String),

    /// 库中值无法还原为领域类型（分桶 / 时间戳等）
    #[error("列 {field} 的值无效: {message}")]
    FieldValueError { field: String, message: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) if msg.contains("UNIQUE") => {
                RepositoryError::UniqueConstraintViolation(msg)
            }
            rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
                entity: "row".to_string(),
                id: "?".to_string(),
            },
            other => RepositoryError::DatabaseQueryError(other.to_string()),
        }
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
