// ==========================================
// Maverick 物流运营 - 查询接口错误
// ==========================================
// 仓储错误统一折叠为 DatabaseError，未找到单独保留
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// 调用方参数不合法（如空白合作方名称）
    #[error("参数无效: {0}")]
    InvalidInput(String),

    #[error("未找到: {0}")]
    NotFound(String),

    #[error("数据存储错误: {0}")]
    DatabaseError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})", entity, id))
            }
            RepositoryError::Other(e) => ApiError::Other(e),
            // 锁中毒 / SQL 失败 / 唯一键冲突 / 落库值损坏
            other => ApiError::DatabaseError(other.to_string()),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_转换() {
        let err: ApiError = RepositoryError::LockError("poisoned".to_string()).into();
        assert!(matches!(err, ApiError::DatabaseError(_)));
        assert_eq!(err.to_string(), "数据存储错误: 共享连接不可用: poisoned");

        let err: ApiError = RepositoryError::FieldValueError {
            field: "log_timestamp".to_string(),
            message: "bad".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::DatabaseError(ref m) if m.contains("log_timestamp")));

        let err: ApiError = RepositoryError::NotFound {
            entity: "Shipment".to_string(),
            id: "S1".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "未找到: Shipment(id=S1)");
    }
}
