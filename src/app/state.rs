// ==========================================
// Maverick 物流运营 - 应用状态
// ==========================================
// 职责: 管理共享数据库连接与各服务实例
// ==========================================

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::api::OperationsApi;
use crate::config::ConfigManager;
use crate::db::{init_schema, open_sqlite_connection, read_schema_version, CURRENT_SCHEMA_VERSION};
use crate::importer::IngestionService;
use rusqlite::Connection;

/// 应用状态
///
/// 所有仓储共享同一个连接；导入与查询不并发执行
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 共享连接
    pub conn: Arc<Mutex<Connection>>,

    /// 运营查询 API
    pub operations_api: Arc<OperationsApi>,

    /// 导入编排
    pub ingestion: Arc<IngestionService<ConfigManager>>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 说明
    /// 1. 打开连接并确保表结构存在
    /// 2. schema_version 与代码不一致时只告警
    /// 3. 创建查询 API 与导入服务
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let conn = open_sqlite_connection(&db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        init_schema(&conn).map_err(|e| format!("建表失败: {}", e))?;

        match read_schema_version(&conn) {
            Ok(Some(v)) if v != CURRENT_SCHEMA_VERSION => {
                tracing::warn!(
                    found = v,
                    expected = CURRENT_SCHEMA_VERSION,
                    "schema_version 与当前代码不一致"
                );
            }
            Ok(_) => {}
            Err(e) => tracing::warn!("schema_version 读取失败(将继续启动): {}", e),
        }

        let conn = Arc::new(Mutex::new(conn));
        let config = ConfigManager::from_connection(conn.clone())
            .map_err(|e| format!("配置管理器初始化失败: {}", e))?;

        Ok(Self {
            db_path,
            operations_api: Arc::new(OperationsApi::from_connection(conn.clone())),
            ingestion: Arc::new(IngestionService::new(conn.clone(), config)),
            conn,
        })
    }
}

/// 默认数据库路径
///
/// 优先级: 环境变量 MAVERICK_DB_PATH → 用户数据目录 → 当前目录
pub fn get_default_db_path() -> String {
    // 允许通过环境变量显式指定 DB 路径（便于调试/测试/CI）
    if let Ok(path) = std::env::var("MAVERICK_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./maverick_operational_data.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("maverick-ops");
        // 目录创建失败时回退到当前目录
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("maverick_operational_data.db");
        }
    }

    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_get_default_db_path() {
        let path = get_default_db_path();
        assert!(path.ends_with(".db"));
    }

    #[test]
    fn test_app_state_新库初始化() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("ops.db").to_string_lossy().to_string();

        let state = AppState::new(db_path.clone()).unwrap();
        assert_eq!(state.db_path, db_path);

        let summary = state.operations_api.get_daily_summary().unwrap();
        assert_eq!(summary.total_shipments_logged, 0);
        assert_eq!(summary.on_time_delivery_percent, 0.0);
        assert_eq!(summary.average_fleet_mpg, None);
    }
}
