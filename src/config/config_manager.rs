// ==========================================
// Maverick 物流运营 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::import_config_trait::{IngestConfigReader, PartnerSource};
use crate::db::open_sqlite_connection;
use crate::engine::timeliness::DEFAULT_GRACE_MINUTES;
use rusqlite::{params, Connection};
use std::collections::BTreeMap;
use std::error::Error;
use std::sync::{Arc, Mutex};

/// 默认每个合作方导入的任务条数
pub const DEFAULT_TASKS_PER_PARTNER: usize = 5;

/// 默认合作方映射
pub const DEFAULT_PARTNER_SOURCES: &[(i64, &str)] = &[
    (1, "Amazon-Prime"),
    (2, "Hertz-Local"),
    (3, "Uhaul-Interstate"),
    (4, "Budget-Airport"),
    (5, "Ryder-Logistics"),
    (6, "Enterprise-Corp"),
];

const GLOBAL_SCOPE: &str = "global";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = ?1 AND key = ?2",
            params![GLOBAL_SCOPE, key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 读取 global scope 的配置值（公开方法，供其他模块复用）
    pub fn get_global_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        self.get_config_value(key)
    }

    /// 写入 global scope 配置（UPSERT）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES (?1, ?2, ?3)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?3, updated_at = datetime('now')",
            params![GLOBAL_SCOPE, key, value],
        )?;
        tracing::debug!(key = %key, value = %value, "配置已更新");
        Ok(())
    }

    /// 写入合作方映射（JSON: {"1": "Amazon-Prime", ...}）
    pub fn set_partner_sources(&self, sources: &[PartnerSource]) -> Result<(), Box<dyn Error>> {
        let map: BTreeMap<i64, &str> = sources
            .iter()
            .map(|s| (s.source_user_id, s.partner_contract.as_str()))
            .collect();
        let json = serde_json::to_string(&map)?;
        self.set_global_config_value(config_keys::PARTNER_SOURCE_MAP, &json)
    }

    /// 读取并解析数值配置，缺失时返回默认值
    fn get_parsed_or_default<T>(&self, key: &str, default: T) -> Result<T, Box<dyn Error>>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get_config_value(key)? {
            Some(raw) => raw.trim().parse::<T>().map_err(|e| {
                Box::<dyn Error>::from(format!(
                    "配置值格式错误 (key: {}, value: {}): {}",
                    key, raw, e
                ))
            }),
            None => Ok(default),
        }
    }
}

impl IngestConfigReader for ConfigManager {
    fn get_on_time_grace_minutes(&self) -> Result<i64, Box<dyn Error>> {
        self.get_parsed_or_default(config_keys::ON_TIME_GRACE_MINUTES, DEFAULT_GRACE_MINUTES)
    }

    fn get_tasks_per_partner(&self) -> Result<usize, Box<dyn Error>> {
        self.get_parsed_or_default(config_keys::TASKS_PER_PARTNER, DEFAULT_TASKS_PER_PARTNER)
    }

    fn get_partner_sources(&self) -> Result<Vec<PartnerSource>, Box<dyn Error>> {
        let raw = match self.get_config_value(config_keys::PARTNER_SOURCE_MAP)? {
            Some(v) => v,
            None => return Ok(default_partner_sources()),
        };

        // BTreeMap 保证按 source_user_id 升序
        let map: BTreeMap<i64, String> = serde_json::from_str(&raw)?;
        Ok(map
            .into_iter()
            .map(|(source_user_id, partner_contract)| PartnerSource {
                source_user_id,
                partner_contract,
            })
            .collect())
    }
}

/// 默认合作方映射
pub fn default_partner_sources() -> Vec<PartnerSource> {
    DEFAULT_PARTNER_SOURCES
        .iter()
        .map(|(id, name)| PartnerSource {
            source_user_id: *id,
            partner_contract: name.to_string(),
        })
        .collect()
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 准时判定
    pub const ON_TIME_GRACE_MINUTES: &str = "on_time_grace_minutes";

    // 合作方任务源
    pub const TASKS_PER_PARTNER: &str = "tasks_per_partner";
    pub const PARTNER_SOURCE_MAP: &str = "partner_source_map"; // JSON
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_schema;

    fn manager() -> ConfigManager {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        ConfigManager::from_connection(Arc::new(Mutex::new(conn))).unwrap()
    }

    #[test]
    fn test_默认配置() {
        let config = manager();
        assert_eq!(config.get_on_time_grace_minutes().unwrap(), 15);
        assert_eq!(config.get_tasks_per_partner().unwrap(), 5);

        let sources = config.get_partner_sources().unwrap();
        assert_eq!(sources.len(), 6);
        assert_eq!(sources[0].partner_contract, "Amazon-Prime");
        assert_eq!(sources[5].source_user_id, 6);
    }

    #[test]
    fn test_覆写配置() {
        let config = manager();
        config
            .set_global_config_value(config_keys::ON_TIME_GRACE_MINUTES, "30")
            .unwrap();
        config
            .set_global_config_value(config_keys::TASKS_PER_PARTNER, "2")
            .unwrap();
        config
            .set_partner_sources(&[PartnerSource {
                source_user_id: 9,
                partner_contract: "Acme".to_string(),
            }])
            .unwrap();

        assert_eq!(config.get_on_time_grace_minutes().unwrap(), 30);
        assert_eq!(config.get_tasks_per_partner().unwrap(), 2);
        assert_eq!(
            config.get_partner_sources().unwrap(),
            vec![PartnerSource {
                source_user_id: 9,
                partner_contract: "Acme".to_string()
            }]
        );
    }

    #[test]
    fn test_非法配置值报错() {
        let config = manager();
        config
            .set_global_config_value(config_keys::TASKS_PER_PARTNER, "many")
            .unwrap();
        assert!(config.get_tasks_per_partner().is_err());
    }
}
