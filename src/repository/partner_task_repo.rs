// ==========================================
// Maverick 物流运营 - 合作方任务健康仓储
// ==========================================
// 表: partner_tasks_status
// 去重: UNIQUE(partner_contract, task_source_id) + INSERT OR IGNORE
// ==========================================

use crate::domain::partner::PartnerHealthRecord;
use crate::domain::types::HealthBucket;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct PartnerTaskRepository {
    conn: Arc<Mutex<Connection>>,
}

impl PartnerTaskRepository {
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 批量写入健康记录，已存在的 (partner, task) 忽略
    ///
    /// # 返回
    /// - Ok(usize): 实际新增条数
    pub fn batch_insert_ignore(&self, records: &[PartnerHealthRecord]) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT OR IGNORE INTO partner_tasks_status (
                    partner_contract, task_source_id, task_title,
                    task_completed_status, simulated_service_health, log_timestamp
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )?;
            for r in records {
                inserted += stmt.execute(params![
                    r.partner_contract,
                    r.task_source_id,
                    r.task_title,
                    r.task_completed,
                    r.health.as_str(),
                    r.logged_at.format(TS_FORMAT).to_string(),
                ])?;
            }
        }

        tx.commit()?;
        Ok(inserted)
    }

    /// 查询合作方的健康记录
    ///
    /// # 参数
    /// - partner_contract: 指定合作方；None 表示全部
    pub fn list_by_partner(
        &self,
        partner_contract: Option<&str>,
    ) -> RepositoryResult<Vec<PartnerHealthRecord>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT partner_contract, task_source_id, task_title,
                   task_completed_status, simulated_service_health, log_timestamp
            FROM partner_tasks_status
            WHERE ?1 IS NULL OR partner_contract = ?1
            ORDER BY partner_contract, task_source_id
            "#,
        )?;

        let rows = stmt.query_map(params![partner_contract], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, bool>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (partner_contract, task_source_id, task_title, task_completed, health_raw, ts_raw) =
                row?;
            let health = HealthBucket::from_db_str(&health_raw).ok_or_else(|| {
                RepositoryError::FieldValueError {
                    field: "simulated_service_health".to_string(),
                    message: format!("无法识别的健康分桶: {}", health_raw),
                }
            })?;
            let logged_at = NaiveDateTime::parse_from_str(&ts_raw, TS_FORMAT).map_err(|e| {
                RepositoryError::FieldValueError {
                    field: "log_timestamp".to_string(),
                    message: format!("无法解析的记录时间 {:?}: {}", ts_raw, e),
                }
            })?;

            records.push(PartnerHealthRecord {
                partner_contract,
                task_source_id,
                task_title,
                task_completed,
                health,
                logged_at,
            });
        }
        Ok(records)
    }

    /// 任务表中出现过的合作方（去重、升序）
    pub fn list_partner_contracts(&self) -> RepositoryResult<Vec<String>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT DISTINCT partner_contract FROM partner_tasks_status ORDER BY partner_contract",
        )?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
