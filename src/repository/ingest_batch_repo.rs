// ==========================================
// Maverick 物流运营 - 导入批次审计仓储
// ==========================================
// 表: ingest_batch
// ==========================================

use crate::domain::ingest::{IngestBatch, IngestStatus, IngestStep};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct IngestBatchRepository {
    conn: Arc<Mutex<Connection>>,
}

impl IngestBatchRepository {
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    pub fn insert(&self, batch: &IngestBatch) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO ingest_batch (
                batch_id, step, source, started_at, finished_at,
                rows_ingested, rows_skipped, status, message
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                batch.batch_id,
                batch.step.to_string(),
                batch.source,
                batch.started_at.format(TS_FORMAT).to_string(),
                batch.finished_at.format(TS_FORMAT).to_string(),
                batch.rows_ingested as i64,
                batch.rows_skipped as i64,
                batch.status.to_string(),
                batch.message,
            ],
        )?;
        Ok(())
    }

    /// 最近的导入批次（按开始时间倒序）
    pub fn list_recent(&self, limit: usize) -> RepositoryResult<Vec<IngestBatch>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT batch_id, step, source, started_at, finished_at,
                   rows_ingested, rows_skipped, status, message
            FROM ingest_batch
            ORDER BY started_at DESC, rowid DESC
            LIMIT ?1
            "#,
        )?;

        let rows = stmt.query_map(params![limit as i64], |row| {
            let step_raw: String = row.get(1)?;
            let started_raw: String = row.get(3)?;
            let finished_raw: String = row.get(4)?;
            let status_raw: String = row.get(7)?;
            Ok(IngestBatch {
                batch_id: row.get(0)?,
                step: if step_raw == "SHIPMENTS" {
                    IngestStep::Shipments
                } else {
                    IngestStep::PartnerTasks
                },
                source: row.get(2)?,
                started_at: NaiveDateTime::parse_from_str(&started_raw, TS_FORMAT)
                    .unwrap_or_default(),
                finished_at: NaiveDateTime::parse_from_str(&finished_raw, TS_FORMAT)
                    .unwrap_or_default(),
                rows_ingested: row.get::<_, i64>(5)? as usize,
                rows_skipped: row.get::<_, i64>(6)? as usize,
                status: IngestStatus::from_db_str(&status_raw),
                message: row.get(8)?,
            })
        })?;

        let mut batches = Vec::new();
        for row in rows {
            batches.push(row?);
        }
        Ok(batches)
    }
}
