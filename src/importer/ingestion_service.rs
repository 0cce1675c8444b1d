// ==========================================
// Maverick 物流运营 - 导入编排服务
// ==========================================
// 步骤: 建表 → 运单导入 → 合作方任务导入
// 约束: 每个步骤独立失败；失败只记录日志与审计，已落库数据保持可查询
// ==========================================

use crate::config::IngestConfigReader;
use crate::db::init_schema;
use crate::domain::ingest::{IngestBatch, IngestStatus, IngestStep};
use crate::engine::timeliness::TimelinessClassifier;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::TaskFeed;
use crate::importer::partner_task_importer::PartnerTaskImporter;
use crate::importer::shipment_importer::ShipmentImporter;
use crate::repository::{IngestBatchRepository, PartnerTaskRepository, ShipmentRepository};
use chrono::{Local, NaiveDateTime};
use rusqlite::Connection;
use serde::Serialize;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{error, info, warn};
use uuid::Uuid;

/// 一次完整导入的结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestionSummary {
    pub shipments: IngestBatch,
    pub partner_tasks: IngestBatch,
}

// ==========================================
// IngestionService - 导入编排
// ==========================================
pub struct IngestionService<C>
where
    C: IngestConfigReader,
{
    conn: Arc<Mutex<Connection>>,
    config: C,
    shipment_repo: Arc<ShipmentRepository>,
    partner_task_repo: Arc<PartnerTaskRepository>,
    batch_repo: IngestBatchRepository,
}

impl<C> IngestionService<C>
where
    C: IngestConfigReader,
{
    pub fn new(conn: Arc<Mutex<Connection>>, config: C) -> Self {
        Self {
            shipment_repo: Arc::new(ShipmentRepository::from_connection(conn.clone())),
            partner_task_repo: Arc::new(PartnerTaskRepository::from_connection(conn.clone())),
            batch_repo: IngestBatchRepository::from_connection(conn.clone()),
            conn,
            config,
        }
    }

    /// 确保表结构存在（幂等）
    pub fn ensure_schema(&self) -> ImportResult<()> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| anyhow::anyhow!("数据库锁获取失败: {}", e))?;
        init_schema(&conn).map_err(crate::repository::RepositoryError::from)?;
        Ok(())
    }

    /// 完整导入流程
    pub fn run(&self, shipments_path: &Path, feed: &dyn TaskFeed) -> ImportResult<IngestionSummary> {
        info!("==================================================");
        info!("Maverick 数据导入开始");
        info!("==================================================");

        self.ensure_schema()?;
        let summary = IngestionSummary {
            shipments: self.ingest_shipments(shipments_path),
            partner_tasks: self.ingest_partner_tasks(feed),
        };

        info!(
            shipments = %summary.shipments.status,
            partner_tasks = %summary.partner_tasks.status,
            "Maverick 数据导入结束"
        );
        Ok(summary)
    }

    /// 运单导入步骤（不向外传播错误）
    pub fn ingest_shipments(&self, path: &Path) -> IngestBatch {
        let started_at = now();

        // 宽限窗口配置不可读时整步失败，不以默认值静默分类
        let result = self.grace_minutes().and_then(|grace| {
            let classifier = TimelinessClassifier::new(grace);
            ShipmentImporter::new(self.shipment_repo.clone(), classifier).import_file(path)
        });

        let batch = match result {
            Ok(report) => self.make_batch(
                IngestStep::Shipments,
                path.display().to_string(),
                started_at,
                report.rows_ingested,
                report.skipped.len(),
                IngestStatus::Success,
                None,
            ),
            Err(e) => self.failed_batch(IngestStep::Shipments, path.display().to_string(), started_at, e),
        };

        self.record(&batch);
        batch
    }

    /// 合作方任务导入步骤（不向外传播错误）
    pub fn ingest_partner_tasks(&self, feed: &dyn TaskFeed) -> IngestBatch {
        let started_at = now();
        let importer = PartnerTaskImporter::new(self.partner_task_repo.clone());

        let result = self
            .load_feed_settings()
            .and_then(|(sources, limit)| importer.import(feed, &sources, limit, started_at));

        let batch = match result {
            Ok(report) => self.make_batch(
                IngestStep::PartnerTasks,
                feed.source_name(),
                started_at,
                report.tasks_inserted,
                report.tasks_fetched - report.tasks_inserted,
                IngestStatus::Success,
                None,
            ),
            Err(e) => self.failed_batch(IngestStep::PartnerTasks, feed.source_name(), started_at, e),
        };

        self.record(&batch);
        batch
    }

    /// 最近的导入审计
    pub fn recent_batches(&self, limit: usize) -> ImportResult<Vec<IngestBatch>> {
        Ok(self.batch_repo.list_recent(limit)?)
    }

    fn grace_minutes(&self) -> ImportResult<i64> {
        self.config
            .get_on_time_grace_minutes()
            .map_err(|e| ImportError::ConfigReadError {
                key: crate::config::config_keys::ON_TIME_GRACE_MINUTES.to_string(),
                message: e.to_string(),
            })
    }

    fn load_feed_settings(&self) -> ImportResult<(Vec<crate::config::PartnerSource>, usize)> {
        let sources = self
            .config
            .get_partner_sources()
            .map_err(|e| ImportError::ConfigReadError {
                key: crate::config::config_keys::PARTNER_SOURCE_MAP.to_string(),
                message: e.to_string(),
            })?;
        let limit = self
            .config
            .get_tasks_per_partner()
            .map_err(|e| ImportError::ConfigReadError {
                key: crate::config::config_keys::TASKS_PER_PARTNER.to_string(),
                message: e.to_string(),
            })?;
        Ok((sources, limit))
    }

    #[allow(clippy::too_many_arguments)]
    fn make_batch(
        &self,
        step: IngestStep,
        source: String,
        started_at: NaiveDateTime,
        rows_ingested: usize,
        rows_skipped: usize,
        status: IngestStatus,
        message: Option<String>,
    ) -> IngestBatch {
        IngestBatch {
            batch_id: Uuid::new_v4().to_string(),
            step,
            source,
            started_at,
            finished_at: now(),
            rows_ingested,
            rows_skipped,
            status,
            message,
        }
    }

    /// 上游不可用 → SKIPPED；其余 → FAILED
    fn failed_batch(
        &self,
        step: IngestStep,
        source: String,
        started_at: NaiveDateTime,
        err: ImportError,
    ) -> IngestBatch {
        let status = match err {
            ImportError::FileNotFound(_)
            | ImportError::UnsupportedFormat(_)
            | ImportError::FileReadError(_)
            | ImportError::CsvParseError(_)
            | ImportError::ExcelParseError(_)
            | ImportError::FeedUnavailable { .. }
            | ImportError::FeedFormatError(_) => IngestStatus::Skipped,
            _ => IngestStatus::Failed,
        };
        error!(step = %step, status = %status, error = %err, "导入步骤未完成，已保留既有数据");
        self.make_batch(step, source, started_at, 0, 0, status, Some(err.to_string()))
    }

    fn record(&self, batch: &IngestBatch) {
        if let Err(e) = self.batch_repo.insert(batch) {
            warn!(batch_id = %batch.batch_id, error = %e, "导入审计写入失败");
        }
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}
