// ==========================================
// Maverick 物流运营 - 合作方任务导入器
// ==========================================
// 流程: 按映射逐个合作方拉取 → 截取前 N 条 → 派生健康分桶 → 去重落库
// 约束: 任一合作方拉取失败则整步放弃（不写入部分数据）
// ==========================================

use crate::config::PartnerSource;
use crate::domain::partner::PartnerHealthRecord;
use crate::importer::error::ImportResult;
use crate::importer::importer_trait::TaskFeed;
use crate::repository::PartnerTaskRepository;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// 任务导入结果
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PartnerTaskImportReport {
    pub partners_polled: usize,
    pub tasks_fetched: usize,
    /// 去重后实际新增
    pub tasks_inserted: usize,
}

pub struct PartnerTaskImporter {
    repo: Arc<PartnerTaskRepository>,
}

impl PartnerTaskImporter {
    pub fn new(repo: Arc<PartnerTaskRepository>) -> Self {
        Self { repo }
    }

    /// 拉取并写入合作方任务健康记录
    ///
    /// # 参数
    /// - feed: 任务源
    /// - sources: 源用户 ID → 合作方映射
    /// - tasks_per_partner: 每个合作方最多取的任务数
    /// - logged_at: 记录时间戳
    #[instrument(skip(self, feed, sources), fields(source = %feed.source_name()))]
    pub fn import(
        &self,
        feed: &dyn TaskFeed,
        sources: &[PartnerSource],
        tasks_per_partner: usize,
        logged_at: NaiveDateTime,
    ) -> ImportResult<PartnerTaskImportReport> {
        let mut records = Vec::new();
        for source in sources {
            let tasks = feed.fetch_tasks(source.source_user_id)?;
            debug!(
                partner = %source.partner_contract,
                fetched = tasks.len(),
                "任务拉取完成"
            );
            records.extend(
                tasks
                    .iter()
                    .take(tasks_per_partner)
                    .map(|task| PartnerHealthRecord::from_task(&source.partner_contract, task, logged_at)),
            );
        }

        let report = PartnerTaskImportReport {
            partners_polled: sources.len(),
            tasks_fetched: records.len(),
            tasks_inserted: self.repo.batch_insert_ignore(&records)?,
        };
        info!(
            partners = report.partners_polled,
            fetched = report.tasks_fetched,
            inserted = report.tasks_inserted,
            "合作方任务导入完成"
        );
        Ok(report)
    }
}
