// ==========================================
// Maverick 物流运营 - 导入批次审计
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 导入步骤
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IngestStep {
    Shipments,
    PartnerTasks,
}

impl fmt::Display for IngestStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngestStep::Shipments => write!(f, "SHIPMENTS"),
            IngestStep::PartnerTasks => write!(f, "PARTNER_TASKS"),
        }
    }
}

/// 批次状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IngestStatus {
    Success, // 完成
    Skipped, // 上游不可用，本步骤跳过
    Failed,  // 落库失败
}

impl fmt::Display for IngestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngestStatus::Success => write!(f, "SUCCESS"),
            IngestStatus::Skipped => write!(f, "SKIPPED"),
            IngestStatus::Failed => write!(f, "FAILED"),
        }
    }
}

impl IngestStatus {
    pub fn from_db_str(s: &str) -> Self {
        match s {
            "SUCCESS" => IngestStatus::Success,
            "SKIPPED" => IngestStatus::Skipped,
            _ => IngestStatus::Failed,
        }
    }
}

/// 单个导入步骤的审计记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestBatch {
    pub batch_id: String,
    pub step: IngestStep,
    pub source: String,
    pub started_at: NaiveDateTime,
    pub finished_at: NaiveDateTime,
    pub rows_ingested: usize,
    pub rows_skipped: usize,
    pub status: IngestStatus,
    pub message: Option<String>,
}
