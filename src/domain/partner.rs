// ==========================================
// Maverick 物流运营 - 合作方任务与健康记录
// ==========================================
// 来源: 外部任务源（/todos 形态）
// 去重键: (partner_contract, task_source_id)
// ==========================================

use crate::domain::types::HealthBucket;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// 任务源返回的单条任务
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerTask {
    pub id: i64,
    pub title: String,
    pub completed: bool,
}

/// 合作方健康记录（每条任务一行）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnerHealthRecord {
    pub partner_contract: String,
    pub task_source_id: i64,
    pub task_title: String,
    pub task_completed: bool,
    pub health: HealthBucket,
    pub logged_at: NaiveDateTime,
}

impl PartnerHealthRecord {
    /// 由任务派生健康记录
    pub fn from_task(partner_contract: &str, task: &PartnerTask, logged_at: NaiveDateTime) -> Self {
        Self {
            partner_contract: partner_contract.to_string(),
            task_source_id: task.id,
            task_title: task.title.clone(),
            task_completed: task.completed,
            health: HealthBucket::from_completed(task.completed),
            logged_at,
        }
    }
}
