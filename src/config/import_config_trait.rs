// ==========================================
// Maverick 物流运营 - 导入配置读取 Trait
// ==========================================
// 职责: 定义导入模块所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use std::error::Error;

/// 任务源用户 ID → 合作方合同名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartnerSource {
    pub source_user_id: i64,
    pub partner_contract: String,
}

// ==========================================
// IngestConfigReader Trait
// ==========================================
// 实现者: ConfigManager（从 config_kv 表读取）
pub trait IngestConfigReader: Send + Sync {
    /// 准时判定宽限窗口（分钟）
    ///
    /// # 默认值
    /// - 15
    fn get_on_time_grace_minutes(&self) -> Result<i64, Box<dyn Error>>;

    /// 每个合作方最多导入的任务条数
    ///
    /// # 默认值
    /// - 5
    fn get_tasks_per_partner(&self) -> Result<usize, Box<dyn Error>>;

    /// 任务源用户 ID 与合作方的映射（按 source_user_id 升序）
    ///
    /// # 默认值
    /// - 1 Amazon-Prime / 2 Hertz-Local / 3 Uhaul-Interstate
    ///   4 Budget-Airport / 5 Ryder-Logistics / 6 Enterprise-Corp
    fn get_partner_sources(&self) -> Result<Vec<PartnerSource>, Box<dyn Error>>;
}
