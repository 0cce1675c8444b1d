// ==========================================
// Mock 配置实现 - 用于集成测试
// ==========================================

use maverick_ops::config::{default_partner_sources, IngestConfigReader, PartnerSource};
use std::error::Error;

/// Mock 配置结构
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub grace_minutes: i64,
    pub tasks_per_partner: usize,
    pub partner_sources: Vec<PartnerSource>,
    /// 为 true 时合作方映射读取失败
    pub broken_partner_sources: bool,
    /// 为 true 时宽限窗口读取失败
    pub broken_grace_minutes: bool,
}

impl MockConfig {
    /// 创建默认配置
    pub fn default() -> Self {
        Self {
            grace_minutes: 15,
            tasks_per_partner: 5,
            partner_sources: default_partner_sources(),
            broken_partner_sources: false,
            broken_grace_minutes: false,
        }
    }

    /// 自定义宽限窗口
    pub fn with_grace_minutes(grace_minutes: i64) -> Self {
        let mut config = Self::default();
        config.grace_minutes = grace_minutes;
        config
    }

    /// 自定义每个合作方任务条数
    pub fn with_tasks_per_partner(tasks_per_partner: usize) -> Self {
        let mut config = Self::default();
        config.tasks_per_partner = tasks_per_partner;
        config
    }

    /// 合作方映射不可读
    pub fn broken() -> Self {
        let mut config = Self::default();
        config.broken_partner_sources = true;
        config
    }

    /// 宽限窗口配置不可读
    pub fn broken_grace() -> Self {
        let mut config = Self::default();
        config.broken_grace_minutes = true;
        config
    }
}

impl IngestConfigReader for MockConfig {
    fn get_on_time_grace_minutes(&self) -> Result<i64, Box<dyn Error>> {
        if self.broken_grace_minutes {
            return Err("on_time_grace_minutes 不是有效整数".into());
        }
        Ok(self.grace_minutes)
    }

    fn get_tasks_per_partner(&self) -> Result<usize, Box<dyn Error>> {
        Ok(self.tasks_per_partner)
    }

    fn get_partner_sources(&self) -> Result<Vec<PartnerSource>, Box<dyn Error>> {
        if self.broken_partner_sources {
            return Err("partner_source_map 解析失败".into());
        }
        Ok(self.partner_sources.clone())
    }
}
