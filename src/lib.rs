// ==========================================
// Maverick 物流运营 - 核心库
// ==========================================
// 职责: 运单日志导入、准时判定、合作方服务健康度汇总
// 技术栈: Rust + SQLite
// 系统定位: 运营报表后端 (只读查询 + 批量导入)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 业务规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 查询接口
pub mod api;

// 应用层 - 组装
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{DeliveryStatus, HealthBucket, TimelinessLabel};

// 领域实体
pub use domain::{
    IngestBatch, IngestStatus, IngestStep, PartnerHealthRecord, PartnerTask, RawShipmentRow,
    ShipmentRecord,
};

// 引擎
pub use engine::{AggregationEngine, TimelinessClassifier};

// 导入
pub use importer::{IngestionService, JsonFileTaskFeed, TaskFeed};

// API
pub use api::{DailySummaryResponse, OperationsApi, PartnerStatusResponse};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Maverick 物流运营";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
