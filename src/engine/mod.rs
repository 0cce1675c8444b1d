// ==========================================
// Maverick 物流运营 - 引擎层
// ==========================================
// 职责: 纯计算规则（分类 / 聚合 / 安全比率）
// 约束: 无 I/O，无共享可变状态
// ==========================================

pub mod aggregator;
pub mod ratio;
pub mod timeliness;

pub use aggregator::{AggregationEngine, PartnerView, SummaryView};
pub use ratio::{round2, safe_mean, safe_percent, safe_ratio};
pub use timeliness::{
    classify, fuel_efficiency, parse_local_datetime, TimelinessClassifier, DEFAULT_GRACE_MINUTES,
};
