// ==========================================
// Maverick 物流运营 - API 层
// ==========================================
// 职责: 对外只读查询接口（响应可直接序列化为 JSON）
// 架构: API 层 → Engine 层 → Repository 层
// ==========================================

pub mod error;
pub mod operations_api;

pub use error::{ApiError, ApiResult};
pub use operations_api::{
    DailySummaryResponse, OperationsApi, PartnerShipmentMetrics, PartnerStatusResponse,
};
