// ==========================================
// Maverick 物流运营 - 应用层
// ==========================================
// 职责: 组装连接、配置、导入服务与查询 API
// ==========================================

pub mod state;

// 重导出
pub use state::{get_default_db_path, AppState};
