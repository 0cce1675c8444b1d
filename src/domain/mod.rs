// ==========================================
// Maverick 物流运营 - 领域层
// ==========================================
// 职责: 实体与枚举定义，不含持久化逻辑
// ==========================================

pub mod ingest;
pub mod partner;
pub mod shipment;
pub mod types;

pub use ingest::{IngestBatch, IngestStatus, IngestStep};
pub use partner::{PartnerHealthRecord, PartnerTask};
pub use shipment::{RawShipmentRow, ShipmentRecord};
pub use types::{DeliveryStatus, HealthBucket, TimelinessLabel};
