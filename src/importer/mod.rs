// ==========================================
// Maverick 物流运营 - 导入层
// ==========================================
// 职责: 外部数据导入（运单日志 + 合作方任务源）
// 支持: CSV, Excel, JSON 文件 / HTTP 任务源
// ==========================================

pub mod derivation;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod importer_trait;
pub mod ingestion_service;
pub mod partner_task_importer;
pub mod shipment_importer;
pub mod task_feed;

pub use error::{ImportError, ImportResult};
pub use field_mapper::ShipmentFieldMapper;
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use importer_trait::{FieldMapper, FileParser, TaskFeed};
pub use ingestion_service::{IngestionService, IngestionSummary};
pub use partner_task_importer::{PartnerTaskImportReport, PartnerTaskImporter};
pub use shipment_importer::{ShipmentImportReport, ShipmentImporter, SkippedRow};
pub use task_feed::{HttpTaskFeed, InMemoryTaskFeed, JsonFileTaskFeed};
