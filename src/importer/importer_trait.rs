// ==========================================
// Maverick 物流运营 - 导入管道 Trait
// ==========================================
// 职责: 定义导入各阶段接口（不包含实现）
// ==========================================

use crate::domain::partner::PartnerTask;
use crate::domain::shipment::RawShipmentRow;
use crate::importer::error::ImportResult;
use std::collections::HashMap;
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 1）
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始行记录（HashMap<列名, 值>）
    ///
    /// # 返回
    /// - Ok(Vec<HashMap<String, String>>): 行记录列表（已跳过全空行）
    /// - Err: 文件读取错误、格式错误
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<HashMap<String, String>>>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 字段映射接口（阶段 2）
// 实现者: ShipmentFieldMapper
pub trait FieldMapper: Send + Sync {
    /// 将原始行记录映射为 RawShipmentRow
    ///
    /// # 参数
    /// - row: 原始行记录
    /// - row_number: 行号（从 1 开始，不含表头）
    ///
    /// # 返回
    /// - Err(RequiredFieldMissing): shipment_id 或 planned_arrival_datetime 为空
    fn map_to_raw_shipment(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<RawShipmentRow>;
}

// ==========================================
// TaskFeed Trait
// ==========================================
// 用途: 外部合作方任务源
// 实现者: JsonFileTaskFeed, InMemoryTaskFeed
pub trait TaskFeed: Send + Sync {
    /// 任务源描述（用于日志与审计）
    fn source_name(&self) -> String;

    /// 拉取指定源用户的任务列表（保持源顺序）
    ///
    /// # 返回
    /// - Err(FeedUnavailable / FeedFormatError): 上游不可用或数据无法解析
    fn fetch_tasks(&self, source_user_id: i64) -> ImportResult<Vec<PartnerTask>>;
}
