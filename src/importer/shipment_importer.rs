// ==========================================
// Maverick 物流运营 - 运单导入器
// ==========================================
// 流程: 解析 → 字段映射 → 派生（分类 + 油耗）→ 落库
// 约束: 单行失败只跳过该行，不中断批次
// ==========================================

use crate::domain::types::TimelinessLabel;
use crate::engine::timeliness::TimelinessClassifier;
use crate::importer::derivation::derive_shipment_record;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::ShipmentFieldMapper;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::importer_trait::{FieldMapper, FileParser};
use crate::repository::ShipmentRepository;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// 被跳过的行
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRow {
    pub row_number: usize,
    pub reason: String,
}

/// 运单导入结果
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShipmentImportReport {
    pub rows_read: usize,
    pub rows_ingested: usize,
    pub skipped: Vec<SkippedRow>,
    /// 按准时标签计数（On-Time / Late / Pending / Error）
    pub label_counts: BTreeMap<String, usize>,
}

// ==========================================
// ShipmentImporter - 运单导入器
// ==========================================
pub struct ShipmentImporter {
    repo: Arc<ShipmentRepository>,
    file_parser: Box<dyn FileParser>,
    field_mapper: Box<dyn FieldMapper>,
    classifier: TimelinessClassifier,
}

impl ShipmentImporter {
    /// 使用默认解析器（按扩展名选择 CSV / Excel）与字段映射器
    pub fn new(repo: Arc<ShipmentRepository>, classifier: TimelinessClassifier) -> Self {
        Self::with_components(
            repo,
            Box::new(UniversalFileParser),
            Box::new(ShipmentFieldMapper),
            classifier,
        )
    }

    pub fn with_components(
        repo: Arc<ShipmentRepository>,
        file_parser: Box<dyn FileParser>,
        field_mapper: Box<dyn FieldMapper>,
        classifier: TimelinessClassifier,
    ) -> Self {
        Self {
            repo,
            file_parser,
            field_mapper,
            classifier,
        }
    }

    /// 导入运单日志文件
    ///
    /// # 返回
    /// - Ok(ShipmentImportReport): 导入统计（含跳过行）
    /// - Err: 文件不可读 / 落库失败
    #[instrument(skip(self, file_path), fields(file = %file_path.as_ref().display()))]
    pub fn import_file<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<ShipmentImportReport> {
        // === 步骤 1: 解析文件 ===
        let raw_rows = self.file_parser.parse_to_raw_records(file_path.as_ref())?;
        let mut report = ShipmentImportReport {
            rows_read: raw_rows.len(),
            ..Default::default()
        };
        debug!(rows = raw_rows.len(), "文件解析完成");

        // === 步骤 2: 字段映射 + 派生 ===
        let mut records = Vec::with_capacity(raw_rows.len());
        for (idx, row) in raw_rows.iter().enumerate() {
            let row_number = idx + 1;
            match self.field_mapper.map_to_raw_shipment(row, row_number) {
                Ok(raw) => {
                    let record = derive_shipment_record(raw, &self.classifier);
                    if record.on_time_status_calculated == TimelinessLabel::Error {
                        warn!(
                            row_number,
                            shipment_id = %record.shipment_id,
                            "时间戳无法解析，标记为 Error"
                        );
                    }
                    *report
                        .label_counts
                        .entry(record.on_time_status_calculated.as_str().to_string())
                        .or_insert(0) += 1;
                    records.push(record);
                }
                Err(e) => {
                    warn!(row_number, error = %e, "行映射失败，已跳过");
                    report.skipped.push(SkippedRow {
                        row_number,
                        reason: e.to_string(),
                    });
                }
            }
        }

        // === 步骤 3: 落库 ===
        report.rows_ingested = self.repo.batch_upsert(&records)?;
        info!(
            rows_read = report.rows_read,
            rows_ingested = report.rows_ingested,
            rows_skipped = report.skipped.len(),
            "运单导入完成"
        );
        Ok(report)
    }
}
