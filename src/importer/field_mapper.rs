// ==========================================
// Maverick 物流运营 - 运单字段映射器
// ==========================================
// 职责: 源列名 → RawShipmentRow + 类型转换
// 必填: shipment_id / planned_arrival_datetime（缺失则整行跳过）
// 数值列无法解析时置空并告警，不丢弃整行
// ==========================================

use crate::domain::shipment::RawShipmentRow;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::FieldMapper as FieldMapperTrait;
use std::collections::HashMap;
use std::str::FromStr;
use tracing::warn;

pub struct ShipmentFieldMapper;

impl FieldMapperTrait for ShipmentFieldMapper {
    fn map_to_raw_shipment(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<RawShipmentRow> {
        let shipment_id = self.require(row, "shipment_id", row_number)?;
        let planned_arrival_datetime = self.require(row, "planned_arrival_datetime", row_number)?;

        Ok(RawShipmentRow {
            row_number,
            shipment_id,
            log_date: self.get_string(row, "log_date"),
            vehicle_id: self.get_string(row, "vehicle_id"),
            driver_id: self.get_string(row, "driver_id"),
            partner_contract: self.get_string(row, "partner_contract"),
            origin_city: self.get_string(row, "origin_city"),
            destination_city: self.get_string(row, "destination_city"),
            load_type: self.get_string(row, "load_type"),
            package_count: self.parse_number(row, "package_count", row_number),
            shipment_value_usd: self.parse_number(row, "shipment_value_usd", row_number),
            planned_departure_datetime: self.get_string(row, "planned_departure_datetime"),
            actual_departure_datetime: self.get_string(row, "actual_departure_datetime"),
            planned_arrival_datetime,
            actual_arrival_datetime: self.get_string(row, "actual_arrival_datetime"),
            miles_driven: self.parse_number(row, "miles_driven", row_number),
            fuel_consumed_gallons: self.parse_number(row, "fuel_consumed_gallons", row_number),
            delivery_status: self.get_string(row, "delivery_status").unwrap_or_default(),
            on_time_status_reported: self.get_string(row, "on_time_status"),
            notes: self.get_string(row, "notes"),
        })
    }
}

impl ShipmentFieldMapper {
    /// 提取字符串字段，支持别名列名；空白视为缺失
    fn get_string(&self, row: &HashMap<String, String>, key: &str) -> Option<String> {
        let aliases: &[&str] = match key {
            "on_time_status" => &["on_time_status", "on_time_status_reported"],
            "shipment_value_usd" => &["shipment_value_usd", "shipment_value"],
            "fuel_consumed_gallons" => &["fuel_consumed_gallons", "fuel_consumed"],
            _ => &[],
        };

        std::iter::once(key)
            .chain(aliases.iter().copied())
            .filter_map(|k| row.get(k))
            .map(|v| v.trim())
            .find(|v| !v.is_empty())
            .map(str::to_string)
    }

    fn require(
        &self,
        row: &HashMap<String, String>,
        key: &str,
        row_number: usize,
    ) -> ImportResult<String> {
        self.get_string(row, key)
            .ok_or_else(|| ImportError::RequiredFieldMissing {
                row: row_number,
                field: key.to_string(),
            })
    }

    /// 解析数值列；无法解析时返回 None 并记录告警
    fn parse_number<T: FromStr>(
        &self,
        row: &HashMap<String, String>,
        key: &str,
        row_number: usize,
    ) -> Option<T> {
        let raw = self.get_string(row, key)?;
        match raw.parse::<T>() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(row_number, field = key, value = %raw, "数值字段无法解析，置空");
                None
            }
        }
    }
}
