// ==========================================
// Maverick 物流运营 - 运单实体
// ==========================================
// 来源: 每日运单日志 (CSV / Excel)
// 生命周期: 导入时创建，之后只读
// ==========================================

use crate::domain::types::{DeliveryStatus, TimelinessLabel};
use serde::{Deserialize, Serialize};

// ==========================================
// RawShipmentRow - 字段映射后的中间结构
// ==========================================
// 时间戳保留原始字符串，解析交给分类器
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawShipmentRow {
    pub row_number: usize,
    pub shipment_id: String,
    pub log_date: Option<String>,
    pub vehicle_id: Option<String>,
    pub driver_id: Option<String>,
    pub partner_contract: Option<String>,
    pub origin_city: Option<String>,
    pub destination_city: Option<String>,
    pub load_type: Option<String>,
    pub package_count: Option<i64>,
    pub shipment_value_usd: Option<f64>,
    pub planned_departure_datetime: Option<String>,
    pub actual_departure_datetime: Option<String>,
    pub planned_arrival_datetime: String,
    pub actual_arrival_datetime: Option<String>,
    pub miles_driven: Option<f64>,
    pub fuel_consumed_gallons: Option<f64>,
    pub delivery_status: String,
    pub on_time_status_reported: Option<String>,
    pub notes: Option<String>,
}

// ==========================================
// ShipmentRecord - 已分类运单
// ==========================================
/// 落库的运单记录
///
/// `fuel_efficiency_mpg` 与 `on_time_status_calculated` 在导入时派生一次，
/// 查询时不再重算。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentRecord {
    pub shipment_id: String,
    pub log_date: Option<String>,
    pub vehicle_id: Option<String>,
    pub driver_id: Option<String>,
    pub partner_contract: Option<String>,
    pub origin_city: Option<String>,
    pub destination_city: Option<String>,
    pub load_type: Option<String>,
    pub package_count: Option<i64>,
    pub shipment_value_usd: Option<f64>,
    pub planned_departure_datetime: Option<String>,
    pub actual_departure_datetime: Option<String>,
    pub planned_arrival_datetime: String,
    pub actual_arrival_datetime: Option<String>,
    pub miles_driven: Option<f64>,
    pub fuel_consumed_gallons: Option<f64>,
    pub fuel_efficiency_mpg: f64,
    pub delivery_status: DeliveryStatus,
    pub on_time_status_reported: Option<String>,
    pub on_time_status_calculated: TimelinessLabel,
    pub notes: Option<String>,
}
