// ==========================================
// Maverick 物流运营 - 汇总聚合引擎
// ==========================================
// 输入: 已分类运单 + 合作方健康记录（完整快照）
// 输出: SummaryView / PartnerView（只读投影，不落库）
// 口径: 仅统计 Delivered + In-Transit
// ==========================================

use crate::domain::partner::PartnerHealthRecord;
use crate::domain::shipment::ShipmentRecord;
use crate::domain::types::{DeliveryStatus, HealthBucket, TimelinessLabel};
use crate::engine::ratio::{safe_mean, safe_percent};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::instrument;

// ==========================================
// SummaryView - 运单汇总
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryView {
    pub total: u64,
    pub delivered: u64,
    pub in_transit: u64,
    pub on_time: u64,
    /// delivered 为 0 时为 0
    pub on_time_percent: f64,
    /// 无记录时为 None
    pub average_fuel_efficiency: Option<f64>,
    /// 无有效货值时为 None
    pub average_shipment_value: Option<f64>,
    pub total_shipment_value: f64,
}

impl SummaryView {
    /// 空结果（“无数据”语义）
    pub fn empty() -> Self {
        Self {
            total: 0,
            delivered: 0,
            in_transit: 0,
            on_time: 0,
            on_time_percent: 0.0,
            average_fuel_efficiency: None,
            average_shipment_value: None,
            total_shipment_value: 0.0,
        }
    }
}

// ==========================================
// PartnerView - 合作方视图
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnerView {
    pub partner_contract: String,
    pub shipments: SummaryView,
    /// 仅包含计数 > 0 的分桶
    pub health: BTreeMap<HealthBucket, u64>,
}

impl PartnerView {
    pub fn has_data(&self) -> bool {
        self.shipments.total > 0 || !self.health.is_empty()
    }
}

// ==========================================
// AggregationEngine - 聚合引擎
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct AggregationEngine;

impl AggregationEngine {
    pub fn new() -> Self {
        Self
    }

    /// 全量汇总
    ///
    /// 非 Delivered / In-Transit 的记录在此过滤，调用方可传入未过滤集合
    #[instrument(skip(self, records), fields(count = records.len()))]
    pub fn summarize(&self, records: &[ShipmentRecord]) -> SummaryView {
        self.summarize_filtered(records.iter().filter(|r| r.delivery_status.is_reportable()))
    }

    /// 单个合作方视图
    ///
    /// 未知合作方返回全零计数与空健康分桶，不视为错误
    #[instrument(skip(self, records, health_records), fields(partner = %partner_contract))]
    pub fn summarize_partner(
        &self,
        partner_contract: &str,
        records: &[ShipmentRecord],
        health_records: &[PartnerHealthRecord],
    ) -> PartnerView {
        let shipments = self.summarize_filtered(records.iter().filter(|r| {
            r.delivery_status.is_reportable()
                && r.partner_contract.as_deref() == Some(partner_contract)
        }));

        PartnerView {
            partner_contract: partner_contract.to_string(),
            shipments,
            health: self.health_breakdown(partner_contract, health_records),
        }
    }

    /// 合作方健康分桶计数
    pub fn health_breakdown(
        &self,
        partner_contract: &str,
        health_records: &[PartnerHealthRecord],
    ) -> BTreeMap<HealthBucket, u64> {
        let mut buckets = BTreeMap::new();
        for record in health_records
            .iter()
            .filter(|h| h.partner_contract == partner_contract)
        {
            *buckets.entry(record.health).or_insert(0) += 1;
        }
        buckets
    }

    fn summarize_filtered<'a, I>(&self, records: I) -> SummaryView
    where
        I: Iterator<Item = &'a ShipmentRecord>,
    {
        let mut view = SummaryView::empty();
        let mut efficiencies = Vec::new();
        let mut values = Vec::new();

        for record in records {
            view.total += 1;
            match record.delivery_status {
                DeliveryStatus::Delivered => view.delivered += 1,
                DeliveryStatus::InTransit => view.in_transit += 1,
                _ => {}
            }
            if record.on_time_status_calculated == TimelinessLabel::OnTime {
                view.on_time += 1;
            }
            efficiencies.push(record.fuel_efficiency_mpg);
            if let Some(value) = record.shipment_value_usd {
                values.push(value);
            }
        }

        view.on_time_percent = safe_percent(view.on_time, view.delivered);
        view.average_fuel_efficiency = safe_mean(efficiencies);
        view.total_shipment_value = values.iter().filter(|v| v.is_finite()).sum();
        view.average_shipment_value = safe_mean(values);
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::timeliness::classify;
    use chrono::NaiveDate;

    fn shipment(id: &str, partner: &str, status: DeliveryStatus, actual: Option<&str>) -> ShipmentRecord {
        let planned = "2024-01-01T10:00".to_string();
        let label = classify(&planned, actual, &status);
        ShipmentRecord {
            shipment_id: id.to_string(),
            log_date: None,
            vehicle_id: None,
            driver_id: None,
            partner_contract: Some(partner.to_string()),
            origin_city: None,
            destination_city: None,
            load_type: None,
            package_count: None,
            shipment_value_usd: Some(100.0),
            planned_departure_datetime: None,
            actual_departure_datetime: None,
            planned_arrival_datetime: planned,
            actual_arrival_datetime: actual.map(str::to_string),
            miles_driven: Some(100.0),
            fuel_consumed_gallons: Some(10.0),
            fuel_efficiency_mpg: 10.0,
            delivery_status: status,
            on_time_status_reported: None,
            on_time_status_calculated: label,
            notes: None,
        }
    }

    fn health(partner: &str, task_id: i64, completed: bool) -> PartnerHealthRecord {
        PartnerHealthRecord {
            partner_contract: partner.to_string(),
            task_source_id: task_id,
            task_title: format!("task {}", task_id),
            task_completed: completed,
            health: HealthBucket::from_completed(completed),
            logged_at: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_空集合汇总() {
        let view = AggregationEngine::new().summarize(&[]);
        assert_eq!(view, SummaryView::empty());
        assert_eq!(view.on_time_percent, 0.0);
        assert_eq!(view.average_fuel_efficiency, None);
    }

    #[test]
    fn test_一准时一迟到为50() {
        let records = vec![
            shipment("S1", "P", DeliveryStatus::Delivered, Some("2024-01-01T10:10")),
            shipment("S2", "P", DeliveryStatus::Delivered, Some("2024-01-01T12:00")),
        ];
        assert_eq!(records[0].on_time_status_calculated, TimelinessLabel::OnTime);
        assert_eq!(records[1].on_time_status_calculated, TimelinessLabel::Late);

        let view = AggregationEngine::new().summarize(&records);
        assert_eq!(view.delivered, 2);
        assert_eq!(view.on_time, 1);
        assert_eq!(view.on_time_percent, 50.0);
    }

    #[test]
    fn test_仅在途时准时率为0() {
        let records = vec![
            shipment("S1", "P", DeliveryStatus::InTransit, None),
            shipment("S2", "P", DeliveryStatus::InTransit, None),
        ];
        let view = AggregationEngine::new().summarize(&records);
        assert_eq!(view.total, 2);
        assert_eq!(view.delivered, 0);
        assert_eq!(view.in_transit, 2);
        assert_eq!(view.on_time_percent, 0.0);
        assert_eq!(view.average_fuel_efficiency, Some(10.0));
    }

    #[test]
    fn test_过滤非统计状态() {
        let records = vec![
            shipment("S1", "P", DeliveryStatus::Delivered, Some("2024-01-01T10:00")),
            shipment("S2", "P", DeliveryStatus::Cancelled, None),
            shipment("S3", "P", DeliveryStatus::Pending, None),
        ];
        let view = AggregationEngine::new().summarize(&records);
        assert_eq!(view.total, 1);
        assert_eq!(view.total_shipment_value, 100.0);
        assert_eq!(view.average_shipment_value, Some(100.0));
    }

    #[test]
    fn test_货值缺失时均值为none() {
        let mut record = shipment("S1", "P", DeliveryStatus::InTransit, None);
        record.shipment_value_usd = None;
        let view = AggregationEngine::new().summarize(&[record]);
        assert_eq!(view.total, 1);
        assert_eq!(view.average_shipment_value, None);
        assert_eq!(view.total_shipment_value, 0.0);
    }

    #[test]
    fn test_合作方健康分桶() {
        let health_records = vec![
            health("P", 1, false),
            health("P", 2, true),
            health("P", 3, false),
            health("Q", 4, true),
        ];
        let engine = AggregationEngine::new();
        let view = engine.summarize_partner("P", &[], &health_records);

        assert_eq!(view.health.get(&HealthBucket::ActionRequired), Some(&2));
        assert_eq!(view.health.get(&HealthBucket::Ok), Some(&1));
        assert_eq!(view.health.len(), 2);
        assert!(view.has_data());
    }

    #[test]
    fn test_未知合作方为空结果() {
        let records = vec![shipment("S1", "P", DeliveryStatus::Delivered, Some("2024-01-01T10:00"))];
        let view = AggregationEngine::new().summarize_partner("Nobody", &records, &[health("P", 1, true)]);

        assert_eq!(view.shipments, SummaryView::empty());
        assert!(view.health.is_empty());
        assert!(!view.has_data());
    }
}
