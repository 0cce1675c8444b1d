// ==========================================
// Maverick 物流运营 - 运营查询 API
// ==========================================
// 职责: 读取仓储快照 → AggregationEngine → 响应 DTO
// 视图: 全量汇总 / 单合作方状态 / 合作方列表
// 约束: 只读；未知合作方返回空结果而非错误
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::types::HealthBucket;
use crate::engine::aggregator::{AggregationEngine, PartnerView, SummaryView};
use crate::repository::{PartnerTaskRepository, ShipmentRepository};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};
use tracing::{debug, instrument};

/// 汇总报表日期标签（数据未按日切分）
pub const OVERALL_REPORT_LABEL: &str = "Overall";

// ==========================================
// 响应 DTO
// ==========================================

/// 全量汇总响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummaryResponse {
    pub report_date: String,
    pub total_shipments_logged: u64,
    pub shipments_in_transit: u64,
    pub delivered_shipments: u64,
    pub on_time_delivery_percent: f64,
    pub average_fleet_mpg: Option<f64>,
    pub average_shipment_value_usd: Option<f64>,
    pub total_value_shipped_usd: f64,
}

impl From<SummaryView> for DailySummaryResponse {
    fn from(view: SummaryView) -> Self {
        Self {
            report_date: OVERALL_REPORT_LABEL.to_string(),
            total_shipments_logged: view.total,
            shipments_in_transit: view.in_transit,
            delivered_shipments: view.delivered,
            on_time_delivery_percent: view.on_time_percent,
            average_fleet_mpg: view.average_fuel_efficiency,
            average_shipment_value_usd: view.average_shipment_value,
            total_value_shipped_usd: view.total_shipment_value,
        }
    }
}

/// 合作方运单指标
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnerShipmentMetrics {
    pub total_shipments_with_partner: u64,
    pub delivered_by_partner: u64,
    pub in_transit_with_partner: u64,
    pub on_time_delivery_percent_partner: f64,
    pub average_fuel_efficiency_partner: Option<f64>,
    pub average_shipment_value_usd_partner: Option<f64>,
}

/// 合作方状态响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnerStatusResponse {
    pub partner_contract: String,
    /// false 表示“无数据”（未知合作方或尚未导入）
    pub has_data: bool,
    pub shipment_metrics: PartnerShipmentMetrics,
    pub partner_service_health_summary: BTreeMap<HealthBucket, u64>,
}

impl From<PartnerView> for PartnerStatusResponse {
    fn from(view: PartnerView) -> Self {
        let has_data = view.has_data();
        let s = view.shipments;
        Self {
            partner_contract: view.partner_contract,
            has_data,
            shipment_metrics: PartnerShipmentMetrics {
                total_shipments_with_partner: s.total,
                delivered_by_partner: s.delivered,
                in_transit_with_partner: s.in_transit,
                on_time_delivery_percent_partner: s.on_time_percent,
                average_fuel_efficiency_partner: s.average_fuel_efficiency,
                average_shipment_value_usd_partner: s.average_shipment_value,
            },
            partner_service_health_summary: view.health,
        }
    }
}

// ==========================================
// OperationsApi - 运营查询 API
// ==========================================
pub struct OperationsApi {
    shipment_repo: Arc<ShipmentRepository>,
    partner_task_repo: Arc<PartnerTaskRepository>,
    engine: AggregationEngine,
}

impl OperationsApi {
    pub fn new(
        shipment_repo: Arc<ShipmentRepository>,
        partner_task_repo: Arc<PartnerTaskRepository>,
    ) -> Self {
        Self {
            shipment_repo,
            partner_task_repo,
            engine: AggregationEngine::new(),
        }
    }

    /// 基于共享连接创建
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self::new(
            Arc::new(ShipmentRepository::from_connection(conn.clone())),
            Arc::new(PartnerTaskRepository::from_connection(conn)),
        )
    }

    /// 全量汇总（Delivered + In-Transit）
    #[instrument(skip(self))]
    pub fn get_daily_summary(&self) -> ApiResult<DailySummaryResponse> {
        let records = self.shipment_repo.list_reportable(None)?;
        let view = self.engine.summarize(&records);
        debug!(total = view.total, on_time_percent = view.on_time_percent, "汇总完成");
        Ok(view.into())
    }

    /// 单个合作方状态
    ///
    /// # 返回
    /// - Err(InvalidInput): 合作方名称为空
    /// - Ok(has_data = false): 未知合作方
    #[instrument(skip(self))]
    pub fn get_partner_status(&self, partner_contract: &str) -> ApiResult<PartnerStatusResponse> {
        let partner = partner_contract.trim();
        if partner.is_empty() {
            return Err(ApiError::InvalidInput("合作方名称不能为空".to_string()));
        }

        let records = self.shipment_repo.list_reportable(Some(partner))?;
        let health = self.partner_task_repo.list_by_partner(Some(partner))?;
        let view = self.engine.summarize_partner(partner, &records, &health);
        if !view.has_data() {
            debug!(partner = %partner, "合作方无数据");
        }
        Ok(view.into())
    }

    /// 全部合作方（运单与任务并集，升序）
    pub fn list_partners(&self) -> ApiResult<Vec<String>> {
        let mut partners: BTreeSet<String> =
            self.shipment_repo.list_partner_contracts()?.into_iter().collect();
        partners.extend(self.partner_task_repo.list_partner_contracts()?);
        Ok(partners.into_iter().collect())
    }
}
