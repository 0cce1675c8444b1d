// ==========================================
// Maverick 物流运营 - 领域类型定义
// ==========================================
// 交付状态 / 准时标签 / 合作方健康分桶
// 序列化字符串与数据库列值保持一致
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 交付状态 (Delivery Status)
// ==========================================
// 数据库值: Pending / In-Transit / Delivered / Cancelled
// 未知值保留原文，避免整行丢失
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeliveryStatus {
    Pending,   // 待发运
    InTransit, // 在途
    Delivered, // 已送达
    Cancelled, // 已取消
    Other(String),
}

impl DeliveryStatus {
    /// 从源数据字符串解析（去除首尾空白，大小写敏感与源系统一致）
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "Pending" => DeliveryStatus::Pending,
            "In-Transit" => DeliveryStatus::InTransit,
            "Delivered" => DeliveryStatus::Delivered,
            "Cancelled" => DeliveryStatus::Cancelled,
            other => DeliveryStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            DeliveryStatus::Pending => "Pending",
            DeliveryStatus::InTransit => "In-Transit",
            DeliveryStatus::Delivered => "Delivered",
            DeliveryStatus::Cancelled => "Cancelled",
            DeliveryStatus::Other(s) => s.as_str(),
        }
    }

    /// 是否计入汇总口径（已送达 + 在途）
    pub fn is_reportable(&self) -> bool {
        matches!(self, DeliveryStatus::Delivered | DeliveryStatus::InTransit)
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DeliveryStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DeliveryStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(DeliveryStatus::parse(&raw))
    }
}

// ==========================================
// 准时标签 (Timeliness Label)
// ==========================================
// 数据库列: on_time_status_calculated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimelinessLabel {
    Pending, // 未送达或无实际到达时间
    #[serde(rename = "On-Time")]
    OnTime,  // 宽限窗口内送达
    Late,    // 超出宽限窗口
    Error,   // 时间戳无法解析
}

impl TimelinessLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimelinessLabel::Pending => "Pending",
            TimelinessLabel::OnTime => "On-Time",
            TimelinessLabel::Late => "Late",
            TimelinessLabel::Error => "Error",
        }
    }

    /// 从数据库字符串解析，无法识别时归为 Error
    pub fn from_db_str(s: &str) -> Self {
        match s {
            "Pending" => TimelinessLabel::Pending,
            "On-Time" => TimelinessLabel::OnTime,
            "Late" => TimelinessLabel::Late,
            _ => TimelinessLabel::Error,
        }
    }
}

impl fmt::Display for TimelinessLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==========================================
// 合作方健康分桶 (Health Bucket)
// ==========================================
// 数据库列: simulated_service_health
// 顺序: ActionRequired < OK（BTreeMap 输出顺序）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HealthBucket {
    #[serde(rename = "Action Required")]
    ActionRequired,
    #[serde(rename = "OK")]
    Ok,
}

impl HealthBucket {
    /// 任务完成 → OK；未完成 → Action Required
    pub fn from_completed(completed: bool) -> Self {
        if completed {
            HealthBucket::Ok
        } else {
            HealthBucket::ActionRequired
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthBucket::ActionRequired => "Action Required",
            HealthBucket::Ok => "OK",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Action Required" => Some(HealthBucket::ActionRequired),
            "OK" => Some(HealthBucket::Ok),
            _ => None,
        }
    }
}

impl fmt::Display for HealthBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
