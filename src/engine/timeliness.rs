// ==========================================
// Maverick 物流运营 - 准时分类引擎
// ==========================================
// 规则: 单一阈值（计划到达 + 宽限分钟，含边界）
// 输入: 计划到达 / 实际到达 / 交付状态
// 输出: TimelinessLabel；全函数，不抛错
// ==========================================

use crate::domain::types::{DeliveryStatus, TimelinessLabel};
use crate::engine::ratio::{round2, safe_ratio};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};

/// 默认宽限窗口（分钟）
pub const DEFAULT_GRACE_MINUTES: i64 = 15;

/// 宽限窗口上限（一年）
pub const MAX_GRACE_MINUTES: i64 = 365 * 24 * 60;

// 依次尝试的本地时间格式（不做时区换算）
const LOCAL_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// 解析 ISO-8601 本地时间
///
/// 支持 `T` 或空格分隔、可选秒与小数秒、纯日期（零点）。
/// 带偏移量的 RFC 3339 字符串保留墙上时间，丢弃偏移量。
pub fn parse_local_datetime(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in LOCAL_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

// ==========================================
// TimelinessClassifier - 准时分类器
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct TimelinessClassifier {
    grace: Duration,
}

impl Default for TimelinessClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_GRACE_MINUTES)
    }
}

impl TimelinessClassifier {
    /// 创建分类器
    ///
    /// # 参数
    /// - grace_minutes: 宽限窗口分钟数（截断到 0..=MAX_GRACE_MINUTES）
    pub fn new(grace_minutes: i64) -> Self {
        Self {
            grace: Duration::minutes(grace_minutes.clamp(0, MAX_GRACE_MINUTES)),
        }
    }

    pub fn grace_minutes(&self) -> i64 {
        self.grace.num_minutes()
    }

    /// 判定单条运单的准时标签
    ///
    /// 1. 实际到达为空 或 状态非 Delivered → Pending
    /// 2. 任一时间戳无法解析 → Error
    /// 3. 实际 <= 计划 + 宽限 → OnTime，否则 Late
    pub fn classify(
        &self,
        planned_arrival: &str,
        actual_arrival: Option<&str>,
        delivery_status: &DeliveryStatus,
    ) -> TimelinessLabel {
        let actual_raw = match actual_arrival.map(str::trim) {
            Some(a) if !a.is_empty() => a,
            _ => return TimelinessLabel::Pending,
        };
        if *delivery_status != DeliveryStatus::Delivered {
            return TimelinessLabel::Pending;
        }

        let (planned, actual) = match (
            parse_local_datetime(planned_arrival),
            parse_local_datetime(actual_raw),
        ) {
            (Some(p), Some(a)) => (p, a),
            _ => return TimelinessLabel::Error,
        };

        // 计划时间接近上限时加法可能溢出，溢出视为无法判定
        match planned.checked_add_signed(self.grace) {
            Some(deadline) if actual <= deadline => TimelinessLabel::OnTime,
            Some(_) => TimelinessLabel::Late,
            None => TimelinessLabel::Error,
        }
    }
}

/// 使用默认 15 分钟宽限窗口分类
pub fn classify(
    planned_arrival: &str,
    actual_arrival: Option<&str>,
    delivery_status: &DeliveryStatus,
) -> TimelinessLabel {
    TimelinessClassifier::default().classify(planned_arrival, actual_arrival, delivery_status)
}

/// 燃油效率（英里/加仑），保留两位小数
///
/// 里程或油耗缺失、油耗 <= 0、结果非有限值 → 0
pub fn fuel_efficiency(miles_driven: Option<f64>, fuel_consumed_gallons: Option<f64>) -> f64 {
    match (miles_driven, fuel_consumed_gallons) {
        (Some(miles), Some(fuel)) if fuel > 0.0 => {
            safe_ratio(miles, fuel).map(round2).unwrap_or(0.0)
        }
        _ => 0.0,
    }
}
