// ==========================================
// Maverick 物流运营 - 安全比率计算
// ==========================================
// 所有百分比 / 均值 / 两位小数取整统一在此计算
// 除数为零或结果非有限值时，返回约定的占位值（0 或 None）
// ==========================================

/// 保留两位小数（四舍五入，远离零）
///
/// `value * 100` 溢出为非有限值时原样返回（此量级已无小数位可舍入）
pub fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / 100.0
}

/// 安全比值：除数为零或结果非有限值时返回 None
pub fn safe_ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    let ratio = numerator / denominator;
    ratio.is_finite().then_some(ratio)
}

/// 安全百分比：`round2(part / whole * 100)`，whole 为 0 时返回 0
pub fn safe_percent(part: u64, whole: u64) -> f64 {
    safe_ratio(part as f64, whole as f64)
        .map(|r| round2(r * 100.0))
        .unwrap_or(0.0)
}

/// 安全均值：`round2(mean)`，无有效值时返回 None
///
/// 非有限值（NaN / ∞）不参与计算
pub fn safe_mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((0.0_f64, 0_u64), |(sum, count), v| (sum + v, count + 1));

    safe_ratio(sum, count as f64).map(round2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(33.333333), 33.33);
        assert_eq!(round2(66.666666), 66.67);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn test_round2_极大值不溢出() {
        assert_eq!(round2(1e307), 1e307);
        assert_eq!(round2(-1e307), -1e307);
        assert_eq!(round2(f64::MAX), f64::MAX);
        assert!(round2(f64::NAN).is_nan());
        // 极大但有限的比值求均值仍为有限值
        assert_eq!(safe_mean(vec![1e307, 1e307]), Some(1e307));
    }

    #[test]
    fn test_safe_ratio_zero_divisor() {
        assert_eq!(safe_ratio(5.0, 0.0), None);
        assert_eq!(safe_ratio(0.0, 0.0), None);
        assert_eq!(safe_ratio(1.0, 4.0), Some(0.25));
    }

    #[test]
    fn test_safe_percent_零分母返回0() {
        assert_eq!(safe_percent(0, 0), 0.0);
        assert_eq!(safe_percent(3, 0), 0.0);
        assert_eq!(safe_percent(1, 2), 50.0);
        assert_eq!(safe_percent(2, 3), 66.67);
    }

    #[test]
    fn test_safe_mean() {
        assert_eq!(safe_mean(Vec::<f64>::new()), None);
        assert_eq!(safe_mean(vec![1.0, 2.0, 4.0]), Some(2.33));
        assert_eq!(safe_mean(vec![f64::NAN, 3.0]), Some(3.0));
    }
}
