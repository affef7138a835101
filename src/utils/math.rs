//! 수학 관련 유틸리티
//!
//! 평균, 안전한 나눗셈, 비율 계산 함수 제공

/// 평균 계산
pub fn average(values: &[f64]) -> Option<f64> {
  if values.is_empty() {
    return None;
  }

  Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// 분모가 0이거나 결과가 유한하지 않으면 None
pub fn safe_div(numerator: f64, denominator: f64) -> Option<f64> {
  if denominator == 0.0 {
    return None;
  }

  let value = numerator / denominator;
  value.is_finite().then_some(value)
}

/// 두 값의 비율 (백분율 스케일)
pub fn ratio_percent(numerator: f64, denominator: f64) -> Option<f64> {
  safe_div(numerator, denominator).map(|r| r * 100.0)
}

/// 변화율 (백분율)
pub fn percent_change(base: f64, current: f64) -> Option<f64> {
  safe_div(current, base).map(|r| (r - 1.0) * 100.0)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_average() {
    assert_eq!(average(&[]), None);
    assert_eq!(average(&[1.0, 2.0, 3.0]), Some(2.0));
  }

  #[test]
  fn test_safe_div() {
    assert_eq!(safe_div(1.0, 0.0), None);
    assert_eq!(safe_div(0.0, 0.0), None);
    assert_eq!(safe_div(3.0, 2.0), Some(1.5));
    assert_eq!(safe_div(f64::MAX, 1e-300), None);
  }

  #[test]
  fn test_ratio_and_change() {
    assert!((ratio_percent(110.0, 100.0).unwrap() - 110.0).abs() < 1e-9);
    assert!((percent_change(100.0, 110.0).unwrap() - 10.0).abs() < 1e-9);
    assert_eq!(percent_change(0.0, 110.0), None);
  }
}
