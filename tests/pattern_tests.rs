//! 패턴 탐지 통합 테스트
//!
//! 파이프라인 결과에 대해 교차/캔들 패턴 탐지 검증

use rstest::rstest;
use xChart::config::PatternConfig;
use xChart::data::SampleGenerator;
use xChart::patterns::PatternBias;
use xChart::{compute, Bar, Indicator, PatternKind, PatternScanner, Series};

/// 하락 후 상승하는 V자 종가. SMA-50이 SMA-200을 정확히 한 번 상향 돌파한다.
fn v_shape() -> Vec<f64> {
  (0..370)
    .map(|i| if i < 220 { 300.0 - i as f64 } else { 81.0 + (i - 219) as f64 })
    .collect()
}

fn close_series(closes: impl IntoIterator<Item = f64>) -> Series {
  closes
    .into_iter()
    .enumerate()
    .map(|(i, close)| Bar::close_only(i as i64, close))
    .collect()
}

fn count(patterns: &[xChart::DetectedPattern], kind: PatternKind) -> usize {
  patterns.iter().filter(|p| p.kind == kind).count()
}

#[rstest]
#[case(false, PatternKind::GoldenCross, PatternKind::DeathCross)]
#[case(true, PatternKind::DeathCross, PatternKind::GoldenCross)]
fn test_single_sma_cross(#[case] mirrored: bool, #[case] expected: PatternKind, #[case] absent: PatternKind) {
  let closes = v_shape().into_iter().map(|c| if mirrored { 400.0 - c } else { c });
  let augmented = compute(&close_series(closes));
  let patterns = PatternScanner::default().scan(&augmented);

  assert_eq!(count(&patterns, expected), 1);
  assert_eq!(count(&patterns, absent), 0);

  let cross = patterns.iter().find(|p| p.kind == expected).unwrap();
  let at = cross.locations[0];
  let diff = |i: usize| augmented.value(i, Indicator::Sma50).unwrap() - augmented.value(i, Indicator::Sma200).unwrap();
  assert!(diff(at - 1).signum() != diff(at).signum());
}

#[test]
fn test_uptrend_is_overbought() {
  let augmented = compute(&close_series((0..100).map(|i| 100.0 + i as f64)));
  let patterns = PatternScanner::default().scan(&augmented);

  assert!(count(&patterns, PatternKind::RsiOverbought) > 0);
  assert_eq!(count(&patterns, PatternKind::RsiOversold), 0);
  assert!(patterns
    .iter()
    .filter(|p| p.kind == PatternKind::RsiOverbought)
    .all(|p| p.bias() == PatternBias::Bearish && p.id().starts_with("rsi-overbought-")));
}

#[test]
fn test_min_bars_threshold() {
  // 워밍업 제거 후 30봉
  let augmented = compute(&close_series((0..49).map(|i| 100.0 + i as f64)));
  assert_eq!(augmented.len(), 30);
  assert!(PatternScanner::default().scan(&augmented).is_empty());

  let config = PatternConfig { min_bars: 10, ..PatternConfig::default() };
  assert!(!PatternScanner::new(&config).scan(&augmented).is_empty());
}

#[test]
fn test_results_are_sorted() {
  let augmented = compute(&SampleGenerator::new(3).generate(300).unwrap());
  let patterns = PatternScanner::default().scan(&augmented);

  let keys: Vec<_> = patterns.iter().map(|p| (p.kind, p.locations.clone())).collect();
  let mut sorted = keys.clone();
  sorted.sort();
  assert_eq!(keys, sorted);

  for pattern in &patterns {
    assert!(pattern.locations.iter().all(|&i| i < augmented.len()));
  }
}
