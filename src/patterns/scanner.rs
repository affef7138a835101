/**
* filename : scanner
* author : HAMA
* date: 2025. 6. 4.
* description: 캔들/지표 패턴 탐지
**/

use std::collections::BTreeSet;

use log::debug;

use crate::config::PatternConfig;
use crate::models::{AugmentedSeries, Bar, Indicator};
use super::pattern_types::{DetectedPattern, PatternKind};

#[derive(Debug, Clone)]
pub struct PatternScanner {
  enabled: BTreeSet<PatternKind>,
  min_bars: usize,
  overbought: f64,
  oversold: f64,
}

impl Default for PatternScanner {
  fn default() -> Self {
    PatternScanner::new(&PatternConfig::default())
  }
}

impl PatternScanner {
  pub fn new(config: &PatternConfig) -> Self {
    PatternScanner {
      enabled: config.enabled.iter().copied().collect(),
      min_bars: config.min_bars,
      overbought: config.rsi_overbought,
      oversold: config.rsi_oversold,
    }
  }

  pub fn is_enabled(&self, kind: PatternKind) -> bool {
    self.enabled.contains(&kind)
  }

  pub fn set_enabled(&mut self, kind: PatternKind, enabled: bool) {
    if enabled {
      self.enabled.insert(kind);
    } else {
      self.enabled.remove(&kind);
    }
  }

  /// Scans the augmented series. Series with `min_bars` rows or fewer
  /// produce no patterns.
  pub fn scan(&self, series: &AugmentedSeries) -> Vec<DetectedPattern> {
    if series.len() <= self.min_bars {
      debug!("패턴 탐지 생략: {} 봉 (최소 {} 초과 필요)", series.len(), self.min_bars);
      return Vec::new();
    }

    let bars = series.bars();
    let mut found = Vec::new();

    for (i, bar) in bars.iter().enumerate() {
      let at = |kind| DetectedPattern::new(kind, vec![i], bar.timestamp);

      if self.is_enabled(PatternKind::Doji) && is_doji(bar) {
        found.push(at(PatternKind::Doji));
      }
      if self.is_enabled(PatternKind::Hammer) && is_hammer(bar) {
        found.push(at(PatternKind::Hammer));
      }

      if let Some(rsi) = series.value(i, Indicator::Rsi) {
        if self.is_enabled(PatternKind::RsiOverbought) && rsi > self.overbought {
          found.push(at(PatternKind::RsiOverbought));
        }
        if self.is_enabled(PatternKind::RsiOversold) && rsi < self.oversold {
          found.push(at(PatternKind::RsiOversold));
        }
      }

      if i == 0 {
        continue;
      }
      let prev = &bars[i - 1];

      if self.is_enabled(PatternKind::BullishEngulfing) && is_bullish_engulfing(prev, bar) {
        found.push(DetectedPattern::new(PatternKind::BullishEngulfing, vec![i - 1, i], bar.timestamp));
      }
      if self.is_enabled(PatternKind::BearishEngulfing) && is_bearish_engulfing(prev, bar) {
        found.push(DetectedPattern::new(PatternKind::BearishEngulfing, vec![i - 1, i], bar.timestamp));
      }

      // MACD / 시그널 교차
      match crossing(series, i, Indicator::Macd, Indicator::MacdSignal) {
        Some(Crossing::Above) if self.is_enabled(PatternKind::MacdBullishCross) => {
          found.push(at(PatternKind::MacdBullishCross));
        }
        Some(Crossing::Below) if self.is_enabled(PatternKind::MacdBearishCross) => {
          found.push(at(PatternKind::MacdBearishCross));
        }
        _ => {}
      }

      // 골든 크로스 / 데드 크로스
      match crossing(series, i, Indicator::Sma50, Indicator::Sma200) {
        Some(Crossing::Above) if self.is_enabled(PatternKind::GoldenCross) => {
          found.push(at(PatternKind::GoldenCross));
        }
        Some(Crossing::Below) if self.is_enabled(PatternKind::DeathCross) => {
          found.push(at(PatternKind::DeathCross));
        }
        _ => {}
      }
    }

    found.sort_by_key(|pattern| (pattern.kind, pattern.locations.clone()));
    debug!("패턴 {}개 탐지", found.len());
    found
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Crossing {
  Above,
  Below,
}

/// Strict sign change of `fast - slow` between rows `i-1` and `i`.
fn crossing(series: &AugmentedSeries, i: usize, fast: Indicator, slow: Indicator) -> Option<Crossing> {
  let prev_fast = series.value(i - 1, fast)?;
  let prev_slow = series.value(i - 1, slow)?;
  let fast = series.value(i, fast)?;
  let slow = series.value(i, slow)?;

  if prev_fast < prev_slow && fast > slow {
    Some(Crossing::Above)
  } else if prev_fast > prev_slow && fast < slow {
    Some(Crossing::Below)
  } else {
    None
  }
}

fn is_doji(bar: &Bar) -> bool {
  match (bar.body(), bar.range()) {
    (Some(body), Some(range)) if range > 0.0 => body / range < 0.1 && range > 1.5 * body,
    _ => false,
  }
}

fn is_hammer(bar: &Bar) -> bool {
  match (bar.body(), bar.lower_shadow(), bar.upper_shadow()) {
    (Some(body), Some(lower), Some(upper)) => {
      lower > 2.0 * body && upper < 0.1 * body && bar.is_bullish()
    }
    _ => false,
  }
}

fn is_bullish_engulfing(prev: &Bar, bar: &Bar) -> bool {
  match (prev.open, bar.open) {
    (Some(prev_open), Some(open)) => {
      prev.is_bearish() && bar.is_bullish() && open < prev.close && bar.close > prev_open
    }
    _ => false,
  }
}

fn is_bearish_engulfing(prev: &Bar, bar: &Bar) -> bool {
  match (prev.open, bar.open) {
    (Some(prev_open), Some(open)) => {
      prev.is_bullish() && bar.is_bearish() && open > prev.close && bar.close < prev_open
    }
    _ => false,
  }
}
