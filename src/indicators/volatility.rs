/**
* filename : volatility
* author : HAMA
* date: 2025. 6. 2.
* description: 볼린저 밴드, TR/ATR, 변동성, 고가/저가 대비 거리
**/

use crate::models::Column;
use crate::utils::math::{ratio_percent, safe_div};
use super::moving_averages::{sma, wilder};
use super::window::{Extreme, RollingExtreme, RollingWindow};

#[derive(Debug, Clone, PartialEq)]
pub struct BollingerBands {
  pub middle: Column,
  pub std_dev: Column,
  pub upper: Column,
  pub lower: Column,
}

/// Population standard deviation over the trailing `period` values,
/// current value included.
pub fn rolling_std_dev(source: &[Option<f64>], period: usize) -> Column {
  let mut window = RollingWindow::new(period);
  source
    .iter()
    .map(|&value| {
      match value {
        Some(v) => window.push(v),
        None => window.clear(),
      }
      window.population_std_dev()
    })
    .collect()
}

pub fn bollinger(source: &[Option<f64>], period: usize, width: f64) -> BollingerBands {
  let middle = sma(source, period);
  let std_dev = rolling_std_dev(source, period);

  let (upper, lower) = middle
    .iter()
    .zip(&std_dev)
    .map(|(&mid, &std)| match (mid, std) {
      (Some(mid), Some(std)) => (Some(mid + width * std), Some(mid - width * std)),
      _ => (None, None),
    })
    .unzip();

  BollingerBands { middle, std_dev, upper, lower }
}

/// `max(h-l, |h-c_prev|, |l-c_prev|)`; undefined on the first bar and
/// wherever high or low is missing.
pub fn true_range(highs: &[Option<f64>], lows: &[Option<f64>], closes: &[f64]) -> Column {
  (0..closes.len())
    .map(|i| {
      if i == 0 {
        return None;
      }
      let high = highs.get(i).copied().flatten()?;
      let low = lows.get(i).copied().flatten()?;
      let prev_close = closes[i - 1];

      let range = high - low;
      let gap_up = (high - prev_close).abs();
      let gap_down = (low - prev_close).abs();
      Some(range.max(gap_up).max(gap_down))
    })
    .collect()
}

/// Wilder-smoothed true range; the first value lands `period` bars after
/// the first defined TR.
pub fn average_true_range(true_range: &[Option<f64>], period: usize) -> Column {
  wilder(true_range, period)
}

/// `stdDev(close[i-period..i]) / close[i] * 100`. The window excludes the
/// current bar.
pub fn trailing_volatility(closes: &[f64], period: usize) -> Column {
  let mut window = RollingWindow::new(period);
  closes
    .iter()
    .map(|&close| {
      let value = window
        .population_std_dev()
        .and_then(|std| ratio_percent(std, close));
      window.push(close);
      value
    })
    .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtremeDistance {
  pub from_high: Column,
  pub from_low: Column,
}

/// `close[i] / max(high[i-period..i])` and `close[i] / min(low[i-period..i])`.
/// Both windows exclude the current bar.
pub fn distance_from_extremes(
  highs: &[Option<f64>],
  lows: &[Option<f64>],
  closes: &[f64],
  period: usize,
) -> ExtremeDistance {
  let highest = trailing_extreme(highs, period, Extreme::Max);
  let lowest = trailing_extreme(lows, period, Extreme::Min);

  let ratio = |extremes: &[Option<f64>]| -> Column {
    closes
      .iter()
      .zip(extremes)
      .map(|(&close, &extreme)| extreme.and_then(|e| safe_div(close, e)))
      .collect()
  };

  ExtremeDistance {
    from_high: ratio(&highest),
    from_low: ratio(&lowest),
  }
}

/// Extreme of the `period` values strictly before each index.
fn trailing_extreme(source: &[Option<f64>], period: usize, extreme: Extreme) -> Column {
  let mut window = RollingExtreme::new(period, extreme);
  source
    .iter()
    .map(|&value| {
      let current = window.current();
      match value {
        Some(v) => window.push(v),
        None => window.clear(),
      }
      current
    })
    .collect()
}
