/**
* filename : oscillators
* author : HAMA
* date: 2025. 6. 2.
* description: RSI, 모멘텀, 변화율
**/

use crate::models::Column;
use crate::utils::math::{percent_change, ratio_percent};
use super::moving_averages::ExponentialMovingAverage;

#[derive(Debug)]
pub struct RelativeStrengthIndex {
  name: String,
  period: usize,
  avg_gain: ExponentialMovingAverage,
  avg_loss: ExponentialMovingAverage,
  prev_price: Option<f64>,
}

impl RelativeStrengthIndex {
  pub fn new(period: usize) -> Self {
    RelativeStrengthIndex {
      name: format!("RSI-{}", period),
      period,
      avg_gain: ExponentialMovingAverage::wilder(period),
      avg_loss: ExponentialMovingAverage::wilder(period),
      prev_price: None,
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn period(&self) -> usize {
    self.period
  }

  /// 첫 RSI 값은 period번째 변화량이 들어온 봉(인덱스 period)에서 나온다.
  pub fn update(&mut self, price: f64) -> Option<f64> {
    let prev_price = self.prev_price.replace(price)?;

    // 이전 가격과 비교하여 gain/loss 계산
    let change = price - prev_price;
    let gain = if change > 0.0 { change } else { 0.0 };
    let loss = if change < 0.0 { -change } else { 0.0 };

    self.avg_gain.update(Some(gain));
    self.avg_loss.update(Some(loss));

    self.value()
  }

  pub fn value(&self) -> Option<f64> {
    let avg_gain = self.avg_gain.value()?;
    let avg_loss = self.avg_loss.value()?;

    // 평균 하락폭이 0이면 100
    if avg_loss == 0.0 {
      return Some(100.0);
    }

    // RSI = 100 - (100 / (1 + RS))
    let rs = avg_gain / avg_loss;
    Some(100.0 - (100.0 / (1.0 + rs)))
  }

  pub fn is_ready(&self) -> bool {
    self.avg_gain.is_ready() && self.avg_loss.is_ready()
  }

  pub fn reset(&mut self) {
    self.avg_gain.reset();
    self.avg_loss.reset();
    self.prev_price = None;
  }
}

pub fn rsi(closes: &[f64], period: usize) -> Column {
  let mut rsi = RelativeStrengthIndex::new(period);
  closes.iter().map(|&close| rsi.update(close)).collect()
}

/// `close[i] / close[i-lookback] * 100`
pub fn momentum(closes: &[f64], lookback: usize) -> Column {
  lookback_map(closes, lookback, |base, current| ratio_percent(current, base))
}

/// `(close[i] / close[i-lookback] - 1) * 100`
pub fn rate_of_change(closes: &[f64], lookback: usize) -> Column {
  lookback_map(closes, lookback, percent_change)
}

fn lookback_map<F>(closes: &[f64], lookback: usize, f: F) -> Column
where
  F: Fn(f64, f64) -> Option<f64>,
{
  closes
    .iter()
    .enumerate()
    .map(|(i, &current)| {
      if lookback == 0 || i < lookback {
        None
      } else {
        f(closes[i - lookback], current)
      }
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_rsi_first_value_at_period() {
    let closes = [1.0, 2.0, 1.5, 2.5, 3.0];
    let out = rsi(&closes, 3);

    assert!(out[..3].iter().all(Option::is_none));
    // 변화량 +1.0, -0.5, +1.0 → gain 2/3, loss 1/6
    let rs = (2.0 / 3.0) / (0.5 / 3.0);
    assert!((out[3].unwrap() - (100.0 - 100.0 / (1.0 + rs))).abs() < 1e-9);

    // 와일더 스무딩: 다음 변화량 +0.5
    let gain = ((2.0 / 3.0) * 2.0 + 0.5) / 3.0;
    let loss = ((0.5 / 3.0) * 2.0) / 3.0;
    assert!((out[4].unwrap() - (100.0 - 100.0 / (1.0 + gain / loss))).abs() < 1e-9);
  }

  #[test]
  fn test_rsi_without_losses_is_100() {
    let closes: Vec<f64> = (0..20).map(|i| 10.0 + i as f64).collect();
    let out = rsi(&closes, 14);
    assert!(out[14..].iter().all(|v| *v == Some(100.0)));
  }

  #[test]
  fn test_rsi_without_gains_is_0() {
    let closes: Vec<f64> = (0..20).map(|i| 100.0 - i as f64).collect();
    let out = rsi(&closes, 14);
    assert!(out[14..].iter().all(|v| *v == Some(0.0)));
  }

  #[test]
  fn test_rsi_needs_period_plus_one_bars() {
    assert!(rsi(&[1.0, 2.0, 3.0], 3).iter().all(Option::is_none));
    assert!(rsi(&[], 14).is_empty());
  }

  #[test]
  fn test_momentum_and_roc() {
    let closes = [50.0, 60.0, 75.0];
    assert_eq!(momentum(&closes, 2), vec![None, None, Some(150.0)]);
    assert_eq!(rate_of_change(&closes, 2), vec![None, None, Some(50.0)]);
  }

  #[test]
  fn test_zero_base_is_undefined() {
    let closes = [0.0, 1.0, 2.0];
    assert_eq!(momentum(&closes, 2), vec![None, None, None]);
    assert_eq!(rate_of_change(&closes, 1), vec![None, None, Some(100.0)]);
  }
}
