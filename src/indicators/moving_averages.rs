/**
* filename : moving_averages
* author : HAMA
* date: 2025. 6. 2.
* description: 단순/지수/와일더 이동평균
**/

use crate::models::Column;
use crate::utils::math::average;
use super::window::RollingWindow;

#[derive(Debug)]
pub struct SimpleMovingAverage {
  name: String,
  window: RollingWindow,
}

impl SimpleMovingAverage {
  pub fn new(period: usize) -> Self {
    SimpleMovingAverage {
      name: format!("SMA-{}", period),
      window: RollingWindow::new(period),
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn period(&self) -> usize {
    self.window.period()
  }

  /// 미정의 값이 들어오면 윈도우를 비우고 다시 워밍업한다.
  pub fn update(&mut self, value: Option<f64>) -> Option<f64> {
    match value {
      Some(v) => self.window.push(v),
      None => self.window.clear(),
    }

    self.window.mean()
  }

  pub fn is_ready(&self) -> bool {
    self.window.is_full()
  }

  pub fn reset(&mut self) {
    self.window.clear();
  }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Smoothing {
  /// `x*k + prev*(1-k)`, `k = 2/(p+1)`
  Exponential(f64),
  /// `(prev*(p-1) + x)/p`
  Wilder,
}

/// Recursive average seeded with the simple mean of its first `period`
/// defined inputs. Leading undefined inputs are skipped; an undefined input
/// after the first defined one halts the average for good.
#[derive(Debug)]
pub struct ExponentialMovingAverage {
  name: String,
  period: usize,
  smoothing: Smoothing,
  seed: Vec<f64>,
  current: Option<f64>,
  halted: bool,
}

impl ExponentialMovingAverage {
  pub fn new(period: usize) -> Self {
    let k = 2.0 / (period as f64 + 1.0);
    Self::with_smoothing(format!("EMA-{}", period), period, Smoothing::Exponential(k))
  }

  /// Wilder smoothing (multiplier `1/period`), used by RSI and ATR.
  pub fn wilder(period: usize) -> Self {
    Self::with_smoothing(format!("WILDER-{}", period), period, Smoothing::Wilder)
  }

  fn with_smoothing(name: String, period: usize, smoothing: Smoothing) -> Self {
    ExponentialMovingAverage {
      name,
      period,
      smoothing,
      seed: Vec::with_capacity(period),
      current: None,
      halted: false,
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn period(&self) -> usize {
    self.period
  }

  pub fn update(&mut self, value: Option<f64>) -> Option<f64> {
    if self.halted || self.period == 0 {
      return None;
    }

    let value = match value {
      Some(v) => v,
      None => {
        if self.current.is_some() || !self.seed.is_empty() {
          self.halted = true;
          self.current = None;
        }
        return None;
      }
    };

    match self.current {
      Some(prev) => {
        let next = match self.smoothing {
          Smoothing::Exponential(k) => value * k + prev * (1.0 - k),
          Smoothing::Wilder => {
            let p = self.period as f64;
            (prev * (p - 1.0) + value) / p
          }
        };
        self.current = Some(next);
      }
      None => {
        // 처음 period개의 값으로 SMA 계산하여 초기화
        self.seed.push(value);
        if self.seed.len() == self.period {
          self.current = average(&self.seed);
          self.seed.clear();
        }
      }
    }

    self.current
  }

  pub fn value(&self) -> Option<f64> {
    self.current
  }

  pub fn is_ready(&self) -> bool {
    self.current.is_some()
  }

  pub fn reset(&mut self) {
    self.seed.clear();
    self.current = None;
    self.halted = false;
  }
}

/// Lifts a fully-defined series into a column.
pub fn defined(values: &[f64]) -> Column {
  values.iter().copied().map(Some).collect()
}

/// `out[i] = mean(src[i-p+1..=i])`, defined only when every value in the
/// trailing window is defined.
pub fn sma(source: &[Option<f64>], period: usize) -> Column {
  let mut average = SimpleMovingAverage::new(period);
  source.iter().map(|&value| average.update(value)).collect()
}

/// SMA-seeded EMA with `k = 2/(period+1)`.
pub fn ema(source: &[Option<f64>], period: usize) -> Column {
  let mut average = ExponentialMovingAverage::new(period);
  source.iter().map(|&value| average.update(value)).collect()
}

/// SMA-seeded Wilder average.
pub fn wilder(source: &[Option<f64>], period: usize) -> Column {
  let mut average = ExponentialMovingAverage::wilder(period);
  source.iter().map(|&value| average.update(value)).collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use rstest::rstest;

  fn approx(a: Option<f64>, b: f64) -> bool {
    a.map_or(false, |a| (a - b).abs() < 1e-9)
  }

  #[rstest]
  #[case(1)]
  #[case(3)]
  #[case(5)]
  fn test_sma_warm_up(#[case] period: usize) {
    let closes: Vec<f64> = (1..=10).map(|v| v as f64).collect();
    let out = sma(&defined(&closes), period);

    for (i, value) in out.iter().enumerate() {
      if i + 1 < period {
        assert!(value.is_none());
      } else {
        let window = &closes[i + 1 - period..=i];
        let mean = window.iter().sum::<f64>() / period as f64;
        assert!(approx(*value, mean), "index {} period {}", i, period);
      }
    }
  }

  #[test]
  fn test_sma_restarts_after_gap() {
    let source = vec![Some(1.0), Some(2.0), None, Some(4.0), Some(6.0)];
    assert_eq!(sma(&source, 2), vec![None, Some(1.5), None, None, Some(5.0)]);
  }

  #[test]
  fn test_ema_seed_is_simple_mean() {
    let source = defined(&[2.0, 4.0, 6.0, 8.0]);
    let out = ema(&source, 3);
    assert_eq!(out[0], None);
    assert_eq!(out[1], None);
    assert_eq!(out[2], Some(4.0));
    // k = 0.5
    assert_eq!(out[3], Some(6.0));
  }

  #[test]
  fn test_ema_skips_leading_undefined() {
    let source = vec![None, None, Some(3.0), Some(5.0), Some(7.0)];
    let out = ema(&source, 2);
    assert_eq!(&out[..3], &[None, None, None]);
    assert_eq!(out[3], Some(4.0));
    assert!(approx(out[4], 6.0));
  }

  #[test]
  fn test_ema_halts_on_gap() {
    let source = vec![Some(1.0), Some(3.0), Some(5.0), None, Some(7.0), Some(9.0)];
    let out = ema(&source, 2);
    assert!(out[1].is_some());
    assert!(out[2].is_some());
    assert!(out[3..].iter().all(Option::is_none));
  }

  #[test]
  fn test_ema_shorter_than_period() {
    assert!(ema(&defined(&[1.0, 2.0]), 5).iter().all(Option::is_none));
    assert!(ema(&defined(&[1.0, 2.0]), 0).iter().all(Option::is_none));
  }

  #[test]
  fn test_wilder_recurrence() {
    let out = wilder(&defined(&[1.0, 3.0, 5.0]), 2);
    assert_eq!(out, vec![None, Some(2.0), Some(3.5)]);
  }

  #[test]
  fn test_reset() {
    let mut ema = ExponentialMovingAverage::new(1);
    assert_eq!(ema.update(None), None);
    assert_eq!(ema.update(Some(2.0)), Some(2.0));
    assert_eq!(ema.update(None), None);
    assert_eq!(ema.update(Some(3.0)), None);
    ema.reset();
    assert_eq!(ema.update(Some(3.0)), Some(3.0));
    assert_eq!(ema.name(), "EMA-1");
  }
}
