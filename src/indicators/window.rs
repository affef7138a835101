/**
* filename : window
* author : HAMA
* date: 2025. 6. 2.
* description: 슬라이딩 윈도우 누적기 (합계/제곱합, 최대/최소)
**/

use std::collections::VecDeque;

/// Trailing window of exactly `period` values with running sum and sum of
/// squares. Sums are kept relative to a shift value so a constant window
/// yields an exact mean and a zero deviation.
#[derive(Debug, Clone)]
pub struct RollingWindow {
  period: usize,
  values: VecDeque<f64>,
  shift: f64,
  sum: f64,
  sum_sq: f64,
  since_rebase: usize,
}

impl RollingWindow {
  pub fn new(period: usize) -> Self {
    RollingWindow {
      period,
      values: VecDeque::with_capacity(period + 1),
      shift: 0.0,
      sum: 0.0,
      sum_sq: 0.0,
      since_rebase: 0,
    }
  }

  pub fn period(&self) -> usize {
    self.period
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  pub fn push(&mut self, value: f64) {
    if self.period == 0 {
      return;
    }

    if self.values.is_empty() {
      self.shift = value;
      self.sum = 0.0;
      self.sum_sq = 0.0;
      self.since_rebase = 0;
    }

    // 새 값 추가
    let d = value - self.shift;
    self.values.push_back(value);
    self.sum += d;
    self.sum_sq += d * d;

    // 오래된 값 제거
    if self.values.len() > self.period {
      if let Some(old_value) = self.values.pop_front() {
        let d = old_value - self.shift;
        self.sum -= d;
        self.sum_sq -= d * d;
      }
    }

    // 윈도우가 한 바퀴 돌 때마다 누적 오차 초기화
    self.since_rebase += 1;
    if self.since_rebase >= self.period && self.is_full() {
      self.rebase();
    }
  }

  fn rebase(&mut self) {
    self.shift = self.values.front().copied().unwrap_or(0.0);
    self.sum = 0.0;
    self.sum_sq = 0.0;
    for value in &self.values {
      let d = value - self.shift;
      self.sum += d;
      self.sum_sq += d * d;
    }
    self.since_rebase = 0;
  }

  pub fn is_full(&self) -> bool {
    self.period > 0 && self.values.len() == self.period
  }

  /// Arithmetic mean of the full window, `None` while warming up.
  pub fn mean(&self) -> Option<f64> {
    if !self.is_full() {
      return None;
    }

    Some(self.shift + self.sum / self.period as f64)
  }

  /// Population standard deviation (divides by `period`).
  pub fn population_std_dev(&self) -> Option<f64> {
    if !self.is_full() {
      return None;
    }

    let n = self.period as f64;
    let variance = (self.sum_sq - self.sum * self.sum / n) / n;
    Some(variance.max(0.0).sqrt())
  }

  pub fn clear(&mut self) {
    self.values.clear();
    self.shift = 0.0;
    self.sum = 0.0;
    self.sum_sq = 0.0;
    self.since_rebase = 0;
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extreme {
  Max,
  Min,
}

/// Trailing maximum or minimum over `period` values (monotonic deque).
#[derive(Debug, Clone)]
pub struct RollingExtreme {
  period: usize,
  extreme: Extreme,
  candidates: VecDeque<(usize, f64)>,
  pushed: usize,
  filled: usize,
}

impl RollingExtreme {
  pub fn new(period: usize, extreme: Extreme) -> Self {
    RollingExtreme {
      period,
      extreme,
      candidates: VecDeque::with_capacity(period),
      pushed: 0,
      filled: 0,
    }
  }

  fn dominates(&self, incoming: f64, existing: f64) -> bool {
    match self.extreme {
      Extreme::Max => incoming >= existing,
      Extreme::Min => incoming <= existing,
    }
  }

  pub fn push(&mut self, value: f64) {
    if self.period == 0 {
      return;
    }

    while let Some(&(_, back)) = self.candidates.back() {
      if self.dominates(value, back) {
        self.candidates.pop_back();
      } else {
        break;
      }
    }

    let index = self.pushed;
    self.candidates.push_back((index, value));
    self.pushed += 1;
    self.filled = (self.filled + 1).min(self.period);

    // 윈도우 밖으로 나간 후보 제거
    while let Some(&(front_index, _)) = self.candidates.front() {
      if front_index + self.period <= index {
        self.candidates.pop_front();
      } else {
        break;
      }
    }
  }

  pub fn is_full(&self) -> bool {
    self.period > 0 && self.filled == self.period
  }

  pub fn current(&self) -> Option<f64> {
    if !self.is_full() {
      return None;
    }

    self.candidates.front().map(|&(_, value)| value)
  }

  pub fn clear(&mut self) {
    self.candidates.clear();
    self.filled = 0;
  }
}
