/**
* filename : trend
* author : HAMA
* date: 2025. 6. 2.
* description: MACD, 가격/이동평균 비율, 이동평균 교차 플래그
**/

use crate::models::Column;
use crate::utils::math::safe_div;
use super::moving_averages::ema;

#[derive(Debug, Clone, PartialEq)]
pub struct MacdOutput {
  pub macd: Column,
  pub signal: Column,
  pub histogram: Column,
}

/// MACD from precomputed fast/slow EMA columns. The signal line is an EMA
/// of the MACD line, seeded once the line itself is defined.
pub fn macd(fast_ema: &[Option<f64>], slow_ema: &[Option<f64>], signal_period: usize) -> MacdOutput {
  let macd: Column = zip_defined(fast_ema, slow_ema, |fast, slow| Some(fast - slow));
  let signal = ema(&macd, signal_period);
  let histogram = zip_defined(&macd, &signal, |line, signal| Some(line - signal));

  MacdOutput { macd, signal, histogram }
}

/// `close / sma`, undefined where the average is undefined or zero.
pub fn price_to_average(closes: &[f64], average: &[Option<f64>]) -> Column {
  closes
    .iter()
    .zip(average)
    .map(|(&close, &avg)| avg.and_then(|avg| safe_div(close, avg)))
    .collect()
}

/// 1.0 where `fast > slow`, 0.0 otherwise, only where both are defined.
pub fn cross_flag(fast: &[Option<f64>], slow: &[Option<f64>]) -> Column {
  zip_defined(fast, slow, |fast, slow| Some(if fast > slow { 1.0 } else { 0.0 }))
}

fn zip_defined<F>(a: &[Option<f64>], b: &[Option<f64>], f: F) -> Column
where
  F: Fn(f64, f64) -> Option<f64>,
{
  a.iter()
    .zip(b)
    .map(|(&a, &b)| match (a, b) {
      (Some(a), Some(b)) => f(a, b),
      _ => None,
    })
    .collect()
}
