/**
* filename : pipeline
* author : HAMA
* date: 2025. 6. 3.
* description: 지표 계산 파이프라인 (고정된 단계 순서)
**/

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::{AugmentedSeries, Column, Indicator, Series};
use super::moving_averages::{defined, ema, sma};
use super::oscillators::{momentum, rate_of_change, rsi};
use super::trend::{cross_flag, macd, price_to_average};
use super::volatility::{
  average_true_range, bollinger, distance_from_extremes, trailing_volatility, true_range,
};
use super::volume::volume_sma;

pub const SMA_PERIODS: [(Indicator, usize); 5] = [
  (Indicator::Sma5, 5),
  (Indicator::Sma10, 10),
  (Indicator::Sma20, 20),
  (Indicator::Sma50, 50),
  (Indicator::Sma200, 200),
];

pub const EMA_PERIODS: [(Indicator, usize); 7] = [
  (Indicator::Ema5, 5),
  (Indicator::Ema10, 10),
  (Indicator::Ema20, 20),
  (Indicator::Ema50, 50),
  (Indicator::Ema200, 200),
  (Indicator::Ema12, 12),
  (Indicator::Ema26, 26),
];

pub const MACD_SIGNAL_PERIOD: usize = 9;
pub const RSI_PERIOD: usize = 14;
pub const BOLLINGER_PERIOD: usize = 20;
pub const BOLLINGER_WIDTH: f64 = 2.0;
pub const ATR_PERIOD: usize = 14;
pub const MOMENTUM_LOOKBACK: usize = 10;
pub const ROC_LOOKBACK: usize = 12;
pub const VOLUME_SMA_PERIOD: usize = 20;
pub const VOLATILITY_PERIOD: usize = 20;
pub const EXTREMES_PERIOD: usize = 20;

/// Rows where this indicator is undefined are dropped from the output.
pub const WARM_UP_REFERENCE: Indicator = Indicator::Sma20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PipelineOptions {
  /// 독립적인 SMA/EMA 윈도우를 rayon으로 병렬 계산
  #[serde(default)]
  pub parallel: bool,
  /// true면 SMA-20 워밍업 구간을 잘라내지 않는다
  #[serde(default)]
  pub keep_warm_up: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Average {
  Simple,
  Exponential,
}

#[derive(Debug, Clone, Default)]
pub struct IndicatorPipeline {
  options: PipelineOptions,
}

impl IndicatorPipeline {
  pub fn new(options: PipelineOptions) -> Self {
    IndicatorPipeline { options }
  }

  pub fn options(&self) -> &PipelineOptions {
    &self.options
  }

  /// Runs every stage and drops the warm-up rows (unless configured to keep them).
  pub fn compute(&self, series: &Series) -> AugmentedSeries {
    let mut augmented = self.compute_full(series);

    if !self.options.keep_warm_up {
      let before = augmented.len();
      augmented.retain_where_defined(WARM_UP_REFERENCE);
      debug!("12단계: 워밍업 구간 {} 봉 제거", before - augmented.len());
    }

    augmented
  }

  /// Runs stages 1-11 and returns one row per input bar.
  pub fn compute_full(&self, series: &Series) -> AugmentedSeries {
    if series.is_empty() {
      return AugmentedSeries::empty();
    }

    let closes = series.closes();
    let close_column = defined(&closes);
    let highs = series.highs();
    let lows = series.lows();
    let volumes = series.volumes();

    let mut out = AugmentedSeries::new(series.bars().to_vec());

    // 1-2. SMA / EMA
    for (indicator, column) in self.moving_averages(&close_column) {
      out.set_column(indicator, column);
    }
    debug!("1-2단계: 이동평균 {}개 계산", SMA_PERIODS.len() + EMA_PERIODS.len());

    // 3. MACD
    let macd = macd(out.column(Indicator::Ema12), out.column(Indicator::Ema26), MACD_SIGNAL_PERIOD);
    out.set_column(Indicator::Macd, macd.macd);
    out.set_column(Indicator::MacdSignal, macd.signal);
    out.set_column(Indicator::MacdHist, macd.histogram);

    // 4. RSI
    out.set_column(Indicator::Rsi, rsi(&closes, RSI_PERIOD));

    // 5. 볼린저 밴드
    let bands = bollinger(&close_column, BOLLINGER_PERIOD, BOLLINGER_WIDTH);
    out.set_column(Indicator::BollingerMid, bands.middle);
    out.set_column(Indicator::BollingerStd, bands.std_dev);
    out.set_column(Indicator::BollingerUpper, bands.upper);
    out.set_column(Indicator::BollingerLower, bands.lower);
    debug!("3-5단계: MACD, RSI, 볼린저 밴드 계산");

    // 6. TR / ATR
    let tr = true_range(&highs, &lows, &closes);
    let atr = average_true_range(&tr, ATR_PERIOD);
    out.set_column(Indicator::Tr, tr);
    out.set_column(Indicator::Atr, atr);

    // 7. 모멘텀 / 변화율
    out.set_column(Indicator::Momentum, momentum(&closes, MOMENTUM_LOOKBACK));
    out.set_column(Indicator::Roc, rate_of_change(&closes, ROC_LOOKBACK));

    // 8. 거래량 이동평균
    out.set_column(Indicator::VolumeSma, volume_sma(&volumes, VOLUME_SMA_PERIOD));
    debug!("6-8단계: ATR, 모멘텀, 거래량 이동평균 계산");

    // 9. 가격/이동평균 비율, 교차 플래그
    let price_to_sma_20 = price_to_average(&closes, out.column(Indicator::Sma20));
    let price_to_sma_50 = price_to_average(&closes, out.column(Indicator::Sma50));
    let cross = cross_flag(out.column(Indicator::Sma20), out.column(Indicator::Sma50));
    out.set_column(Indicator::PriceToSma20, price_to_sma_20);
    out.set_column(Indicator::PriceToSma50, price_to_sma_50);
    out.set_column(Indicator::SmaCross, cross);

    // 10-11. 현재 봉을 제외한 직전 20봉 기준
    out.set_column(Indicator::Volatility, trailing_volatility(&closes, VOLATILITY_PERIOD));
    let distance = distance_from_extremes(&highs, &lows, &closes, EXTREMES_PERIOD);
    out.set_column(Indicator::DistFromHigh20, distance.from_high);
    out.set_column(Indicator::DistFromLow20, distance.from_low);
    debug!("9-11단계: 비율, 변동성, 고가/저가 거리 계산");

    out
  }

  fn moving_averages(&self, closes: &[Option<f64>]) -> Vec<(Indicator, Column)> {
    let jobs: Vec<(Indicator, Average, usize)> = SMA_PERIODS
      .iter()
      .map(|&(indicator, period)| (indicator, Average::Simple, period))
      .chain(
        EMA_PERIODS
          .iter()
          .map(|&(indicator, period)| (indicator, Average::Exponential, period)),
      )
      .collect();

    let run = |&(indicator, average, period): &(Indicator, Average, usize)| {
      let column = match average {
        Average::Simple => sma(closes, period),
        Average::Exponential => ema(closes, period),
      };
      (indicator, column)
    };

    if self.options.parallel {
      jobs.par_iter().map(run).collect()
    } else {
      jobs.iter().map(run).collect()
    }
  }
}

/// Computes the full catalog with default options.
pub fn compute(series: &Series) -> AugmentedSeries {
  IndicatorPipeline::default().compute(series)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::Bar;

  fn trending(n: usize) -> Series {
    (0..n)
      .map(|i| {
        let close = 100.0 + i as f64;
        Bar::new(i as i64 * 60_000, close - 0.5, close + 1.0, close - 1.0, close, 1_000.0)
      })
      .collect()
  }

  #[test]
  fn test_empty_input_gives_empty_output() {
    let out = compute(&Series::default());
    assert!(out.is_empty());
  }

  #[test]
  fn test_warm_up_rows_are_dropped() {
    let out = compute(&trending(25));
    assert_eq!(out.len(), 6);
    assert_eq!(out.bars()[0].close, 119.0);
    assert!(out.column(Indicator::Sma20).iter().all(Option::is_some));
  }

  #[test]
  fn test_keep_warm_up_returns_every_row() {
    let pipeline = IndicatorPipeline::new(PipelineOptions { parallel: false, keep_warm_up: true });
    let out = pipeline.compute(&trending(10));
    assert_eq!(out.len(), 10);
    assert!(out.column(Indicator::Sma20).iter().all(Option::is_none));
    assert_eq!(out.value(4, Indicator::Sma5), Some(102.0));
  }

  #[test]
  fn test_parallel_matches_sequential() {
    let series = trending(260);
    let sequential = IndicatorPipeline::default().compute(&series);
    let parallel = IndicatorPipeline::new(PipelineOptions { parallel: true, keep_warm_up: false })
      .compute(&series);
    assert_eq!(sequential, parallel);
  }

  #[test]
  fn test_close_only_series_skips_ohlv_fields() {
    let series: Series = (0..60).map(|i| Bar::close_only(i, 50.0 + (i % 5) as f64)).collect();
    let out = compute(&series);

    assert_eq!(out.len(), 41);
    for indicator in [Indicator::Tr, Indicator::Atr, Indicator::VolumeSma, Indicator::DistFromHigh20, Indicator::DistFromLow20] {
      assert!(out.column(indicator).iter().all(Option::is_none), "{}", indicator);
    }
    assert!(out.column(Indicator::Rsi).iter().all(Option::is_some));
    // 변동성은 직전 20봉이 필요하므로 첫 출력 행(인덱스 19)에서는 미정의
    assert_eq!(out.value(0, Indicator::Volatility), None);
    assert!(out.column(Indicator::Volatility)[1..].iter().all(Option::is_some));
  }
}
