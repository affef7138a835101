use chrono::{Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Normal;

use crate::error::ChartError;
use crate::models::{Bar, Series};
use crate::utils::datetime_to_timestamp;

pub const DEFAULT_SEED: u64 = 42;
pub const START_PRICE: f64 = 100.0;

/// Seeded random-walk OHLCV generator on business days.
#[derive(Debug, Clone)]
pub struct SampleGenerator {
    seed: u64,
    start: NaiveDate,
}

impl Default for SampleGenerator {
    fn default() -> Self {
        SampleGenerator::new(DEFAULT_SEED)
    }
}

impl SampleGenerator {
    pub fn new(seed: u64) -> Self {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();
        SampleGenerator { seed, start }
    }

    pub fn with_start(mut self, start: NaiveDate) -> Self {
        self.start = start;
        self
    }

    /// `count` bars, one per weekday starting at the first business day on or after `start`.
    pub fn generate(&self, count: usize) -> Result<Series, ChartError> {
        let mut rng = StdRng::seed_from_u64(self.seed);

        // 일간 변동률 평균 0.05%, 표준편차 1%
        let daily_change = normal(0.05, 1.0)?;
        let wick = normal(0.0, 0.01)?;
        let volume_dist = normal(1_000_000.0, 200_000.0)?;

        let mut close = START_PRICE;
        let closes: Vec<f64> = (0..count)
            .map(|_| {
                close *= 1.0 + rng.sample(daily_change) / 100.0;
                close
            })
            .collect();

        let series: Series = business_days(self.start)
            .zip(closes)
            .map(|(date, close)| {
                let high = close * (1.0 + rng.sample(wick).abs());
                let low = close * (1.0 - rng.sample(wick).abs());
                let open = low + (high - low) * rng.gen::<f64>();

                let mut volume = rng.sample(volume_dist);
                if rng.gen::<f64>() > 0.95 {
                    volume *= rng.gen_range(2.0..3.0);
                }

                let timestamp = datetime_to_timestamp(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)));
                Bar::new(timestamp, open, high, low, close, volume.max(0.0))
            })
            .collect();

        Ok(series)
    }
}

fn business_days(start: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    std::iter::successors(Some(start), |date| Some(*date + Duration::days(1)))
        .filter(|date| !matches!(date.weekday(), Weekday::Sat | Weekday::Sun))
}

fn normal(mean: f64, std_dev: f64) -> Result<Normal<f64>, ChartError> {
    Normal::new(mean, std_dev)
        .map_err(|e| ChartError::InvalidParameter(format!("normal({}, {}): {}", mean, std_dev, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_series() {
        let a = SampleGenerator::new(7).generate(50).unwrap();
        let b = SampleGenerator::new(7).generate(50).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, SampleGenerator::new(8).generate(50).unwrap());
    }

    #[test]
    fn test_bar_geometry() {
        let series = SampleGenerator::default().generate(200).unwrap();
        assert_eq!(series.len(), 200);
        assert!(series.is_chronological());

        for bar in series.bars() {
            let (high, low, open) = (bar.high.unwrap(), bar.low.unwrap(), bar.open.unwrap());
            assert!(low <= bar.close && bar.close <= high);
            assert!(low <= open && open <= high);
            assert!(bar.volume.unwrap() >= 0.0);
        }
    }

    #[test]
    fn test_skips_weekends() {
        // 2024-01-06 is a Saturday
        let start = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let series = SampleGenerator::default().with_start(start).generate(2).unwrap();
        let day_ms = 86_400_000;
        assert_eq!(series.bars()[1].timestamp - series.bars()[0].timestamp, 3 * day_ms);
    }

    #[test]
    fn test_invalid_distribution_is_rejected() {
        assert!(normal(0.0, 1.0).is_ok());
        assert!(matches!(normal(0.0, -1.0), Err(ChartError::InvalidParameter(_))));
    }
}
