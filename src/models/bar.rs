use serde::{Deserialize, Serialize};

/// One OHLCV sample. Only `close` is required; the other price/volume
/// fields may be absent in the source data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: i64,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: f64,
    pub volume: Option<f64>,
}

impl Bar {
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Bar {
            timestamp,
            open: Some(open),
            high: Some(high),
            low: Some(low),
            close,
            volume: Some(volume),
        }
    }

    /// 종가만 있는 봉
    pub fn close_only(timestamp: i64, close: f64) -> Self {
        Bar {
            timestamp,
            open: None,
            high: None,
            low: None,
            close,
            volume: None,
        }
    }

    /// 시가/고가/저가/종가가 모두 같은 봉
    pub fn flat(timestamp: i64, price: f64, volume: f64) -> Self {
        Bar::new(timestamp, price, price, price, price, volume)
    }

    /// 캔들 몸통 크기 (시가 필요)
    pub fn body(&self) -> Option<f64> {
        self.open.map(|open| (open - self.close).abs())
    }

    /// 고가 - 저가
    pub fn range(&self) -> Option<f64> {
        match (self.high, self.low) {
            (Some(high), Some(low)) => Some(high - low),
            _ => None,
        }
    }

    pub fn upper_shadow(&self) -> Option<f64> {
        match (self.open, self.high) {
            (Some(open), Some(high)) => Some(high - open.max(self.close)),
            _ => None,
        }
    }

    pub fn lower_shadow(&self) -> Option<f64> {
        match (self.open, self.low) {
            (Some(open), Some(low)) => Some(open.min(self.close) - low),
            _ => None,
        }
    }

    pub fn is_bullish(&self) -> bool {
        self.open.map_or(false, |open| self.close > open)
    }

    pub fn is_bearish(&self) -> bool {
        self.open.map_or(false, |open| self.close < open)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candle_geometry() {
        let bar = Bar::new(0, 10.0, 12.0, 7.0, 11.0, 100.0);
        assert_eq!(bar.body(), Some(1.0));
        assert_eq!(bar.range(), Some(5.0));
        assert_eq!(bar.upper_shadow(), Some(1.0));
        assert_eq!(bar.lower_shadow(), Some(3.0));
        assert!(bar.is_bullish());
        assert!(!bar.is_bearish());
    }

    #[test]
    fn test_close_only_has_no_geometry() {
        let bar = Bar::close_only(0, 10.0);
        assert_eq!(bar.body(), None);
        assert_eq!(bar.range(), None);
        assert!(!bar.is_bullish());
        assert!(!bar.is_bearish());
    }
}
