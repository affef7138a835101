use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ChartError;

/// Fixed catalog of derived fields attached to each bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Indicator {
    Sma5,
    Sma10,
    Sma20,
    Sma50,
    Sma200,
    Ema5,
    Ema10,
    Ema20,
    Ema50,
    Ema200,
    Ema12,
    Ema26,
    Macd,
    MacdSignal,
    MacdHist,
    Rsi,
    BollingerMid,
    BollingerStd,
    BollingerUpper,
    BollingerLower,
    Tr,
    Atr,
    Momentum,
    Roc,
    VolumeSma,
    PriceToSma20,
    PriceToSma50,
    SmaCross,
    Volatility,
    DistFromHigh20,
    DistFromLow20,
}

impl Indicator {
    pub const COUNT: usize = 31;

    /// 카탈로그 순서
    pub const ALL: [Indicator; Indicator::COUNT] = [
        Indicator::Sma5,
        Indicator::Sma10,
        Indicator::Sma20,
        Indicator::Sma50,
        Indicator::Sma200,
        Indicator::Ema5,
        Indicator::Ema10,
        Indicator::Ema20,
        Indicator::Ema50,
        Indicator::Ema200,
        Indicator::Ema12,
        Indicator::Ema26,
        Indicator::Macd,
        Indicator::MacdSignal,
        Indicator::MacdHist,
        Indicator::Rsi,
        Indicator::BollingerMid,
        Indicator::BollingerStd,
        Indicator::BollingerUpper,
        Indicator::BollingerLower,
        Indicator::Tr,
        Indicator::Atr,
        Indicator::Momentum,
        Indicator::Roc,
        Indicator::VolumeSma,
        Indicator::PriceToSma20,
        Indicator::PriceToSma50,
        Indicator::SmaCross,
        Indicator::Volatility,
        Indicator::DistFromHigh20,
        Indicator::DistFromLow20,
    ];

    /// Column slot in an `AugmentedSeries`.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Indicator::Sma5 => "sma_5",
            Indicator::Sma10 => "sma_10",
            Indicator::Sma20 => "sma_20",
            Indicator::Sma50 => "sma_50",
            Indicator::Sma200 => "sma_200",
            Indicator::Ema5 => "ema_5",
            Indicator::Ema10 => "ema_10",
            Indicator::Ema20 => "ema_20",
            Indicator::Ema50 => "ema_50",
            Indicator::Ema200 => "ema_200",
            Indicator::Ema12 => "ema_12",
            Indicator::Ema26 => "ema_26",
            Indicator::Macd => "macd",
            Indicator::MacdSignal => "macd_signal",
            Indicator::MacdHist => "macd_hist",
            Indicator::Rsi => "rsi",
            Indicator::BollingerMid => "bollinger_mid",
            Indicator::BollingerStd => "bollinger_std",
            Indicator::BollingerUpper => "bollinger_upper",
            Indicator::BollingerLower => "bollinger_lower",
            Indicator::Tr => "tr",
            Indicator::Atr => "atr",
            Indicator::Momentum => "momentum",
            Indicator::Roc => "roc",
            Indicator::VolumeSma => "volume_sma",
            Indicator::PriceToSma20 => "price_to_sma_20",
            Indicator::PriceToSma50 => "price_to_sma_50",
            Indicator::SmaCross => "sma_20_50_cross",
            Indicator::Volatility => "volatility",
            Indicator::DistFromHigh20 => "dist_from_high_20",
            Indicator::DistFromLow20 => "dist_from_low_20",
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Indicator {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Indicator::ALL
            .iter()
            .copied()
            .find(|indicator| indicator.name() == wanted)
            .ok_or_else(|| ChartError::UnknownIndicator(s.to_string()))
    }
}

impl TryFrom<String> for Indicator {
    type Error = ChartError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Indicator> for String {
    fn from(indicator: Indicator) -> Self {
        indicator.name().to_string()
    }
}
