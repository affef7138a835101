/**
* filename : pattern_types
* author : HAMA
* date: 2025. 6. 4.
* description: 패턴 종류와 방향성
**/

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternBias {
  Bullish,
  Bearish,
  Neutral,
}

impl PatternBias {
  pub fn as_str(&self) -> &'static str {
    match self {
      PatternBias::Bullish => "bullish",
      PatternBias::Bearish => "bearish",
      PatternBias::Neutral => "neutral",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
  Doji,
  Hammer,
  BullishEngulfing,
  BearishEngulfing,
  MacdBullishCross,
  MacdBearishCross,
  GoldenCross,
  DeathCross,
  RsiOverbought,
  RsiOversold,
}

impl PatternKind {
  pub const ALL: [PatternKind; 10] = [
    PatternKind::Doji,
    PatternKind::Hammer,
    PatternKind::BullishEngulfing,
    PatternKind::BearishEngulfing,
    PatternKind::MacdBullishCross,
    PatternKind::MacdBearishCross,
    PatternKind::GoldenCross,
    PatternKind::DeathCross,
    PatternKind::RsiOverbought,
    PatternKind::RsiOversold,
  ];

  pub fn slug(&self) -> &'static str {
    match self {
      PatternKind::Doji => "doji",
      PatternKind::Hammer => "hammer",
      PatternKind::BullishEngulfing => "bullish-engulfing",
      PatternKind::BearishEngulfing => "bearish-engulfing",
      PatternKind::MacdBullishCross => "macd-bullish",
      PatternKind::MacdBearishCross => "macd-bearish",
      PatternKind::GoldenCross => "golden-cross",
      PatternKind::DeathCross => "death-cross",
      PatternKind::RsiOverbought => "rsi-overbought",
      PatternKind::RsiOversold => "rsi-oversold",
    }
  }

  pub fn display_name(&self) -> &'static str {
    match self {
      PatternKind::Doji => "Doji",
      PatternKind::Hammer => "Hammer",
      PatternKind::BullishEngulfing => "Bullish Engulfing",
      PatternKind::BearishEngulfing => "Bearish Engulfing",
      PatternKind::MacdBullishCross => "MACD Bullish Cross",
      PatternKind::MacdBearishCross => "MACD Bearish Cross",
      PatternKind::GoldenCross => "Golden Cross",
      PatternKind::DeathCross => "Death Cross",
      PatternKind::RsiOverbought => "RSI Overbought",
      PatternKind::RsiOversold => "RSI Oversold",
    }
  }

  pub fn description(&self) -> &'static str {
    match self {
      PatternKind::Doji => "Indecision in the market, potential reversal signal",
      PatternKind::Hammer => "Potential bullish reversal pattern",
      PatternKind::BullishEngulfing => "Strong bullish reversal pattern",
      PatternKind::BearishEngulfing => "Strong bearish reversal pattern",
      PatternKind::MacdBullishCross => "MACD crossed above signal line",
      PatternKind::MacdBearishCross => "MACD crossed below signal line",
      PatternKind::GoldenCross => "50-day SMA crossed above 200-day SMA",
      PatternKind::DeathCross => "50-day SMA crossed below 200-day SMA",
      PatternKind::RsiOverbought => "RSI above the overbought threshold, potential reversal or correction",
      PatternKind::RsiOversold => "RSI below the oversold threshold, potential reversal or bounce",
    }
  }

  pub fn bias(&self) -> PatternBias {
    match self {
      PatternKind::Doji => PatternBias::Neutral,
      PatternKind::Hammer
      | PatternKind::BullishEngulfing
      | PatternKind::MacdBullishCross
      | PatternKind::GoldenCross
      | PatternKind::RsiOversold => PatternBias::Bullish,
      PatternKind::BearishEngulfing
      | PatternKind::MacdBearishCross
      | PatternKind::DeathCross
      | PatternKind::RsiOverbought => PatternBias::Bearish,
    }
  }
}

/// A pattern occurrence; `locations` are row indices into the scanned series.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedPattern {
  pub kind: PatternKind,
  pub locations: Vec<usize>,
  pub timestamp: i64,
}

impl DetectedPattern {
  pub fn new(kind: PatternKind, locations: Vec<usize>, timestamp: i64) -> Self {
    DetectedPattern { kind, locations, timestamp }
  }

  /// `<slug>-<last location>`
  pub fn id(&self) -> String {
    format!("{}-{}", self.kind.slug(), self.locations.last().copied().unwrap_or_default())
  }

  pub fn name(&self) -> &'static str {
    self.kind.display_name()
  }

  pub fn description(&self) -> &'static str {
    self.kind.description()
  }

  pub fn bias(&self) -> PatternBias {
    self.kind.bias()
  }
}
