//! 차트 지표 계산 라이브러리
//!
//! OHLCV 시계열에 기술적 지표를 계산해 붙이고, 캔들/지표 패턴을 탐지하며
//! 결과를 CSV/JSON으로 내보냅니다.

pub mod config;
pub mod data;
pub mod error;
pub mod indicators;
pub mod models;
pub mod patterns;
pub mod utils;

// 핵심 타입 재노출
pub use crate::config::Config;
pub use crate::error::ChartError;
pub use crate::indicators::{compute, IndicatorPipeline, PipelineOptions};
pub use crate::models::{AugmentedBar, AugmentedSeries, Bar, Column, Indicator, Series};
pub use crate::patterns::{DetectedPattern, PatternKind, PatternScanner};

/// 버전 정보
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 결과 타입 별칭
pub type Result<T> = std::result::Result<T, ChartError>;
