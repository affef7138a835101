/**
* filename : mod
* author : HAMA
* date: 2025. 6. 2.
* description: 지표 계산 모듈
**/
pub mod moving_averages;
pub mod oscillators;
pub mod pipeline;
pub mod trend;
pub mod volatility;
pub mod volume;
pub mod window;

pub use moving_averages::*;
pub use oscillators::*;
pub use pipeline::{compute, IndicatorPipeline, PipelineOptions};
pub use trend::*;
pub use volatility::*;
pub use volume::*;
pub use window::{Extreme, RollingExtreme, RollingWindow};
