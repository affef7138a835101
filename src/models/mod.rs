pub mod bar;
pub mod indicator;
pub mod series;

pub use bar::Bar;
pub use indicator::Indicator;
pub use series::{AugmentedBar, AugmentedSeries, Column, Series};
