//! 데이터 입출력
//!
//! CSV 로더, CSV/JSON 내보내기, 샘플 시계열 생성

pub mod export;
pub mod loader;
pub mod sample;

pub use export::Exporter;
pub use loader::{load_csv_path, load_csv_str, CsvLoader};
pub use sample::SampleGenerator;
