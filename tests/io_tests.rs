//! 입출력 통합 테스트
//!
//! CSV 로드 -> 지표 계산 -> CSV/JSON 내보내기 전체 흐름

use std::io::Write as _;

use xChart::config::ExportFormat;
use xChart::data::{load_csv_path, load_csv_str, Exporter, SampleGenerator};
use xChart::{compute, ChartError, Indicator};

fn sample_csv(bars: usize) -> String {
  let series = SampleGenerator::new(11).generate(bars).unwrap();
  let augmented = xChart::AugmentedSeries::new(series.into_bars());
  Exporter::bars_only().to_csv_string(&augmented).unwrap()
}

#[test]
fn test_sample_csv_loads_back() {
  let text = sample_csv(60);
  let series = load_csv_str(&text).unwrap();

  assert_eq!(series.len(), 60);
  assert!(series.is_chronological());
  assert!(series.bars().iter().all(|bar| bar.open.is_some() && bar.volume.is_some()));
}

#[test]
fn test_load_compute_export_csv() {
  let series = load_csv_str(&sample_csv(60)).unwrap();
  let augmented = compute(&series);
  assert_eq!(augmented.len(), 60 - 19);

  let exporter = Exporter::new(vec![Indicator::Sma20, Indicator::Sma50]);
  let mut buf = Vec::new();
  exporter.write(&augmented, ExportFormat::Csv, &mut buf).unwrap();
  let text = String::from_utf8(buf).unwrap();
  let lines: Vec<&str> = text.lines().collect();

  assert_eq!(lines.len(), 1 + augmented.len());
  assert_eq!(lines[0], "datetime,open,high,low,close,volume,sma_20,sma_50");
  // sma_50 은 인덱스 49(출력 30행)부터 정의
  assert!(lines[1].ends_with(','));
  assert!(!lines[31].ends_with(','));
}

#[test]
fn test_export_json_rows() {
  let augmented = compute(&load_csv_str(&sample_csv(40)).unwrap());
  let text = Exporter::default().to_json_string(&augmented).unwrap();
  let value: serde_json::Value = serde_json::from_str(&text).unwrap();
  let rows = value.as_array().unwrap();

  assert_eq!(rows.len(), 21);
  assert_eq!(rows[0].as_object().unwrap().len(), 6 + Indicator::COUNT);
  assert!(rows[0]["sma_20"].is_number());
  assert!(rows[0]["sma_200"].is_null());
  assert!(rows[0]["datetime"].as_str().unwrap().ends_with('Z'));
}

#[test]
fn test_load_from_file() {
  let path = std::env::temp_dir().join(format!("xchart-io-{}.csv", std::process::id()));
  {
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(b"Timestamp,Close\n1000,1.0\n2000,2.0\n").unwrap();
  }

  let series = load_csv_path(&path).unwrap();
  std::fs::remove_file(&path).ok();

  assert_eq!(series.closes(), vec![1.0, 2.0]);
  assert_eq!(series.bars()[1].timestamp, 2000);
}

#[test]
fn test_missing_file_is_io_error() {
  let result = load_csv_path(std::path::Path::new("/nonexistent/xchart.csv"));
  assert!(matches!(result, Err(ChartError::IoError(_))));
}
