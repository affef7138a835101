use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, warn};

use crate::error::ChartError;
use crate::models::{Bar, Series};
use crate::utils::parse_timestamp;

/// Accepted names for the time column, in priority order.
const TIME_COLUMNS: [&str; 4] = ["timestamp", "datetime", "date", "time"];

/// Reads OHLCV rows from delimited text with a header row.
pub struct CsvLoader {
    delimiter: u8,
}

impl Default for CsvLoader {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

struct ColumnMap {
    time: Option<usize>,
    open: Option<usize>,
    high: Option<usize>,
    low: Option<usize>,
    close: usize,
    volume: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Result<Self, ChartError> {
        let names: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();
        let find = |name: &str| names.iter().position(|h| h == name);

        let close = find("close").ok_or_else(|| ChartError::MissingColumn("close".to_string()))?;

        Ok(Self {
            time: TIME_COLUMNS.iter().find_map(|name| find(*name)),
            open: find("open"),
            high: find("high"),
            low: find("low"),
            close,
            volume: find("volume"),
        })
    }
}

impl CsvLoader {
    /// 구분자는 단일 바이트(ASCII)만 허용
    pub fn new(delimiter: char) -> Result<Self, ChartError> {
        let byte = if delimiter.is_ascii() { u8::try_from(delimiter).ok() } else { None };
        byte.map(|b| Self { delimiter: b })
            .ok_or_else(|| ChartError::InvalidParameter(format!("구분자는 ASCII 문자여야 합니다: {:?}", delimiter)))
    }

    pub fn load_path(&self, path: &Path) -> Result<Series, ChartError> {
        let file = File::open(path)?;
        debug!("CSV 로드: {}", path.display());
        self.load_reader(file)
    }

    pub fn load_str(&self, text: &str) -> Result<Series, ChartError> {
        self.load_reader(text.as_bytes())
    }

    pub fn load_reader<R: Read>(&self, reader: R) -> Result<Series, ChartError> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let columns = ColumnMap::from_headers(&headers)?;

        let mut bars = Vec::new();
        let mut skipped = 0usize;

        for (ordinal, record) in rdr.records().enumerate() {
            let record = record?;
            // 헤더가 1행
            let line = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(ordinal + 2);

            if record.len() != headers.len() {
                warn!(
                    "{}행 건너뜀: 필드 {}개 (헤더 {}개)",
                    line,
                    record.len(),
                    headers.len()
                );
                skipped += 1;
                continue;
            }

            let timestamp = match columns.time {
                Some(idx) => {
                    let raw = &record[idx];
                    parse_timestamp(raw).ok_or_else(|| ChartError::ParseError {
                        line,
                        message: format!("invalid time value '{}'", raw),
                    })?
                }
                None => bars.len() as i64,
            };

            let close = parse_number(&record[columns.close], "close", line)?;

            bars.push(Bar {
                timestamp,
                open: parse_optional(&record, columns.open, "open", line)?,
                high: parse_optional(&record, columns.high, "high", line)?,
                low: parse_optional(&record, columns.low, "low", line)?,
                close,
                volume: parse_optional(&record, columns.volume, "volume", line)?,
            });
        }

        if skipped > 0 {
            warn!("필드 수 불일치로 {}개 행 건너뜀", skipped);
        }

        let series = Series::new(bars);
        if !series.is_chronological() {
            warn!("입력 데이터가 시간순으로 정렬되어 있지 않습니다");
        }
        debug!("{}개 봉 로드 완료", series.len());
        Ok(series)
    }
}

fn parse_number(raw: &str, field: &str, line: usize) -> Result<f64, ChartError> {
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ChartError::ParseError {
            line,
            message: format!("invalid {} value '{}'", field, raw),
        }),
    }
}

/// Empty cells are absent values; anything else must be numeric.
fn parse_optional(
    record: &StringRecord,
    column: Option<usize>,
    field: &str,
    line: usize,
) -> Result<Option<f64>, ChartError> {
    match column.map(|idx| &record[idx]) {
        None | Some("") => Ok(None),
        Some(raw) => parse_number(raw, field, line).map(Some),
    }
}

pub fn load_csv_path(path: &Path) -> Result<Series, ChartError> {
    CsvLoader::default().load_path(path)
}

pub fn load_csv_str(text: &str) -> Result<Series, ChartError> {
    CsvLoader::default().load_str(text)
}
