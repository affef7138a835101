use std::io::Write;

use log::debug;
use serde_json::{Map, Value};

use crate::config::{ExportConfig, ExportFormat};
use crate::error::ChartError;
use crate::models::{AugmentedBar, AugmentedSeries, Indicator};
use crate::utils::format_timestamp;

const BAR_COLUMNS: [&str; 6] = ["datetime", "open", "high", "low", "close", "volume"];

/// Writes an augmented series as CSV or JSON. Undefined values become
/// empty cells in CSV and `null` in JSON.
#[derive(Debug, Clone)]
pub struct Exporter {
    columns: Vec<Indicator>,
}

impl Default for Exporter {
    fn default() -> Self {
        Exporter::new(Vec::new())
    }
}

impl Exporter {
    /// An empty selection exports the whole catalog.
    pub fn new(columns: Vec<Indicator>) -> Self {
        let columns = if columns.is_empty() {
            Indicator::ALL.to_vec()
        } else {
            columns
        };
        Exporter { columns }
    }

    /// OHLCV only, no indicator columns.
    pub fn bars_only() -> Self {
        Exporter { columns: Vec::new() }
    }

    pub fn from_config(config: &ExportConfig) -> Self {
        Exporter::new(config.columns.clone())
    }

    pub fn columns(&self) -> &[Indicator] {
        &self.columns
    }

    pub fn header(&self) -> Vec<String> {
        BAR_COLUMNS
            .iter()
            .map(|name| name.to_string())
            .chain(self.columns.iter().map(|ind| ind.name().to_string()))
            .collect()
    }

    pub fn write<W: Write>(
        &self,
        series: &AugmentedSeries,
        format: ExportFormat,
        writer: W,
    ) -> Result<(), ChartError> {
        match format {
            ExportFormat::Csv => self.write_csv(series, writer),
            ExportFormat::Json => self.write_json(series, writer),
        }
    }

    pub fn write_csv<W: Write>(&self, series: &AugmentedSeries, writer: W) -> Result<(), ChartError> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(self.header())?;

        for row in series.rows() {
            wtr.write_record(self.csv_record(&row))?;
        }

        wtr.flush()?;
        debug!("CSV 내보내기: {}행 x {}열", series.len(), self.columns.len() + BAR_COLUMNS.len());
        Ok(())
    }

    pub fn write_json<W: Write>(&self, series: &AugmentedSeries, mut writer: W) -> Result<(), ChartError> {
        serde_json::to_writer_pretty(&mut writer, &self.to_json(series))?;
        writer.flush()?;
        debug!("JSON 내보내기: {}행", series.len());
        Ok(())
    }

    pub fn to_csv_string(&self, series: &AugmentedSeries) -> Result<String, ChartError> {
        let mut buf = Vec::new();
        self.write_csv(series, &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    pub fn to_json_string(&self, series: &AugmentedSeries) -> Result<String, ChartError> {
        Ok(serde_json::to_string_pretty(&self.to_json(series))?)
    }

    /// Array of row objects, keys in header order.
    pub fn to_json(&self, series: &AugmentedSeries) -> Value {
        Value::Array(series.rows().map(|row| Value::Object(self.json_row(&row))).collect())
    }

    fn csv_record(&self, row: &AugmentedBar<'_>) -> Vec<String> {
        let bar = row.bar();
        let mut record = Vec::with_capacity(BAR_COLUMNS.len() + self.columns.len());
        record.push(format_timestamp(bar.timestamp));
        record.push(cell(bar.open));
        record.push(cell(bar.high));
        record.push(cell(bar.low));
        record.push(bar.close.to_string());
        record.push(cell(bar.volume));
        record.extend(self.columns.iter().map(|ind| cell(row.get(*ind))));
        record
    }

    fn json_row(&self, row: &AugmentedBar<'_>) -> Map<String, Value> {
        let bar = row.bar();
        let mut obj = Map::new();
        obj.insert("datetime".to_string(), Value::String(format_timestamp(bar.timestamp)));
        obj.insert("open".to_string(), number(bar.open));
        obj.insert("high".to_string(), number(bar.high));
        obj.insert("low".to_string(), number(bar.low));
        obj.insert("close".to_string(), number(Some(bar.close)));
        obj.insert("volume".to_string(), number(bar.volume));
        for ind in &self.columns {
            obj.insert(ind.name().to_string(), number(row.get(*ind)));
        }
        obj
    }
}

fn cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn number(value: Option<f64>) -> Value {
    value
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Bar;
    use std::io::{self, BufWriter};

    struct BrokenSink;

    impl Write for BrokenSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }
    }

    const DAY_MS: i64 = 86_400_000;

    fn sample() -> AugmentedSeries {
        let bars = vec![
            Bar::new(DAY_MS, 10.0, 11.0, 9.0, 10.5, 100.0),
            Bar::close_only(2 * DAY_MS, 11.0),
        ];
        AugmentedSeries::new(bars)
    }

    #[test]
    fn test_empty_selection_exports_catalog() {
        let exporter = Exporter::default();
        let header = exporter.header();
        assert_eq!(header.len(), 6 + Indicator::COUNT);
        assert_eq!(header[0], "datetime");
        assert_eq!(header[6], "sma_5");
        assert_eq!(header.last().map(String::as_str), Some("dist_from_low_20"));
    }

    #[test]
    fn test_csv_leaves_undefined_cells_empty() {
        let exporter = Exporter::new(vec![Indicator::Rsi]);
        let text = exporter.to_csv_string(&sample()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "datetime,open,high,low,close,volume,rsi");
        assert_eq!(lines[1], "1970-01-02T00:00:00.000Z,10,11,9,10.5,100,");
        assert_eq!(lines[2], "1970-01-03T00:00:00.000Z,,,,11,,");
    }

    #[test]
    fn test_json_uses_null_for_undefined() {
        let exporter = Exporter::new(vec![Indicator::Macd]);
        let value = exporter.to_json(&sample());
        let rows = value.as_array().unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["close"], 10.5);
        assert!(rows[1]["open"].is_null());
        assert!(rows[1]["macd"].is_null());

        let keys: Vec<&String> = rows[0].as_object().unwrap().keys().collect();
        assert_eq!(keys[0], "datetime");
        assert_eq!(keys.last().map(|k| k.as_str()), Some("macd"));
    }

    #[test]
    fn test_write_errors_surface_for_both_formats() {
        let exporter = Exporter::new(vec![Indicator::Rsi]);
        for format in [ExportFormat::Json, ExportFormat::Csv] {
            let result = exporter.write(&sample(), format, BufWriter::new(BrokenSink));
            assert!(
                matches!(
                    result,
                    Err(ChartError::IoError(_)) | Err(ChartError::CsvError(_)) | Err(ChartError::SerializationError(_))
                ),
                "{:?}",
                format
            );
        }
    }

    #[test]
    fn test_bars_only() {
        let text = Exporter::bars_only().to_csv_string(&sample()).unwrap();
        assert!(text.starts_with("datetime,open,high,low,close,volume\n"));
    }
}
