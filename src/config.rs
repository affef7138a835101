/**
* filename : config
* author : HAMA
* date: 2025. 6. 3.
* description:
**/

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::ChartError;
use crate::indicators::PipelineOptions;
use crate::models::Indicator;
use crate::patterns::PatternKind;

pub const DEFAULT_CONFIG_PATH: &str = "config.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub pipeline: PipelineOptions,
    #[serde(default)]
    pub patterns: PatternConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    pub enabled: Vec<PatternKind>,
    pub min_bars: usize,
    pub rsi_overbought: f64,
    pub rsi_oversold: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}

impl std::str::FromStr for ExportFormat {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(ChartError::InvalidParameter(format!("Unknown export format: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub format: ExportFormat,
    /// Indicator columns to write; empty means the whole catalog.
    pub columns: Vec<Indicator>,
}

impl Config {
    /// Load configuration from `config.json` in the working directory
    pub fn load() -> Result<Self, ChartError> {
        Self::load_from(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from a file, falling back to defaults when it does not exist
    pub fn load_from(config_path: &Path) -> Result<Self, ChartError> {
        let mut cfg = if config_path.exists() {
            let mut file = File::open(config_path)
                .map_err(|e| ChartError::ConfigError(format!("Failed to open config file: {}", e)))?;

            let mut contents = String::new();
            file.read_to_string(&mut contents)
                .map_err(|e| ChartError::ConfigError(format!("Failed to read config file: {}", e)))?;

            Self::from_json(&contents)?
        } else {
            Config::default()
        };

        // environment overrides
        cfg.apply_env_overrides(|key| std::env::var(key).ok());
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json(contents: &str) -> Result<Self, ChartError> {
        serde_json::from_str(contents)
            .map_err(|e| ChartError::ConfigError(format!("Failed to parse config file: {}", e)))
    }

    /// Apply environment variable overrides for runtime fields
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(v) = lookup("XCHART_LOG_LEVEL") {
            self.logging.level = v;
        }
        if let Some(v) = lookup("XCHART_PARALLEL") {
            if let Some(flag) = parse_flag(&v) {
                self.pipeline.parallel = flag;
            }
        }
        if let Some(v) = lookup("XCHART_KEEP_WARM_UP") {
            if let Some(flag) = parse_flag(&v) {
                self.pipeline.keep_warm_up = flag;
            }
        }
        if let Some(v) = lookup("XCHART_EXPORT_FORMAT") {
            match v.parse() {
                Ok(format) => self.export.format = format,
                Err(e) => log::warn!("XCHART_EXPORT_FORMAT 무시: {}", e),
            }
        }
        if let Some(v) = lookup("XCHART_MIN_BARS") {
            match v.parse() {
                Ok(min_bars) => self.patterns.min_bars = min_bars,
                Err(_) => log::warn!("XCHART_MIN_BARS 무시: {}", v),
            }
        }
    }

    pub fn validate(&self) -> Result<(), ChartError> {
        let p = &self.patterns;
        if !(0.0..=100.0).contains(&p.rsi_oversold) || !(0.0..=100.0).contains(&p.rsi_overbought) {
            return Err(ChartError::ConfigError("RSI thresholds must be within 0..=100".to_string()));
        }
        if p.rsi_oversold >= p.rsi_overbought {
            return Err(ChartError::ConfigError(format!(
                "rsi_oversold ({}) must be below rsi_overbought ({})",
                p.rsi_oversold, p.rsi_overbought
            )));
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    let lower = value.to_lowercase();
    if ["1", "true", "yes"].contains(&lower.as_str()) {
        Some(true)
    } else if ["0", "false", "no"].contains(&lower.as_str()) {
        Some(false)
    } else {
        None
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
        }
    }
}

impl Default for PatternConfig {
    fn default() -> Self {
        PatternConfig {
            enabled: PatternKind::ALL.to_vec(),
            min_bars: 30,
            rsi_overbought: 70.0,
            rsi_oversold: 30.0,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            format: ExportFormat::Csv,
            columns: Vec::new(),
        }
    }
}
