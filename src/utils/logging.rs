//! 로깅 유틸리티
//!
//! 로그 초기화 및 실행 요약 로그 함수 제공

use env_logger::Builder;
use log::LevelFilter;
use std::env;

use crate::error::ChartError;

/// 로그 레벨 문자열 파싱 (알 수 없는 값은 Info)
pub fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    }
}

/// 로깅 시스템 초기화
///
/// RUST_LOG 환경변수가 있으면 설정 파일의 레벨보다 우선한다.
pub fn init(default_level: &str) -> Result<(), ChartError> {
    let mut builder = Builder::from_default_env();

    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| default_level.to_string());

    builder
        .filter_level(parse_level(&log_level))
        .format_timestamp_millis()
        .try_init()
        .map_err(|e| ChartError::ConfigError(format!("Failed to initialize logger: {}", e)))?;

    log::debug!("로깅 시스템 초기화 완료: 레벨 = {}", log_level);

    Ok(())
}

/// 지표 계산 요약 로그
pub fn log_pipeline_summary(input_bars: usize, output_bars: usize, elapsed_ms: u128) {
    log::info!(
        "지표 계산 완료: 입력 {} 봉 - 출력 {} 봉 - 소요 {} ms",
        input_bars,
        output_bars,
        elapsed_ms
    );
}

/// 오류 로그
pub fn log_error(context: &str, error: &ChartError) {
    log::error!("오류 발생 - {}: {}", context, error);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), LevelFilter::Debug);
        assert_eq!(parse_level("warn"), LevelFilter::Warn);
        assert_eq!(parse_level("verbose"), LevelFilter::Info);
    }
}
