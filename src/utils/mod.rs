//! 시간 관련 유틸리티
//!
//! 시간 변환, 포맷팅, 파싱 함수 제공

pub mod logging;
pub mod math;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};

/// 타임스탬프(밀리초)를 DateTime<Utc>로 변환
pub fn timestamp_to_datetime(timestamp_ms: i64) -> Option<DateTime<Utc>> {
  Utc.timestamp_millis_opt(timestamp_ms).single()
}

/// DateTime<Utc>를 타임스탬프(밀리초)로 변환
pub fn datetime_to_timestamp(dt: DateTime<Utc>) -> i64 {
  dt.timestamp_millis()
}

/// 타임스탬프(밀리초)를 RFC 3339 문자열로 변환 (범위 밖이면 숫자 그대로)
pub fn format_timestamp(timestamp_ms: i64) -> String {
  match timestamp_to_datetime(timestamp_ms) {
    Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Millis, true),
    None => timestamp_ms.to_string(),
  }
}

/// 문자열 타임스탬프 파싱
///
/// 정수(밀리초), RFC 3339, `%Y-%m-%d %H:%M:%S`, `%Y-%m-%d` 순서로 시도한다.
pub fn parse_timestamp(raw: &str) -> Option<i64> {
  let raw = raw.trim();
  if raw.is_empty() {
    return None;
  }

  if let Ok(ms) = raw.parse::<i64>() {
    return Some(ms);
  }

  if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
    return Some(dt.timestamp_millis());
  }

  for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
      return Some(datetime_to_timestamp(Utc.from_utc_datetime(&naive)));
    }
  }

  NaiveDate::parse_from_str(raw, "%Y-%m-%d")
    .ok()
    .and_then(|date| date.and_hms_opt(0, 0, 0))
    .map(|naive| datetime_to_timestamp(Utc.from_utc_datetime(&naive)))
}
