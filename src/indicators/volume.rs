/**
* filename : volume
* author : HAMA
* date: 2025. 6. 2.
* description: 거래량 이동평균
**/

use crate::models::Column;
use super::moving_averages::sma;

/// SMA of volume. Bars without volume break the window, so the average is
/// only defined after `period` consecutive bars that carry volume.
pub fn volume_sma(volumes: &[Option<f64>], period: usize) -> Column {
  sma(volumes, period)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_volume_sma_skips_missing_volume() {
    let volumes = vec![Some(100.0), None, Some(200.0), Some(400.0)];
    assert_eq!(volume_sma(&volumes, 2), vec![None, None, None, Some(300.0)]);
  }

  #[test]
  fn test_volume_absent_everywhere() {
    let volumes = vec![None; 30];
    assert!(volume_sma(&volumes, 20).iter().all(Option::is_none));
  }
}
