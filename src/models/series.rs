use serde::{Deserialize, Serialize};

use super::bar::Bar;
use super::indicator::Indicator;

/// One indicator's values, parallel to the bar array. `None` means
/// "not yet computable" and is never conflated with zero.
pub type Column = Vec<Option<f64>>;

/// Ordered input bars, indexed by arrival order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    bars: Vec<Bar>,
}

impl Series {
    pub fn new(bars: Vec<Bar>) -> Self {
        Series { bars }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn into_bars(self) -> Vec<Bar> {
        self.bars
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.close).collect()
    }

    pub fn opens(&self) -> Column {
        self.bars.iter().map(|bar| bar.open).collect()
    }

    pub fn highs(&self) -> Column {
        self.bars.iter().map(|bar| bar.high).collect()
    }

    pub fn lows(&self) -> Column {
        self.bars.iter().map(|bar| bar.low).collect()
    }

    pub fn volumes(&self) -> Column {
        self.bars.iter().map(|bar| bar.volume).collect()
    }

    /// 타임스탬프가 단조 비감소인지 확인
    pub fn is_chronological(&self) -> bool {
        self.bars.windows(2).all(|pair| pair[0].timestamp <= pair[1].timestamp)
    }
}

impl From<Vec<Bar>> for Series {
    fn from(bars: Vec<Bar>) -> Self {
        Series::new(bars)
    }
}

impl FromIterator<Bar> for Series {
    fn from_iter<I: IntoIterator<Item = Bar>>(iter: I) -> Self {
        Series::new(iter.into_iter().collect())
    }
}

/// Bars plus one column per catalog indicator, stored column-wise.
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentedSeries {
    bars: Vec<Bar>,
    columns: Vec<Column>,
}

impl AugmentedSeries {
    /// 모든 지표가 미정의 상태인 시리즈 생성
    pub fn new(bars: Vec<Bar>) -> Self {
        let columns = vec![vec![None; bars.len()]; Indicator::COUNT];
        AugmentedSeries { bars, columns }
    }

    pub fn empty() -> Self {
        AugmentedSeries::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn column(&self, indicator: Indicator) -> &[Option<f64>] {
        &self.columns[indicator.index()]
    }

    pub fn value(&self, index: usize, indicator: Indicator) -> Option<f64> {
        self.columns[indicator.index()].get(index).copied().flatten()
    }

    /// Replaces a whole column. Stages own the columns they write.
    pub(crate) fn set_column(&mut self, indicator: Indicator, column: Column) {
        debug_assert_eq!(column.len(), self.bars.len());
        self.columns[indicator.index()] = column;
    }

    pub fn row(&self, index: usize) -> Option<AugmentedBar<'_>> {
        (index < self.len()).then(|| AugmentedBar { series: self, index })
    }

    pub fn rows(&self) -> impl Iterator<Item = AugmentedBar<'_>> + '_ {
        (0..self.len()).map(move |index| AugmentedBar { series: self, index })
    }

    /// Drops every row whose `indicator` value is undefined.
    pub fn retain_where_defined(&mut self, indicator: Indicator) {
        let keep: Vec<bool> = self.columns[indicator.index()]
            .iter()
            .map(Option::is_some)
            .collect();

        let mut flags = keep.iter();
        self.bars.retain(|_| *flags.next().unwrap_or(&false));

        for column in &mut self.columns {
            let mut flags = keep.iter();
            column.retain(|_| *flags.next().unwrap_or(&false));
        }
    }
}

/// Borrowed view of one augmented row.
#[derive(Debug, Clone, Copy)]
pub struct AugmentedBar<'a> {
    series: &'a AugmentedSeries,
    index: usize,
}

impl<'a> AugmentedBar<'a> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn bar(&self) -> &'a Bar {
        &self.series.bars[self.index]
    }

    pub fn get(&self, indicator: Indicator) -> Option<f64> {
        self.series.value(self.index, indicator)
    }

    pub fn values(&self) -> impl Iterator<Item = (Indicator, Option<f64>)> + 'a {
        let series = self.series;
        let index = self.index;
        Indicator::ALL
            .into_iter()
            .map(move |indicator| (indicator, series.value(index, indicator)))
    }
}
