use super::model::Dataset;

/// How many numeric columns a bar chart shows.
pub const CHART_SERIES: usize = 2;

/// One bar series: a numeric column keyed by row position.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub name: String,
    /// `None` where the cell is missing (no bar drawn).
    pub values: Vec<Option<f64>>,
}

/// The first [`CHART_SERIES`] numeric columns, in column order.
/// Fewer numeric columns simply give fewer series.
pub fn bar_series(dataset: &Dataset) -> Vec<BarSeries> {
    dataset
        .columns()
        .iter()
        .filter(|c| c.is_numeric())
        .take(CHART_SERIES)
        .map(|c| BarSeries {
            name: c.name.clone(),
            values: c.values.iter().map(|v| v.as_f64()).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Column};

    #[test]
    fn picks_first_two_numeric_columns() {
        let ds = Dataset::new(vec![
            Column::new("label", vec![CellValue::Text("a".into()), CellValue::Text("b".into())]),
            Column::new("x", vec![CellValue::Integer(1), CellValue::Integer(2)]),
            Column::new("flag", vec![CellValue::Bool(true), CellValue::Bool(false)]),
            Column::new("y", vec![CellValue::Float(0.5), CellValue::Null]),
            Column::new("z", vec![CellValue::Float(9.0), CellValue::Float(8.0)]),
        ])
        .unwrap();

        let series = bar_series(&ds);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].name, "x");
        assert_eq!(series[0].values, vec![Some(1.0), Some(2.0)]);
        assert_eq!(series[1].name, "y");
        assert_eq!(series[1].values, vec![Some(0.5), None]);
    }

    #[test]
    fn no_numeric_columns_means_no_series() {
        let ds = Dataset::new(vec![Column::new("t", vec![CellValue::Text("a".into())])]).unwrap();
        assert!(bar_series(&ds).is_empty());
    }
}
