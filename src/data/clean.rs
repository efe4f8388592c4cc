use std::collections::HashSet;

use super::model::{CellValue, Dataset};

// ---------------------------------------------------------------------------
// Deduplication
// ---------------------------------------------------------------------------

/// Remove every row that equals an earlier row across all columns.
/// Keeps first occurrences in their original order; returns the number of rows removed.
pub fn drop_duplicates(dataset: &mut Dataset) -> usize {
    let keep: Vec<bool> = {
        let mut seen: HashSet<Vec<&CellValue>> = HashSet::with_capacity(dataset.row_count());
        (0..dataset.row_count())
            .map(|i| seen.insert(dataset.row(i)))
            .collect()
    };
    let removed = keep.iter().filter(|k| !**k).count();
    if removed > 0 {
        dataset.retain_rows(&keep);
    }
    removed
}

// ---------------------------------------------------------------------------
// Mean-fill
// ---------------------------------------------------------------------------

/// What a mean-fill pass did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FillReport {
    /// Number of missing cells that were replaced.
    pub filled: usize,
    /// Numeric columns with missing cells but no values to average; left as-is.
    pub undefined_means: Vec<String>,
}

/// Replace missing cells of every numeric column with that column's mean.
///
/// * Non-numeric columns are untouched.
/// * A column with no non-missing values keeps its markers and is reported
///   in [`FillReport::undefined_means`].
/// * Integer columns that receive a fill become float columns.
pub fn fill_missing_with_mean(dataset: &mut Dataset) -> FillReport {
    let mut report = FillReport::default();

    for column in dataset.columns_mut() {
        if !column.is_numeric() || column.null_count() == 0 {
            continue;
        }
        let Some(mean) = column.mean() else {
            log::warn!("Column '{}' has no values; mean is undefined", column.name);
            report.undefined_means.push(column.name.clone());
            continue;
        };
        for value in &mut column.values {
            match value {
                CellValue::Null => {
                    *value = CellValue::Float(mean);
                    report.filled += 1;
                }
                CellValue::Integer(i) => {
                    let promoted = *i as f64;
                    *value = CellValue::Float(promoted);
                }
                _ => {}
            }
        }
    }

    report
}
