use std::collections::HashSet;

use super::model::{Column, Dataset};
use crate::error::{Result, SweepError};

// ---------------------------------------------------------------------------
// Column projection
// ---------------------------------------------------------------------------

/// Project `dataset` onto `columns`, in the given order. Rows are unchanged.
///
/// Every name must exist in the dataset and appear at most once. Selecting no
/// columns yields a column-less dataset that still reports the original row count.
pub fn project(dataset: &Dataset, columns: &[String]) -> Result<Dataset> {
    let mut seen = HashSet::new();
    let mut picked: Vec<Column> = Vec::with_capacity(columns.len());
    for name in columns {
        if !seen.insert(name.as_str()) {
            return Err(SweepError::DuplicateColumn(name.clone()));
        }
        let column = dataset
            .column(name)
            .ok_or_else(|| SweepError::UnknownColumn(name.clone()))?;
        picked.push(column.clone());
    }
    Dataset::with_rows(picked, dataset.row_count())
}

/// Add `name` to the end of the selection, or drop it if already selected.
/// Mirrors a multi-select widget: newly picked columns go last.
pub fn toggle_column(selection: &mut Vec<String>, name: &str) {
    if let Some(pos) = selection.iter().position(|c| c == name) {
        selection.remove(pos);
    } else {
        selection.push(name.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    fn sample() -> Dataset {
        Dataset::from_rows(
            vec!["a".into(), "b".into(), "c".into()],
            vec![
                vec![CellValue::Integer(1), CellValue::Text("x".into()), CellValue::Float(0.5)],
                vec![CellValue::Integer(2), CellValue::Null, CellValue::Float(1.5)],
            ],
        )
        .unwrap()
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn projection_keeps_requested_order_and_rows() {
        let ds = sample();
        let view = project(&ds, &names(&["c", "a"])).unwrap();
        assert_eq!(view.column_names(), vec!["c", "a"]);
        assert_eq!(view.row_count(), ds.row_count());
        assert_eq!(view.column("a"), ds.column("a"));
        assert_eq!(view.column("c"), ds.column("c"));
    }

    #[test]
    fn projection_onto_all_columns_is_identity() {
        let ds = sample();
        assert_eq!(project(&ds, &ds.column_names()).unwrap(), ds);
    }

    #[test]
    fn empty_selection_keeps_row_count() {
        let ds = sample();
        let view = project(&ds, &[]).unwrap();
        assert_eq!(view.width(), 0);
        assert_eq!(view.row_count(), 2);
        assert!(view.is_empty());
    }

    #[test]
    fn unknown_and_repeated_names_are_rejected() {
        let ds = sample();
        assert!(matches!(
            project(&ds, &names(&["zz"])),
            Err(SweepError::UnknownColumn(name)) if name == "zz"
        ));
        assert!(matches!(
            project(&ds, &names(&["a", "a"])),
            Err(SweepError::DuplicateColumn(_))
        ));
    }

    #[test]
    fn toggling_appends_and_removes() {
        let mut selection = names(&["a", "b", "c"]);
        toggle_column(&mut selection, "a");
        assert_eq!(selection, names(&["b", "c"]));
        toggle_column(&mut selection, "a");
        assert_eq!(selection, names(&["b", "c", "a"]));
    }
}
