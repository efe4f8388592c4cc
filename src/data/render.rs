use super::model::Dataset;

const COLUMN_GAP: &str = "  ";

/// Render a dataset as a plain-text table without a row index.
///
/// Each column is right-aligned to its widest cell (header included) and
/// missing cells print as `NaN`. Empty data renders a short summary instead.
pub fn render_table(dataset: &Dataset) -> String {
    if dataset.is_empty() {
        let index: Vec<String> = (0..dataset.row_count()).map(|i| i.to_string()).collect();
        return format!(
            "Empty DataFrame\nColumns: [{}]\nIndex: [{}]",
            dataset.column_names().join(", "),
            index.join(", ")
        );
    }

    let cells: Vec<Vec<String>> = dataset
        .columns()
        .iter()
        .map(|column| {
            std::iter::once(column.name.clone())
                .chain(column.values.iter().map(|v| v.to_string()))
                .collect()
        })
        .collect();
    let widths: Vec<usize> = cells
        .iter()
        .map(|col| col.iter().map(|s| s.chars().count()).max().unwrap_or(0))
        .collect();

    (0..=dataset.row_count())
        .map(|line| {
            cells
                .iter()
                .zip(&widths)
                .map(|(col, width)| format!("{:>width$}", col[line], width = *width))
                .collect::<Vec<_>>()
                .join(COLUMN_GAP)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
