use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};

use super::model::{CellValue, Column, ColumnKind, Dataset};
use crate::error::{Result, SweepError};

/// Tokens read as missing values, on top of the empty field.
const NA_TOKENS: &[&str] = &[
    "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "NULL", "null", "None", "<NA>", "#N/A",
];

// ---------------------------------------------------------------------------
// Upload – raw file handed to the pipeline
// ---------------------------------------------------------------------------

/// File type tag derived from the file-name extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Csv,
    Xlsx,
    Pdf,
    Txt,
    Unsupported,
}

impl FileKind {
    /// Case-insensitive extension lookup. No content sniffing.
    pub fn from_name(name: &str) -> Self {
        match extension_of(name).as_str() {
            "csv" => FileKind::Csv,
            "xlsx" => FileKind::Xlsx,
            "pdf" => FileKind::Pdf,
            "txt" => FileKind::Txt,
            _ => FileKind::Unsupported,
        }
    }
}

/// Lower-cased extension without the dot (empty if there is none).
pub fn extension_of(name: &str) -> String {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}

/// An uploaded file: name, raw bytes and the type tag derived from the name.
#[derive(Debug, Clone)]
pub struct Upload {
    pub name: String,
    pub bytes: Vec<u8>,
    pub kind: FileKind,
}

impl Upload {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let kind = FileKind::from_name(&name);
        Self { name, bytes, kind }
    }

    /// Read a file from disk, keeping only its file name.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| SweepError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, bytes))
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Parse an upload into a dataset. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – comma-separated text, first row is the header
/// * `.xlsx` – first worksheet, first used row is the header
pub fn load_upload(upload: &Upload) -> Result<Dataset> {
    match upload.kind {
        FileKind::Csv => load_csv(&upload.name, &upload.bytes),
        FileKind::Xlsx => load_xlsx(&upload.name, &upload.bytes),
        _ => Err(SweepError::UnsupportedFormat {
            extension: format!(".{}", extension_of(&upload.name)),
        }),
    }
}

// ---------------------------------------------------------------------------
// Header normalisation
// ---------------------------------------------------------------------------

/// Blank headers become `Unnamed: <i>`, repeats become `name.1`, `name.2`, ...
fn normalize_headers(raw: Vec<String>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut out: Vec<String> = Vec::with_capacity(raw.len());
    for (i, header) in raw.into_iter().enumerate() {
        let base = if header.trim().is_empty() {
            format!("Unnamed: {i}")
        } else {
            header
        };
        let mut name = base.clone();
        while out.contains(&name) {
            let n = seen.entry(base.clone()).or_insert(0);
            *n += 1;
            name = format!("{base}.{n}");
        }
        out.push(name);
    }
    out
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(file: &str, bytes: &[u8]) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let raw_headers: Vec<String> = reader
        .headers()
        .map_err(|e| SweepError::parse(file, e))?
        .iter()
        .map(|h| h.to_string())
        .collect();
    if raw_headers.is_empty() {
        return Err(SweepError::parse(file, "no columns to parse"));
    }
    let headers = normalize_headers(raw_headers);

    let mut raw_columns: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|e| SweepError::parse(file, format!("row {row_no}: {e}")))?;
        if record.len() > headers.len() {
            return Err(SweepError::parse(
                file,
                format!(
                    "row {row_no}: expected {} fields, saw {}",
                    headers.len(),
                    record.len()
                ),
            ));
        }
        for (col_idx, column) in raw_columns.iter_mut().enumerate() {
            column.push(record.get(col_idx).unwrap_or("").to_string());
        }
    }

    let rows = raw_columns.first().map_or(0, Vec::len);
    let columns = headers
        .into_iter()
        .zip(raw_columns)
        .map(|(name, raw)| Column::new(name, infer_column(raw)))
        .collect();
    let dataset = Dataset::with_rows(columns, rows)?;
    log::debug!(
        "Parsed CSV {file}: {} rows x {} columns",
        dataset.row_count(),
        dataset.width()
    );
    Ok(dataset)
}

/// Empty fields, NA tokens and any spelling `f64` parses as NaN (`NAN`, `+nan`, ...).
fn is_missing(s: &str) -> bool {
    s.is_empty() || NA_TOKENS.contains(&s) || s.trim().parse::<f64>().is_ok_and(f64::is_nan)
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Type a whole column at once: integers, then floats, then booleans, else text.
/// Integer columns with missing cells become float columns.
fn infer_column(raw: Vec<String>) -> Vec<CellValue> {
    let present: Vec<&str> = raw
        .iter()
        .map(String::as_str)
        .filter(|s| !is_missing(s))
        .collect();
    let has_missing = present.len() != raw.len();

    let all_ints = present.iter().all(|s| s.trim().parse::<i64>().is_ok());
    let all_floats = present.iter().all(|s| s.trim().parse::<f64>().is_ok());
    let all_bools = present.iter().all(|s| parse_bool(s).is_some());

    raw.into_iter()
        .map(|s| {
            if is_missing(&s) {
                return CellValue::Null;
            }
            let t = s.trim();
            if all_ints && !has_missing {
                t.parse().map(CellValue::Integer).unwrap_or(CellValue::Null)
            } else if all_floats {
                t.parse().map(CellValue::Float).unwrap_or(CellValue::Null)
            } else if all_bools {
                parse_bool(t).map(CellValue::Bool).unwrap_or(CellValue::Null)
            } else {
                CellValue::Text(s)
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Excel loader
// ---------------------------------------------------------------------------

fn load_xlsx(file: &str, bytes: &[u8]) -> Result<Dataset> {
    let mut workbook: Xlsx<_> =
        open_workbook_from_rs(Cursor::new(bytes)).map_err(|e| SweepError::parse(file, e))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SweepError::parse(file, "workbook has no worksheets"))?
        .map_err(|e| SweepError::parse(file, e))?;

    let mut rows = range.rows();
    let header_row = rows
        .next()
        .ok_or_else(|| SweepError::parse(file, "no columns to parse"))?;
    let headers = normalize_headers(
        header_row
            .iter()
            .map(|cell| match cell {
                Data::Empty => String::new(),
                other => other.to_string(),
            })
            .collect(),
    );

    let records: Vec<Vec<CellValue>> = rows
        .map(|row| row.iter().map(cell_from_excel).collect())
        .collect();

    let mut dataset = Dataset::from_rows(headers, records)?;
    for column in dataset.columns_mut() {
        normalize_excel_numbers(column);
    }
    log::debug!(
        "Parsed workbook {file}: {} rows x {} columns",
        dataset.row_count(),
        dataset.width()
    );
    Ok(dataset)
}

fn cell_from_excel(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Null,
        Data::String(s) if s.is_empty() => CellValue::Null,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        // Dates, durations and error cells are kept as their display text.
        other => CellValue::Text(other.to_string()),
    }
}

/// Workbooks store every number as a float. An all-numeric column of integral
/// values without gaps reads back as integers, otherwise as floats.
fn normalize_excel_numbers(column: &mut Column) {
    if !matches!(column.kind(), ColumnKind::Integer | ColumnKind::Float) {
        return;
    }
    let has_missing = column.null_count() > 0;
    let integral = column.values.iter().all(|v| match v {
        CellValue::Float(f) => f.fract() == 0.0 && f.abs() < i64::MAX as f64,
        _ => true,
    });
    for value in &mut column.values {
        *value = match (&*value, integral && !has_missing) {
            (CellValue::Float(f), true) => CellValue::Integer(*f as i64),
            (CellValue::Integer(i), false) => CellValue::Float(*i as f64),
            (other, _) => other.clone(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn csv_upload(text: &str) -> Upload {
        Upload::new("data.csv", text.as_bytes().to_vec())
    }

    #[test]
    fn kind_from_extension_is_case_insensitive() {
        assert_eq!(FileKind::from_name("report.CSV"), FileKind::Csv);
        assert_eq!(FileKind::from_name("book.Xlsx"), FileKind::Xlsx);
        assert_eq!(FileKind::from_name("scan.pdf"), FileKind::Pdf);
        assert_eq!(FileKind::from_name("notes.txt"), FileKind::Txt);
        assert_eq!(FileKind::from_name("data.json"), FileKind::Unsupported);
        assert_eq!(FileKind::from_name("README"), FileKind::Unsupported);
    }

    #[test]
    fn csv_columns_are_typed() {
        let ds = load_upload(&csv_upload("id,score,name,flag\n1,2.5,ann,True\n2,3,bob,false\n"))
            .unwrap();
        assert_eq!(ds.column_names(), vec!["id", "score", "name", "flag"]);
        assert_eq!(ds.columns()[0].kind(), ColumnKind::Integer);
        assert_eq!(ds.columns()[1].kind(), ColumnKind::Float);
        assert_eq!(ds.columns()[2].kind(), ColumnKind::Text);
        assert_eq!(ds.columns()[3].kind(), ColumnKind::Boolean);
        assert_eq!(ds.columns()[1].values[1], CellValue::Float(3.0));
    }

    #[test]
    fn csv_missing_cells_make_integer_columns_float() {
        let ds = load_upload(&csv_upload("a,b\n1,\n2,4\n")).unwrap();
        let b = ds.column("b").unwrap();
        assert_eq!(b.values, vec![CellValue::Null, CellValue::Float(4.0)]);
        assert_eq!(ds.column("a").unwrap().kind(), ColumnKind::Integer);
    }

    #[test]
    fn csv_na_tokens_are_missing() {
        let ds = load_upload(&csv_upload("x,y\nNA,a\nn/a,NULL\n3,b\n")).unwrap();
        assert_eq!(ds.column("x").unwrap().null_count(), 2);
        assert_eq!(ds.column("y").unwrap().null_count(), 1);
    }

    #[test]
    fn csv_nan_spellings_are_missing() {
        let ds = load_upload(&csv_upload("a\n1\nNAN\n3\n-nan\n+NaN\n")).unwrap();
        assert_eq!(
            ds.column("a").unwrap().values,
            vec![
                CellValue::Float(1.0),
                CellValue::Null,
                CellValue::Float(3.0),
                CellValue::Null,
                CellValue::Null,
            ]
        );
    }

    #[test]
    fn csv_headers_are_made_unique() {
        let ds = load_upload(&csv_upload("a,a,,a\n1,2,3,4\n")).unwrap();
        assert_eq!(ds.column_names(), vec!["a", "a.1", "Unnamed: 2", "a.2"]);
    }

    #[test]
    fn csv_short_rows_are_padded_long_rows_fail() {
        let ds = load_upload(&csv_upload("a,b\n1\n2,3\n")).unwrap();
        assert_eq!(ds.column("b").unwrap().values[0], CellValue::Null);

        let err = load_upload(&csv_upload("a,b\n1,2,3\n")).unwrap_err();
        assert!(matches!(err, SweepError::Parse { .. }));
    }

    #[test]
    fn empty_csv_is_a_parse_failure() {
        let err = load_upload(&csv_upload("")).unwrap_err();
        assert!(matches!(err, SweepError::Parse { .. }));
    }

    #[test]
    fn unsupported_extension_creates_no_dataset() {
        let err = load_upload(&Upload::new("data.json", b"{}".to_vec())).unwrap_err();
        match err {
            SweepError::UnsupportedFormat { extension } => assert_eq!(extension, ".json"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn xlsx_first_sheet_is_loaded() {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "name").unwrap();
        sheet.write_string(0, 1, "qty").unwrap();
        sheet.write_string(0, 2, "price").unwrap();
        sheet.write_string(1, 0, "apple").unwrap();
        sheet.write_number(1, 1, 3.0).unwrap();
        sheet.write_number(1, 2, 1.25).unwrap();
        sheet.write_string(2, 0, "pear").unwrap();
        sheet.write_number(2, 1, 5.0).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let ds = load_upload(&Upload::new("stock.xlsx", bytes)).unwrap();
        assert_eq!(ds.column_names(), vec!["name", "qty", "price"]);
        assert_eq!(ds.row_count(), 2);
        assert_eq!(
            ds.column("qty").unwrap().values,
            vec![CellValue::Integer(3), CellValue::Integer(5)]
        );
        assert_eq!(
            ds.column("price").unwrap().values,
            vec![CellValue::Float(1.25), CellValue::Null]
        );
    }

    #[test]
    fn malformed_xlsx_is_a_parse_failure() {
        let err = load_upload(&Upload::new("broken.xlsx", b"not a zip".to_vec())).unwrap_err();
        assert!(matches!(err, SweepError::Parse { .. }));
    }

    #[test]
    fn upload_size_in_bytes() {
        let upload = Upload::new("a.csv", vec![0; 2048]);
        assert_eq!(upload.size(), 2048);
    }
}
