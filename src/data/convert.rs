use std::io::{Cursor, Seek};
use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};

use super::model::{CellValue, Dataset};
use crate::error::{Result, SweepError};

pub const CSV_MIME: &str = "text/csv";
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

// ---------------------------------------------------------------------------
// Conversion target
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConversionTarget {
    #[default]
    Csv,
    Excel,
}

impl ConversionTarget {
    pub const ALL: [ConversionTarget; 2] = [ConversionTarget::Csv, ConversionTarget::Excel];

    pub fn label(self) -> &'static str {
        match self {
            ConversionTarget::Csv => "CSV",
            ConversionTarget::Excel => "Excel",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ConversionTarget::Csv => "csv",
            ConversionTarget::Excel => "xlsx",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ConversionTarget::Csv => CSV_MIME,
            ConversionTarget::Excel => XLSX_MIME,
        }
    }
}

// ---------------------------------------------------------------------------
// Converted output
// ---------------------------------------------------------------------------

/// A serialized dataset ready to be saved.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedFile {
    pub file_name: String,
    pub mime_type: &'static str,
    pub target: ConversionTarget,
    pub bytes: Vec<u8>,
}

/// Original stem with the target's extension: `sales.xlsx` → `sales.csv`.
pub fn output_name(original: &str, target: ConversionTarget) -> String {
    Path::new(original)
        .with_extension(target.extension())
        .to_string_lossy()
        .into_owned()
}

/// Serialize `dataset` (no index column) for download under a name derived from `original`.
pub fn convert(
    dataset: &Dataset,
    original: &str,
    target: ConversionTarget,
) -> Result<ConvertedFile> {
    let bytes = match target {
        ConversionTarget::Csv => write_csv(dataset)?,
        ConversionTarget::Excel => write_xlsx(dataset)?,
    };
    Ok(ConvertedFile {
        file_name: output_name(original, target),
        mime_type: target.mime_type(),
        target,
        bytes,
    })
}

// ---------------------------------------------------------------------------
// CSV writer
// ---------------------------------------------------------------------------

fn csv_field(value: &CellValue) -> String {
    match value {
        CellValue::Null => String::new(),
        other => other.to_string(),
    }
}

fn csv_err(e: impl std::fmt::Display) -> SweepError {
    SweepError::Write {
        format: "CSV",
        reason: e.to_string(),
    }
}

/// Header plus one line per row. A dataset without columns has nothing to write.
pub fn write_csv(dataset: &Dataset) -> Result<Vec<u8>> {
    if dataset.width() == 0 {
        return Ok(Vec::new());
    }
    let mut writer = csv::Writer::from_writer(Cursor::new(Vec::new()));
    writer
        .write_record(dataset.column_names())
        .map_err(csv_err)?;
    for i in 0..dataset.row_count() {
        let record: Vec<String> = dataset.row(i).into_iter().map(csv_field).collect();
        writer.write_record(&record).map_err(csv_err)?;
    }
    let mut buffer = writer.into_inner().map_err(csv_err)?;
    buffer.rewind().map_err(csv_err)?;
    Ok(buffer.into_inner())
}

// ---------------------------------------------------------------------------
// Excel writer
// ---------------------------------------------------------------------------

pub fn write_xlsx(dataset: &Dataset) -> Result<Vec<u8>> {
    let xlsx_err = |e: rust_xlsxwriter::XlsxError| SweepError::Write {
        format: "Excel",
        reason: e.to_string(),
    };

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let header = Format::new().set_bold();

    for (c, column) in dataset.columns().iter().enumerate() {
        let col = u16::try_from(c).map_err(|_| SweepError::Write {
            format: "Excel",
            reason: format!("too many columns ({})", dataset.width()),
        })?;
        sheet
            .write_string_with_format(0, col, &column.name, &header)
            .map_err(xlsx_err)?;

        for (r, value) in column.values.iter().enumerate() {
            let row = u32::try_from(r + 1).map_err(|_| SweepError::Write {
                format: "Excel",
                reason: format!("too many rows ({})", dataset.row_count()),
            })?;
            match value {
                CellValue::Null => {}
                CellValue::Bool(b) => {
                    sheet.write_boolean(row, col, *b).map_err(xlsx_err)?;
                }
                CellValue::Integer(i) => {
                    sheet.write_number(row, col, *i as f64).map_err(xlsx_err)?;
                }
                CellValue::Float(f) => {
                    sheet.write_number(row, col, *f).map_err(xlsx_err)?;
                }
                CellValue::Text(s) => {
                    sheet.write_string(row, col, s).map_err(xlsx_err)?;
                }
            }
        }
    }

    workbook.save_to_buffer().map_err(xlsx_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::{load_upload, Upload};
    use crate::data::model::Column;

    fn csv(text: &str) -> Dataset {
        load_upload(&Upload::new("in.csv", text.as_bytes().to_vec())).unwrap()
    }

    #[test]
    fn output_names_and_mime_types() {
        let file = convert(&csv("a\n1\n"), "sales.xlsx", ConversionTarget::Csv).unwrap();
        assert_eq!(file.file_name, "sales.csv");
        assert_eq!(file.mime_type, "text/csv");

        let file = convert(&csv("a\n1\n"), "report.v2.CSV", ConversionTarget::Excel).unwrap();
        assert_eq!(file.file_name, "report.v2.xlsx");
        assert_eq!(
            file.mime_type,
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
    }

    #[test]
    fn csv_output_has_no_index_column() {
        let bytes = write_csv(&csv("a,b\n1,\n2,4\n")).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "a,b\n1,\n2,4.0\n");
    }

    #[test]
    fn csv_without_columns_is_empty() {
        let ds = Dataset::with_rows(Vec::new(), 3).unwrap();
        assert!(write_csv(&ds).unwrap().is_empty());
    }

    #[test]
    fn csv_round_trip_reproduces_dataset() {
        let original = csv("id,name,score,ok\n1,\"Smith, J\",2.5,True\n2,,,False\n3,Lee,7.25,True\n");
        let bytes = write_csv(&original).unwrap();
        let again = load_upload(&Upload::new("out.csv", bytes)).unwrap();
        assert_eq!(again, original);
    }

    #[test]
    fn xlsx_round_trip_reproduces_dataset() {
        let original = Dataset::new(vec![
            Column::new("id", vec![CellValue::Integer(1), CellValue::Integer(2)]),
            Column::new("name", vec![CellValue::Text("ann".into()), CellValue::Null]),
            Column::new("score", vec![CellValue::Float(0.5), CellValue::Null]),
            Column::new("ok", vec![CellValue::Bool(true), CellValue::Bool(false)]),
        ])
        .unwrap();

        let bytes = write_xlsx(&original).unwrap();
        let again = load_upload(&Upload::new("out.xlsx", bytes)).unwrap();
        assert_eq!(again, original);
    }

    #[test]
    fn excel_output_starts_with_zip_magic() {
        let file = convert(&csv("a\n1\n"), "x.csv", ConversionTarget::Excel).unwrap();
        assert_eq!(&file.bytes[..2], b"PK");
    }
}
