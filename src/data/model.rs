use std::collections::HashSet;
use std::fmt;

use crate::error::{Result, SweepError};

// ---------------------------------------------------------------------------
// CellValue – a single cell in a column
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common Pandas dtypes.
/// `Null` is the missing-value marker.
#[derive(Debug, Clone)]
pub enum CellValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

// -- Manual Eq/Ord/Hash so rows can be compared and hashed for deduplication --

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                Text(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::Text(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            // Debug keeps a trailing ".0" on integral floats and round-trips exactly.
            CellValue::Float(v) => write!(f, "{v:?}"),
            CellValue::Bool(true) => write!(f, "True"),
            CellValue::Bool(false) => write!(f, "False"),
            CellValue::Null => write!(f, "NaN"),
        }
    }
}

impl CellValue {
    /// Interpret the value as an `f64` if it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// Column
// ---------------------------------------------------------------------------

/// Logical type of a column, inferred from its non-missing values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// No non-missing values at all.
    Empty,
    Integer,
    Float,
    Boolean,
    Text,
    /// A mix of incompatible value types (kept as-is, never numeric).
    Mixed,
}

/// A named sequence of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn kind(&self) -> ColumnKind {
        let mut kind = ColumnKind::Empty;
        for value in &self.values {
            let this = match value {
                CellValue::Null => continue,
                CellValue::Bool(_) => ColumnKind::Boolean,
                CellValue::Integer(_) => ColumnKind::Integer,
                CellValue::Float(_) => ColumnKind::Float,
                CellValue::Text(_) => ColumnKind::Text,
            };
            kind = match (kind, this) {
                (ColumnKind::Empty, k) => k,
                (a, b) if a == b => a,
                (ColumnKind::Integer, ColumnKind::Float) | (ColumnKind::Float, ColumnKind::Integer) => {
                    ColumnKind::Float
                }
                _ => return ColumnKind::Mixed,
            };
        }
        kind
    }

    /// Numeric columns are the ones eligible for mean-fill and charting.
    /// Booleans are not numeric; an all-missing column is.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self.kind(),
            ColumnKind::Empty | ColumnKind::Integer | ColumnKind::Float
        )
    }

    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_null()).count()
    }

    /// Arithmetic mean of the non-missing numeric values, `None` if there are none.
    pub fn mean(&self) -> Option<f64> {
        let (sum, count) = self
            .values
            .iter()
            .filter_map(CellValue::as_f64)
            .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
        (count > 0).then(|| sum / count as f64)
    }
}

// ---------------------------------------------------------------------------
// Dataset – ordered, uniquely named columns of equal length
// ---------------------------------------------------------------------------

/// In-memory tabular data. Row order is the source order.
///
/// The row count is stored separately so that projecting onto zero columns
/// still remembers how many rows the data had.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: Vec<Column>,
    rows: usize,
}

impl Dataset {
    /// Build a dataset from columns, checking name uniqueness and lengths.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let rows = columns.first().map_or(0, |c| c.values.len());
        Self::with_rows(columns, rows)
    }

    /// Like [`Dataset::new`] but with an explicit row count (needed when there are no columns).
    pub fn with_rows(columns: Vec<Column>, rows: usize) -> Result<Self> {
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(SweepError::DuplicateColumn(column.name.clone()));
            }
            if column.values.len() != rows {
                return Err(SweepError::LengthMismatch {
                    column: column.name.clone(),
                    expected: rows,
                    actual: column.values.len(),
                });
            }
        }
        Ok(Self { columns, rows })
    }

    /// Build from a header and row-major records. Every row must have one cell per header.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self> {
        let row_count = rows.len();
        let mut columns: Vec<Column> = headers
            .into_iter()
            .map(|name| Column::new(name, Vec::with_capacity(row_count)))
            .collect();
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != columns.len() {
                return Err(SweepError::RowLength {
                    row: index,
                    expected: columns.len(),
                    actual: row.len(),
                });
            }
            for (column, value) in columns.iter_mut().zip(row) {
                column.values.push(value);
            }
        }
        Self::with_rows(columns, row_count)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub(crate) fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Whether there is no data to show.
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.columns.is_empty()
    }

    /// Borrow row `index` across all columns.
    pub fn row(&self, index: usize) -> Vec<&CellValue> {
        self.columns.iter().map(|c| &c.values[index]).collect()
    }

    /// Total number of missing cells.
    pub fn null_count(&self) -> usize {
        self.columns.iter().map(Column::null_count).sum()
    }

    /// The first `n` rows, like `DataFrame.head`.
    pub fn head(&self, n: usize) -> Dataset {
        let rows = n.min(self.rows);
        Dataset {
            columns: self
                .columns
                .iter()
                .map(|c| Column::new(c.name.clone(), c.values[..rows].to_vec()))
                .collect(),
            rows,
        }
    }

    /// Keep only the rows whose flag is `true`, preserving order.
    pub(crate) fn retain_rows(&mut self, keep: &[bool]) {
        for column in &mut self.columns {
            let mut flags = keep.iter();
            column.values.retain(|_| flags.next().copied().unwrap_or(false));
        }
        self.rows = keep.iter().filter(|k| **k).count();
    }
}
