use crate::schema::{ALL_FIELDS, COLUMN_COUNT};
use serde_json::{Map, Value};
use std::fmt;

//==============================================================================
// Input Records
//==============================================================================

/// One JSON object from the input array (field name -> value)
///
/// Fields are optional and keys outside the schema are ignored.
pub type Record = Map<String, Value>;

//==============================================================================
// Cell Values
//==============================================================================

/// A single worksheet cell value
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Text string (never empty, empty strings become `Empty`)
    Text(String),
    /// Numeric value
    Number(f64),
    /// Boolean value
    Boolean(bool),
    /// Absent, null, or empty-string field
    Empty,
}

impl CellValue {
    /// Convert a JSON value into a cell value
    ///
    /// Arrays and objects are kept as their compact JSON text.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => CellValue::Empty,
            Value::Bool(b) => CellValue::Boolean(*b),
            Value::Number(n) => match n.as_f64() {
                Some(f) => CellValue::Number(f),
                None => CellValue::Text(n.to_string()),
            },
            Value::String(s) if s.is_empty() => CellValue::Empty,
            Value::String(s) => CellValue::Text(s.clone()),
            Value::Array(_) | Value::Object(_) => CellValue::Text(value.to_string()),
        }
    }

    /// Length of the display string in characters (used for column widths)
    pub fn display_len(&self) -> usize {
        match self {
            CellValue::Text(s) => s.chars().count(),
            CellValue::Empty => 0,
            other => other.to_string().chars().count(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Boolean(b) => write!(f, "{}", b),
            CellValue::Empty => Ok(()),
        }
    }
}

//==============================================================================
// Projected Rows
//==============================================================================

/// A record normalized to the fixed schema: exactly one cell per column
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedRow {
    cells: Vec<CellValue>,
}

impl ProjectedRow {
    /// Project a record onto the schema, defaulting absent fields to empty
    pub fn from_record(record: &Record) -> Self {
        let cells = ALL_FIELDS
            .iter()
            .map(|field| {
                record
                    .get(*field)
                    .map(CellValue::from_json)
                    .unwrap_or(CellValue::Empty)
            })
            .collect();
        Self { cells }
    }

    /// Build a row from cells already in schema order
    ///
    /// Short rows are padded with empty cells, extra cells are dropped.
    pub fn from_cells(mut cells: Vec<CellValue>) -> Self {
        cells.resize(COLUMN_COUNT, CellValue::Empty);
        Self { cells }
    }

    /// Cells in schema order
    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    /// Cell for a schema field
    pub fn cell(&self, field: &str) -> Option<&CellValue> {
        crate::schema::column_index(field).map(|idx| &self.cells[idx])
    }

    /// Display string for a schema field ("" when empty or not in the schema)
    pub fn get(&self, field: &str) -> String {
        self.cell(field).map(|c| c.to_string()).unwrap_or_default()
    }

    /// Whether the field holds a non-empty value
    pub fn is_filled(&self, field: &str) -> bool {
        self.cell(field)
            .map(|c| c.display_len() > 0)
            .unwrap_or(false)
    }
}
