//! Read an exported workbook back into projected rows

use crate::error::{ExportError, ExportResult};
use crate::schema::{column_index, COLUMN_COUNT};
use crate::types::{CellValue, ProjectedRow};
use calamine::{open_workbook, Cell, Data, Dimensions, Range, Xlsx};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Header and data rows of one worksheet
#[derive(Debug, Clone, PartialEq)]
pub struct SheetContents {
    pub sheet_name: String,
    pub header: Vec<String>,
    pub rows: Vec<ProjectedRow>,
}

/// Reads FinSearchComp workbooks written by [`super::RecordExporter`]
pub struct WorkbookReader {
    path: PathBuf,
    sheet_name: String,
}

impl WorkbookReader {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            sheet_name: super::SHEET_NAME.to_string(),
        }
    }

    /// Read a sheet other than the default one
    pub fn with_sheet_name(mut self, sheet_name: impl Into<String>) -> Self {
        self.sheet_name = sheet_name.into();
        self
    }

    pub fn read(&self) -> ExportResult<SheetContents> {
        if !self.path.exists() {
            return Err(ExportError::NotFound(self.path.clone()));
        }

        let mut workbook: Xlsx<_> = open_workbook(&self.path)
            .map_err(|e| ExportError::Read(format!("Failed to open Excel file: {}", e)))?;

        // Walk every stored cell, blanks included, so trailing rows whose
        // cells are all empty still count
        let mut reader = workbook.worksheet_cells_reader(&self.sheet_name).map_err(|e| {
            ExportError::Read(format!(
                "Failed to read worksheet '{}': {}",
                self.sheet_name, e
            ))
        })?;
        let dimensions = reader.dimensions();

        let mut cells = Vec::new();
        while let Some(cell) = reader
            .next_cell()
            .map_err(|e| ExportError::Read(format!("Failed to read cell: {}", e)))?
        {
            cells.push(Cell::new(
                cell.get_position(),
                Data::from(cell.get_value().clone()),
            ));
        }
        let range = Range::from_sparse(cells);

        let contents = self.process_sheet(&range, dimensions)?;
        debug!(rows = contents.rows.len(), path = %self.path.display(), "workbook read");
        Ok(contents)
    }

    fn process_sheet(
        &self,
        range: &Range<Data>,
        dimensions: Dimensions,
    ) -> ExportResult<SheetContents> {
        let Some((last_row, last_col)) = range.end() else {
            return Err(ExportError::Read(format!(
                "Worksheet '{}' is empty",
                self.sheet_name
            )));
        };
        let height = last_row.max(dimensions.end.0) as usize + 1;
        let width = last_col.max(dimensions.end.1) as usize + 1;

        // Map sheet columns to schema columns by header name
        let mut header = Vec::with_capacity(width);
        let mut positions: Vec<Option<usize>> = Vec::with_capacity(width);
        for col in 0..width {
            let name = range
                .get_value((0, col as u32))
                .map(Self::cell_text)
                .unwrap_or_default();
            let position = column_index(&name);
            if position.is_none() {
                warn!(column = %name, "column not in schema, skipping");
            }
            positions.push(position);
            header.push(name);
        }

        let mut rows = Vec::with_capacity(height.saturating_sub(1));
        for row in 1..height {
            let mut cells = vec![CellValue::Empty; COLUMN_COUNT];
            for (col, position) in positions.iter().enumerate() {
                if let (Some(idx), Some(cell)) =
                    (position, range.get_value((row as u32, col as u32)))
                {
                    cells[*idx] = Self::cell_value(cell);
                }
            }
            rows.push(ProjectedRow::from_cells(cells));
        }

        Ok(SheetContents {
            sheet_name: self.sheet_name.clone(),
            header,
            rows,
        })
    }

    fn cell_value(cell: &Data) -> CellValue {
        match cell {
            Data::String(s) if s.is_empty() => CellValue::Empty,
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Float(f) => CellValue::Number(*f),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Bool(b) => CellValue::Boolean(*b),
            Data::Empty => CellValue::Empty,
            other => CellValue::Text(other.to_string()),
        }
    }

    fn cell_text(cell: &Data) -> String {
        Self::cell_value(cell).to_string()
    }
}
