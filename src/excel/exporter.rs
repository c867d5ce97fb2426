//! Excel exporter implementation - JSON records → styled .xlsx

use crate::error::{ExportError, ExportResult};
use crate::schema::{ALL_FIELDS, COLUMN_COUNT};
use crate::stats::TableStats;
use crate::types::{CellValue, ProjectedRow, Record};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatPattern, Workbook, Worksheet};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Name of the single worksheet in the exported workbook
pub const SHEET_NAME: &str = "FinSearchComp数据";

/// Header fill color (dark blue)
pub const HEADER_FILL: u32 = 0x366092;

/// Column width bounds, in Excel character units
pub const MIN_COLUMN_WIDTH: usize = 10;
pub const MAX_COLUMN_WIDTH: usize = 50;
const COLUMN_PADDING: usize = 2;

/// Records processed between two progress notifications
pub const DEFAULT_PROGRESS_INTERVAL: usize = 100;

/// Width of a column whose longest value (header included) has `max_len` chars
pub fn column_width(max_len: usize) -> usize {
    (max_len + COLUMN_PADDING).clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH)
}

/// Compute the width of every schema column from the header and the rows
pub fn column_widths(rows: &[ProjectedRow]) -> Vec<usize> {
    let mut longest: Vec<usize> = ALL_FIELDS.iter().map(|f| f.chars().count()).collect();

    for row in rows {
        for (idx, cell) in row.cells().iter().enumerate() {
            longest[idx] = longest[idx].max(cell.display_len());
        }
    }

    longest.into_iter().map(column_width).collect()
}

/// Exporter settings
#[derive(Debug, Clone)]
pub struct ExporterConfig {
    pub sheet_name: String,
    /// Notify progress every N records (0 disables notifications)
    pub progress_interval: usize,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            sheet_name: SHEET_NAME.to_string(),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

/// Milestones reported while an export runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportEvent {
    /// Input parsed; carries the record count
    Loaded(usize),
    /// Records projected so far, sent every `progress_interval` records
    Progress(usize),
    /// Workbook written to the output path
    Saved,
}

/// Outcome of a successful export
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub output: PathBuf,
    pub stats: TableStats,
}

/// Exports FinSearchComp JSON records to a single-sheet Excel workbook
pub struct RecordExporter {
    config: ExporterConfig,
}

impl Default for RecordExporter {
    fn default() -> Self {
        Self::new(ExporterConfig::default())
    }
}

impl RecordExporter {
    /// Create a new exporter
    pub fn new(config: ExporterConfig) -> Self {
        Self { config }
    }

    /// Read the input file as a JSON array of objects
    pub fn load_records(&self, input: &Path) -> ExportResult<Vec<Record>> {
        let content = fs::read_to_string(input).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ExportError::NotFound(input.to_path_buf()),
            _ => ExportError::Io(e),
        })?;

        let records: Vec<Record> = serde_json::from_str(&content)?;
        debug!(count = records.len(), path = %input.display(), "loaded records");
        Ok(records)
    }

    /// Project records onto the schema, calling `on_progress` every
    /// `progress_interval` records with the number processed so far
    pub fn project<F>(&self, records: &[Record], mut on_progress: F) -> Vec<ProjectedRow>
    where
        F: FnMut(usize),
    {
        let interval = self.config.progress_interval;
        let mut rows = Vec::with_capacity(records.len());

        for (idx, record) in records.iter().enumerate() {
            rows.push(ProjectedRow::from_record(record));

            let processed = idx + 1;
            if interval > 0 && processed % interval == 0 {
                on_progress(processed);
            }
        }

        rows
    }

    /// Write projected rows to `output` as a styled workbook
    ///
    /// The workbook is assembled in memory and saved once, so a failure
    /// before the save leaves no file behind.
    pub fn write_workbook(&self, rows: &[ProjectedRow], output: &Path) -> ExportResult<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(&self.config.sheet_name)
            .map_err(|e| ExportError::Write(format!("Failed to set worksheet name: {}", e)))?;

        Self::write_header(worksheet)?;

        let data_format = Format::new().set_align(FormatAlign::Top).set_text_wrap();
        for (row_idx, row) in rows.iter().enumerate() {
            let excel_row = (row_idx + 1) as u32; // row 0 is the header
            for (col_idx, cell) in row.cells().iter().enumerate() {
                Self::write_cell(worksheet, excel_row, col_idx as u16, cell, &data_format)?;
            }
        }

        for (col_idx, width) in column_widths(rows).into_iter().enumerate() {
            worksheet
                .set_column_width(col_idx as u16, width as f64)
                .map_err(|e| ExportError::Write(format!("Failed to set column width: {}", e)))?;
        }

        workbook
            .save(output)
            .map_err(|e| ExportError::Write(format!("Failed to save Excel file: {}", e)))?;

        info!(rows = rows.len(), path = %output.display(), "workbook saved");
        Ok(())
    }

    /// Full export: load, project, write, and compute statistics,
    /// reporting each milestone to `on_event`
    pub fn export_with_events<F>(
        &self,
        input: &Path,
        output: &Path,
        mut on_event: F,
    ) -> ExportResult<ExportReport>
    where
        F: FnMut(ExportEvent),
    {
        let records = self.load_records(input)?;
        on_event(ExportEvent::Loaded(records.len()));

        let rows = self.project(&records, |n| on_event(ExportEvent::Progress(n)));
        self.write_workbook(&rows, output)?;
        on_event(ExportEvent::Saved);

        Ok(ExportReport {
            output: output.to_path_buf(),
            stats: TableStats::compute(&rows),
        })
    }

    /// Full export without notifications
    pub fn export(&self, input: &Path, output: &Path) -> ExportResult<ExportReport> {
        self.export_with_events(input, output, |_| {})
    }

    /// Header row: bold white text on a solid blue fill, centered and wrapped
    fn write_header(worksheet: &mut Worksheet) -> ExportResult<()> {
        let header_format = Format::new()
            .set_bold()
            .set_font_color(Color::White)
            .set_background_color(Color::RGB(HEADER_FILL))
            .set_pattern(FormatPattern::Solid)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_text_wrap();

        debug_assert_eq!(ALL_FIELDS.len(), COLUMN_COUNT);
        for (col_idx, field) in ALL_FIELDS.iter().enumerate() {
            worksheet
                .write_string_with_format(0, col_idx as u16, *field, &header_format)
                .map_err(|e| ExportError::Write(format!("Failed to write header: {}", e)))?;
        }

        Ok(())
    }

    /// Write one data cell; empty cells still carry the data format
    fn write_cell(
        worksheet: &mut Worksheet,
        row: u32,
        col: u16,
        cell: &CellValue,
        format: &Format,
    ) -> ExportResult<()> {
        match cell {
            CellValue::Text(text) => {
                worksheet
                    .write_string_with_format(row, col, text, format)
                    .map_err(|e| ExportError::Write(format!("Failed to write text: {}", e)))?;
            }
            CellValue::Number(value) => {
                worksheet
                    .write_number_with_format(row, col, *value, format)
                    .map_err(|e| ExportError::Write(format!("Failed to write number: {}", e)))?;
            }
            CellValue::Boolean(value) => {
                worksheet
                    .write_boolean_with_format(row, col, *value, format)
                    .map_err(|e| ExportError::Write(format!("Failed to write boolean: {}", e)))?;
            }
            CellValue::Empty => {
                worksheet
                    .write_blank(row, col, format)
                    .map_err(|e| ExportError::Write(format!("Failed to write blank: {}", e)))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn records(value: serde_json::Value) -> Vec<Record> {
        serde_json::from_value(value).unwrap()
    }

    // =========================================================================
    // Column Width Tests
    // =========================================================================

    #[test]
    fn test_column_width_lower_bound() {
        assert_eq!(column_width(0), 10);
        assert_eq!(column_width(8), 10);
    }

    #[test]
    fn test_column_width_in_range() {
        assert_eq!(column_width(9), 11);
        assert_eq!(column_width(20), 22);
        assert_eq!(column_width(48), 50);
    }

    #[test]
    fn test_column_width_upper_bound() {
        assert_eq!(column_width(49), 50);
        assert_eq!(column_width(5000), 50);
    }

    #[test]
    fn test_column_widths_use_header_length() {
        let widths = column_widths(&[]);
        assert_eq!(widths.len(), 12);
        // "prompt_id" (9) + 2
        assert_eq!(widths[0], 11);
        // "time" (4) + 2 clamps to 10
        assert_eq!(widths[9], 10);
        // "response_reference_translate" (28) + 2
        assert_eq!(widths[10], 30);
    }

    #[test]
    fn test_column_widths_use_longest_value() {
        let rows: Vec<ProjectedRow> = records(json!([
            {"prompt": "What was the closing price of 600519.SH on 2024-12-31?"},
            {"prompt": "short", "label": "Simple_Historical_Lookup"}
        ]))
        .iter()
        .map(ProjectedRow::from_record)
        .collect();

        let widths = column_widths(&rows);
        assert_eq!(widths[1], 50);
        assert_eq!(widths[5], 26);
    }

    // =========================================================================
    // Projection Tests
    // =========================================================================

    #[test]
    fn test_project_reports_progress_every_interval() {
        let exporter = RecordExporter::default();
        let input: Vec<Record> = (0..250)
            .map(|i| records(json!([{ "prompt_id": i.to_string() }])).remove(0))
            .collect();

        let mut seen = Vec::new();
        let rows = exporter.project(&input, |n| seen.push(n));

        assert_eq!(rows.len(), 250);
        assert_eq!(seen, vec![100, 200]);
    }

    #[test]
    fn test_project_progress_disabled() {
        let exporter = RecordExporter::new(ExporterConfig {
            progress_interval: 0,
            ..Default::default()
        });
        let input = records(json!([{}, {}, {}]));
        let mut calls = 0;
        exporter.project(&input, |_| calls += 1);
        assert_eq!(calls, 0);
    }

    // =========================================================================
    // Load Tests
    // =========================================================================

    #[test]
    fn test_load_records_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.json");
        let err = RecordExporter::default().load_records(&missing).unwrap_err();
        assert!(matches!(err, ExportError::NotFound(_)));
    }

    #[test]
    fn test_load_records_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.json");
        fs::write(&path, "{invalid json").unwrap();
        let err = RecordExporter::default().load_records(&path).unwrap_err();
        assert!(matches!(err, ExportError::Decode(_)));
    }

    #[test]
    fn test_load_records_array_of_non_objects() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("numbers.json");
        fs::write(&path, "[1, 2, 3]").unwrap();
        let err = RecordExporter::default().load_records(&path).unwrap_err();
        assert!(matches!(err, ExportError::Shape(_)));
    }

    // =========================================================================
    // Write Tests
    // =========================================================================

    #[test]
    fn test_write_workbook_creates_file() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("out.xlsx");
        let rows: Vec<ProjectedRow> = records(json!([{"prompt_id": "1", "time": 2024}]))
            .iter()
            .map(ProjectedRow::from_record)
            .collect();

        RecordExporter::default()
            .write_workbook(&rows, &output)
            .unwrap();
        assert!(output.exists());
        assert!(fs::metadata(&output).unwrap().len() > 0);
    }

    #[test]
    fn test_export_with_events_order() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("in.json");
        let output = temp_dir.path().join("out.xlsx");
        fs::write(&input, r#"[{"prompt_id": "1"}, {"prompt_id": "2"}, {}]"#).unwrap();
        let exporter = RecordExporter::new(ExporterConfig {
            progress_interval: 2,
            ..Default::default()
        });

        let mut events = Vec::new();
        let report = exporter
            .export_with_events(&input, &output, |e| events.push(e))
            .unwrap();

        assert_eq!(
            events,
            vec![
                ExportEvent::Loaded(3),
                ExportEvent::Progress(2),
                ExportEvent::Saved
            ]
        );
        assert_eq!(report.stats.records, 3);
    }

    #[test]
    fn test_export_with_events_stops_before_save_on_error() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("bad.json");
        fs::write(&input, "{invalid json").unwrap();

        let mut events = Vec::new();
        let result = RecordExporter::default().export_with_events(
            &input,
            &temp_dir.path().join("out.xlsx"),
            |e| events.push(e),
        );

        assert!(result.is_err());
        assert!(events.is_empty());
    }

    #[test]
    fn test_default_sheet_name() {
        assert_eq!(ExporterConfig::default().sheet_name, "FinSearchComp数据");
    }

    #[test]
    fn test_write_workbook_rejects_invalid_sheet_name() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("out.xlsx");
        let exporter = RecordExporter::new(ExporterConfig {
            sheet_name: "bad[name]".to_string(),
            ..Default::default()
        });

        let err = exporter.write_workbook(&[], &output).unwrap_err();
        assert!(matches!(err, ExportError::Write(_)));
        assert!(!output.exists());
    }
}
