//! Excel export and read-back for FinSearchComp records
//!
//! - Export: JSON records → styled .xlsx (single worksheet)
//! - Read: exported .xlsx → projected rows (inspection and verification)

mod exporter;
mod reader;

pub use exporter::{
    column_width, column_widths, ExportEvent, ExportReport, ExporterConfig, RecordExporter,
    DEFAULT_PROGRESS_INTERVAL, HEADER_FILL, MAX_COLUMN_WIDTH, MIN_COLUMN_WIDTH, SHEET_NAME,
};
pub use reader::{SheetContents, WorkbookReader};
