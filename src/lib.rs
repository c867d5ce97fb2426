//! finsearch-xlsx - FinSearchComp JSON → Excel exporter
//!
//! This library reads a JSON array of FinSearchComp benchmark prompt
//! records, projects each record onto a fixed 12-column schema, and writes
//! a styled single-sheet Excel workbook. It also fetches the dataset's
//! Croissant manifest from the Hugging Face hub.
//!
//! # Example
//!
//! ```no_run
//! use finsearch_xlsx::excel::RecordExporter;
//! use std::path::Path;
//!
//! let exporter = RecordExporter::default();
//! let report = exporter.export(
//!     Path::new("finsearchcomp_data.json"),
//!     Path::new("finsearchcomp_data.xlsx"),
//! )?;
//!
//! println!("Records: {}", report.stats.records);
//! # Ok::<(), finsearch_xlsx::error::ExportError>(())
//! ```

pub mod cli;
pub mod error;
pub mod excel;
pub mod logging;
pub mod manifest;
pub mod schema;
pub mod stats;
pub mod types;

// Re-export commonly used types
pub use error::{ExportError, ExportResult, FailureKind};
pub use excel::{RecordExporter, WorkbookReader};
pub use types::{CellValue, ProjectedRow, Record};
