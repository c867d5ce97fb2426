use crate::error::{ExportError, ExportResult};
use crate::excel::{ExportEvent, RecordExporter, WorkbookReader};
use crate::manifest::{HubCredentials, Manifest, ManifestClient, ManifestConfig};
use crate::schema::COLUMN_COUNT;
use crate::stats::TableStats;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default input file, looked up in the working directory
pub const DEFAULT_INPUT: &str = "finsearchcomp_data.json";

/// Default output workbook
pub const DEFAULT_OUTPUT: &str = "finsearchcomp_data.xlsx";

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

/// Human-readable file size: MB above one mebibyte, KB otherwise
pub fn format_file_size(bytes: u64) -> String {
    if bytes > MIB {
        format!("{:.2} MB", bytes as f64 / MIB as f64)
    } else {
        format!("{:.2} KB", bytes as f64 / KIB as f64)
    }
}

/// Console message for a failed export, distinguishing the failure kind
pub fn failure_message(err: &ExportError) -> String {
    match err {
        ExportError::NotFound(path) => {
            format!("Error: JSON file not found: {}", path.display())
        }
        ExportError::Decode(e) => format!("Error: invalid JSON format - {}", e),
        _ => format!("Error: {}", err),
    }
}

/// Print the statistics block shown after a successful export
fn print_stats(stats: &TableStats) {
    println!("\n{}", "📊 Data statistics:".bold());
    println!("   Total records:   {}", stats.records);
    println!("   Total fields:    {}", stats.fields.total);
    println!("   Required fields: {}", stats.fields.required);
    println!("   Optional fields: {}", stats.fields.optional);

    println!("\n{}", "📋 Optional field fill rates:".bold());
    for rate in &stats.optional_fill {
        println!(
            "   {}: {}/{} ({:.1}%)",
            rate.field.cyan(),
            rate.filled,
            rate.total,
            rate.percent_rounded()
        );
    }
}

/// Convert a JSON array of records to a styled Excel workbook
///
/// Every failure is printed and reported as `false`; no output file is
/// written in that case.
pub fn export(input: &Path, output: &Path) -> bool {
    println!("📖 Reading JSON file: {}", input.display());

    let exporter = RecordExporter::default();
    let result = exporter.export_with_events(input, output, |event| match event {
        ExportEvent::Loaded(count) => println!("   Loaded {} records", count),
        ExportEvent::Progress(processed) => println!("   Processed {} records...", processed),
        ExportEvent::Saved => println!(
            "{}",
            format!("💾 Excel file saved to: {}", output.display()).green()
        ),
    });

    match result {
        Ok(report) => {
            print_stats(&report.stats);
            true
        }
        Err(err) => {
            tracing::debug!(kind = ?err.kind(), "export failed");
            eprintln!("{}", failure_message(&err).red());
            false
        }
    }
}

/// Entry point behavior of the `export` command
///
/// Refuses to run when the input file is absent, then exports and reports
/// the resulting file size.
pub fn convert(input: PathBuf, output: PathBuf) -> bool {
    if !input.exists() {
        eprintln!(
            "{}",
            format!("❌ Error: JSON file '{}' does not exist", input.display()).red()
        );
        eprintln!("   Make sure the JSON file is in the current directory");
        return false;
    }

    println!("{}", "=".repeat(60));
    println!("{}", "🔥 FinSearchComp JSON → Excel".bold().green());
    println!("{}", "=".repeat(60));

    if !export(&input, &output) {
        println!("\n{}", "❌ Conversion failed!".bold().red());
        return false;
    }

    println!("\n{}", "✅ Conversion complete!".bold().green());
    println!("   Output file: {}", output.display());
    match fs::metadata(&output) {
        Ok(meta) => println!("   File size: {}", format_file_size(meta.len())),
        Err(e) => tracing::warn!(error = %e, "could not stat output file"),
    }

    true
}

/// Print the contents summary of an exported workbook
pub fn inspect(file: PathBuf) -> ExportResult<()> {
    println!("{}", "🔍 Inspecting workbook".bold().green());
    println!("   File: {}", file.display());

    let contents = WorkbookReader::new(&file).read()?;

    println!("   Sheet:   {}", contents.sheet_name.bright_blue().bold());
    println!("   Rows:    {}", contents.rows.len());
    println!(
        "   Columns: {} ({} in schema)",
        contents.header.len(),
        COLUMN_COUNT
    );

    print_stats(&TableStats::compute(&contents.rows));
    Ok(())
}

/// Print a manifest and the fields of one of its record sets
pub fn print_manifest(manifest: &Manifest, record_set: &str) {
    println!("   Name: {}", manifest.name.bright_blue().bold());
    if let Some(description) = &manifest.description {
        println!("   Description: {}", description);
    }
    println!("   Files: {}", manifest.distribution.len());
    println!("   Record sets: {:?}", manifest.record_set_names());

    match manifest.records(record_set) {
        Some(records) => {
            println!(
                "\n   📋 Record set '{}' ({} fields):",
                record_set.cyan(),
                records.len()
            );
            for field in records.fields() {
                let types = field.data_types().join(", ");
                println!("      {} [{}]", field.short_name(), types);
            }
        }
        None => println!(
            "\n   {}",
            format!("⚠️  Record set '{}' not found", record_set).yellow()
        ),
    }
}

/// Fetch a dataset manifest from the hub and print it
pub async fn fetch_manifest(
    config: ManifestConfig,
    dataset: &str,
    record_set: &str,
) -> anyhow::Result<Manifest> {
    println!("{}", "🌐 Fetching dataset manifest".bold().green());

    let client = ManifestClient::new(config, HubCredentials::from_env())?;
    println!("   URL: {}", client.croissant_url(dataset));

    let manifest = client.fetch(dataset).await?;
    print_manifest(&manifest, record_set);
    Ok(manifest)
}

/// Blocking wrapper around [`fetch_manifest`] for the synchronous CLI
pub fn manifest(config: ManifestConfig, dataset: String, record_set: String) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(fetch_manifest(config, &dataset, &record_set))?;
    Ok(())
}
