use clap::{Parser, Subcommand};
use finsearch_xlsx::cli;
use finsearch_xlsx::cli::commands::{DEFAULT_INPUT, DEFAULT_OUTPUT};
use finsearch_xlsx::manifest::{ManifestConfig, DEFAULT_DATASET, DEFAULT_ENDPOINT, DEFAULT_RECORD_SET};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "finsearch")]
#[command(about = "Export FinSearchComp benchmark prompts from JSON to Excel")]
#[command(long_about = "finsearch - FinSearchComp JSON → Excel exporter

Reads a JSON array of benchmark prompt records and writes a styled .xlsx
workbook with one row per record and a fixed 12-column schema:

  required: prompt_id, prompt, response_reference, judge_prompt_template,
            judge_system_prompt, label
  optional: wind_ticker, akshare_ticker, ground_truth, time,
            response_reference_translate, yfinance_ticker

COMMANDS:
  export    - JSON to Excel (.xlsx)
  inspect   - Summarize an exported workbook
  manifest  - Fetch the dataset's Croissant manifest from the hub

EXAMPLES:
  finsearch export                              # finsearchcomp_data.json → .xlsx
  finsearch export data.json data.xlsx
  finsearch inspect data.xlsx
  finsearch manifest --record-set default")]
#[command(version)]
struct Cli {
    /// Show debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Export a JSON array of records to Excel .xlsx format.

Missing fields become empty cells, keys outside the schema are ignored.
The header row is bold white on blue; data cells are top-aligned and
wrapped; column widths follow the longest value (10 to 50 characters).

Progress is printed every 100 records, followed by fill-rate statistics
for the optional fields.")]
    /// Export JSON records to Excel .xlsx
    Export {
        /// Path to the JSON input file
        #[arg(default_value = DEFAULT_INPUT, env = "FINSEARCH_INPUT")]
        input: PathBuf,

        /// Output Excel file path (.xlsx)
        #[arg(default_value = DEFAULT_OUTPUT, env = "FINSEARCH_OUTPUT")]
        output: PathBuf,
    },

    /// Summarize an exported workbook
    Inspect {
        /// Path to Excel file (.xlsx)
        file: PathBuf,
    },

    /// Fetch the dataset's Croissant manifest from the hub
    Manifest {
        /// Dataset hub base URL
        #[arg(long, default_value = DEFAULT_ENDPOINT, env = "HF_ENDPOINT")]
        endpoint: String,

        /// Dataset id (owner/name)
        #[arg(short, long, default_value = DEFAULT_DATASET, env = "FINSEARCH_DATASET")]
        dataset: String,

        /// Record set to list
        #[arg(short, long, default_value = DEFAULT_RECORD_SET)]
        record_set: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    finsearch_xlsx::logging::init(cli.verbose);

    let success = match cli.command {
        Commands::Export { input, output } => cli::convert(input, output),

        Commands::Inspect { file } => report(cli::inspect(file)),

        Commands::Manifest {
            endpoint,
            dataset,
            record_set,
        } => {
            let config = ManifestConfig {
                endpoint,
                ..Default::default()
            };
            report(cli::manifest(config, dataset, record_set))
        }
    };

    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn report<E: std::fmt::Display>(result: Result<(), E>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            eprintln!("Error: {}", e);
            false
        }
    }
}
