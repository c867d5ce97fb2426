//! FinSearchComp manifest fetcher binary
//!
//! Fetches the Croissant description of the FinSearchComp dataset from the
//! Hugging Face hub and lists one of its record sets. Authenticates with the
//! token stored by `huggingface-cli login` (or `HF_TOKEN`) when present.

use clap::Parser;
use finsearch_xlsx::cli;
use finsearch_xlsx::manifest::{
    ManifestConfig, DEFAULT_DATASET, DEFAULT_ENDPOINT, DEFAULT_RECORD_SET,
};

#[derive(Parser, Debug)]
#[command(name = "finsearch-manifest")]
#[command(version)]
#[command(about = "Fetch the FinSearchComp Croissant manifest from the dataset hub")]
struct Args {
    /// Dataset hub base URL
    #[arg(long, default_value = DEFAULT_ENDPOINT, env = "HF_ENDPOINT")]
    endpoint: String,

    /// Dataset id (owner/name)
    #[arg(short, long, default_value = DEFAULT_DATASET, env = "FINSEARCH_DATASET")]
    dataset: String,

    /// Record set to list
    #[arg(short, long, default_value = DEFAULT_RECORD_SET)]
    record_set: String,

    /// Show debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    finsearch_xlsx::logging::init(args.verbose);

    let config = ManifestConfig {
        endpoint: args.endpoint,
        ..Default::default()
    };

    cli::fetch_manifest(config, &args.dataset, &args.record_set).await?;
    Ok(())
}
