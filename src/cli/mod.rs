//! CLI command handlers

pub mod commands;

pub use commands::{convert, export, fetch_manifest, inspect, manifest};
