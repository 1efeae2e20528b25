//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Packroot -- container image catalog to SBOM findings converter.
///
/// Use `packroot <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "packroot", version, about, long_about = None)]
pub struct Cli {
    /// Path to the packroot.toml configuration file.
    #[arg(short, long, default_value = "packroot.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Catalog a container filesystem and convert it to a findings document.
    Convert(ConvertArgs),

    /// Convert an existing catalog JSON document (no cataloger invocation).
    Ingest(IngestArgs),

    /// List the package types the converter supports.
    Types,

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- convert ----

/// Run the external cataloger against a directory and convert its output.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Unpacked container filesystem root to catalog (default: current directory).
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Override the cataloger binary from the config file.
    #[arg(long)]
    pub cataloger: Option<String>,

    /// Print only the run summary, not the findings document.
    #[arg(long)]
    pub summary_only: bool,
}

// ---- ingest ----

/// Convert a catalog document that was produced earlier.
#[derive(Args, Debug)]
pub struct IngestArgs {
    /// Path to the catalog JSON file.
    pub file: PathBuf,

    /// Print only the run summary, not the findings document.
    #[arg(long)]
    pub summary_only: bool,
}

// ---- config ----

/// Manage packroot configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, catalog, convert).
        #[arg(long)]
        section: Option<String>,
    },
}
