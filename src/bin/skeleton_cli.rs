//! Skeleton CLI - manifest inspection
//!
//! Commands: validate, params, types
//! Outputs JSON to stdout, logs to stderr
//! Exit codes: 0 valid, 2 invalid manifest, 1 I/O or configuration error

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use skeleton_core::{
    decode, ManifestError, ParameterType, Policy, Validator, ValidatorConfig,
};

#[derive(Parser)]
#[command(name = "skeleton-cli")]
#[command(about = "Skeleton CLI - template manifest inspection")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log every validation step to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a manifest and print the report
    Validate {
        /// Path to the manifest file
        manifest: PathBuf,

        /// Report every parameter violation, not just the first
        #[arg(long)]
        collect_all: bool,

        /// Reject unknown parameter types and duplicate names
        #[arg(long, conflicts_with = "warn")]
        strict: bool,

        /// Warn about unknown parameter types and duplicate names
        #[arg(long)]
        warn: bool,

        /// Validator configuration file (JSON or YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print a valid manifest's parameters in prompt order
    Params {
        /// Path to the manifest file
        manifest: PathBuf,
    },

    /// List the recognized parameter types
    Types,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Validate { manifest, collect_all, strict, warn, config } => {
            let mut config = match config {
                Some(path) => match read(&path).and_then(|b| {
                    ValidatorConfig::from_slice(&b).map_err(|e| format!("Invalid config {}: {}", path.display(), e))
                }) {
                    Ok(c) => c,
                    Err(e) => return fail(&e),
                },
                None => ValidatorConfig::default(),
            };
            config.collect_all |= collect_all;
            if strict {
                config.unknown_types = Policy::Reject;
                config.duplicate_names = Policy::Reject;
            } else if warn {
                config.unknown_types = Policy::Warn;
                config.duplicate_names = Policy::Warn;
            }

            let bytes = match read(&manifest) {
                Ok(b) => b,
                Err(e) => return fail(&e),
            };

            let decoded = match decode(&bytes) {
                Ok(m) => m,
                Err(e) => return invalid(&e),
            };

            let report = Validator::new(config).check(&decoded);
            let code = if report.valid { ExitCode::SUCCESS } else { ExitCode::from(2) };
            print_json(&report).unwrap_or(code)
        }

        Commands::Params { manifest } => {
            let bytes = match read(&manifest) {
                Ok(b) => b,
                Err(e) => return fail(&e),
            };

            let decoded = match decode(&bytes) {
                Ok(m) => m,
                Err(e) => return invalid(&e),
            };

            if let Err(e) = Validator::default().validate(&decoded) {
                return invalid(&e);
            }

            print_json(&decoded.parameters).unwrap_or(ExitCode::SUCCESS)
        }

        Commands::Types => print_json(&ParameterType::RECOGNIZED).unwrap_or(ExitCode::SUCCESS),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn read(path: &Path) -> Result<Vec<u8>, String> {
    fs::read(path).map_err(|e| format!("Failed to read {}: {}", path.display(), e))
}

/// Prints pretty JSON. Returns an exit code only if printing failed.
fn print_json<T: Serialize + ?Sized>(value: &T) -> Option<ExitCode> {
    match serde_json::to_string_pretty(value) {
        Ok(s) => {
            println!("{}", s);
            None
        }
        Err(e) => Some(fail(&format!("Failed to encode output: {}", e))),
    }
}

fn invalid(err: &ManifestError) -> ExitCode {
    let mut output = serde_json::json!({
        "valid": false,
        "kind": err.kind(),
        "error": err.to_string(),
    });
    if let Some((index, name)) = err.parameter() {
        output["parameter"] = serde_json::json!({ "index": index, "name": name });
    }
    println!("{}", output);
    ExitCode::from(2)
}

fn fail(message: &str) -> ExitCode {
    tracing::error!("{}", message);
    println!("{}", serde_json::json!({ "error": message }));
    ExitCode::FAILURE
}
