//! Command-line driver: scans a directory of reflection exports, runs one
//! generation pass set, and writes the skeleton manifest.

mod native;

use clap::{Parser, Subcommand};
use skelforge::prelude::*;
use std::{
    fs, io,
    path::{Path, PathBuf},
    process::ExitCode,
};
use thiserror::Error as ThisError;

///
/// CliError
///

#[derive(Debug, ThisError)]
enum CliError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: io::Error,
    },

    #[error("{path}: {source}")]
    Parse {
        path: PathBuf,
        source: skelforge::core::parse::ParseError,
    },

    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

///
/// Cli
///

#[derive(Parser)]
#[command(name = "skelforge", version, about = "Forge skeletal class definitions from reflection exports")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse every export under a directory and emit the skeleton manifest
    Generate {
        /// Directory scanned recursively for .json export documents
        dir: PathBuf,

        /// Manifest output path
        #[arg(long, default_value = "skelforge-manifest.json")]
        out: PathBuf,

        /// Upper bound on scheduler passes
        #[arg(long, default_value_t = skelforge::DEFAULT_MAX_PASSES)]
        max_passes: usize,

        /// Extra native symbols, as a JSON array of {logical_name, origin, locator}
        #[arg(long)]
        seed: Option<PathBuf>,

        /// Content root used for generated locators
        #[arg(long, default_value = "/Game/Generated")]
        content_root: String,
    },

    /// Parse a single export document and print the normalized entities
    Inspect {
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Generate {
            dir,
            out,
            max_passes,
            seed,
            content_root,
        } => generate(&dir, &out, max_passes, seed.as_deref(), &content_root),
        Command::Inspect { file } => inspect(&file),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn generate(
    dir: &Path,
    out: &Path,
    max_passes: usize,
    seed: Option<&Path>,
    content_root: &str,
) -> Result<ExitCode, CliError> {
    let mut catalog = native::seeded_catalog();
    if let Some(seed) = seed {
        catalog.seed_native(load_seed(seed)?);
    }

    let files = collect_json_files(dir)?;
    log::info!("found {} json documents under {}", files.len(), dir.display());

    // Per-file parse failures are reported and skipped here; the per-document
    // contract inside the core stays fatal.
    let mut entities = Vec::new();
    let mut file_errors = Vec::new();
    let mut skipped = 0_usize;

    for path in &files {
        let text = read_file(path)?;

        match class_names(&text) {
            Ok(names) if names.is_empty() => {
                skipped += 1;
                continue;
            }
            Ok(_) => {}
            Err(err) => {
                file_errors.push(format!("{}: {err}", path.display()));
                continue;
            }
        }

        match parse_document(&text) {
            Ok(parsed) => entities.extend(parsed),
            Err(err) => file_errors.push(format!("{}: {err}", path.display())),
        }
    }

    println!(
        "{} class-like documents, {} skipped, {} unreadable",
        files.len() - skipped - file_errors.len(),
        skipped,
        file_errors.len(),
    );

    let mut emitter = ManifestEmitter::new(content_root);
    let report = Scheduler::new(entities, catalog)
        .with_max_passes(max_passes)
        .run(&mut emitter);

    let manifest = emitter.into_manifest();
    let encoded = serde_json::to_string_pretty(&manifest)?;
    fs::write(out, encoded).map_err(|source| CliError::Io {
        path: out.to_path_buf(),
        source,
    })?;

    print_summary(&report, &file_errors, out);

    if report.resolved.is_empty() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn inspect(file: &Path) -> Result<ExitCode, CliError> {
    let text = read_file(file)?;
    let entities = parse_document(&text).map_err(|source| CliError::Parse {
        path: file.to_path_buf(),
        source,
    })?;

    println!("{}", serde_json::to_string_pretty(&entities)?);
    Ok(ExitCode::SUCCESS)
}

fn print_summary(report: &RunReport, file_errors: &[String], out: &Path) {
    println!("{report}");
    println!("manifest written to {}", out.display());

    for deferred in &report.deferred {
        println!(
            "  deferred: {} (waiting on {})",
            deferred.name, deferred.blocking_parent,
        );
    }
    for failed in &report.failed {
        println!("  failed: {} ({})", failed.name, failed.message);
    }

    const MAX_SHOWN: usize = 10;
    for error in file_errors.iter().take(MAX_SHOWN) {
        eprintln!("  unreadable: {error}");
    }
    if file_errors.len() > MAX_SHOWN {
        eprintln!("  ... and {} more", file_errors.len() - MAX_SHOWN);
    }
}

fn load_seed(path: &Path) -> Result<Vec<Symbol>, CliError> {
    let text = read_file(path)?;
    let symbols: Vec<Symbol> = serde_json::from_str(&text)?;

    Ok(symbols)
}

fn read_file(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// Recursive scan, sorted for reproducible scheduling order.
fn collect_json_files(dir: &Path) -> Result<Vec<PathBuf>, CliError> {
    let mut files = Vec::new();
    let mut stack = vec![dir.to_path_buf()];

    while let Some(current) = stack.pop() {
        let entries = fs::read_dir(&current).map_err(|source| CliError::Io {
            path: current.clone(),
            source,
        })?;

        for entry in entries {
            let entry = entry.map_err(|source| CliError::Io {
                path: current.clone(),
                source,
            })?;
            let path = entry.path();

            if path.is_dir() {
                stack.push(path);
            } else if path.extension().is_some_and(|ext| ext == "json") {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}
