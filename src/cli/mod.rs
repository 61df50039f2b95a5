//! CLI module for Surveyor

mod args;

pub use args::{Args, Command};

use crate::analysis::Analyzer;
use crate::config::{Config, OutputFormat};
use crate::error::{Error, Result};
use crate::output;
use crate::store::{AnalysisStore, DEFAULT_STORE};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Run the CLI application
pub fn run() -> ExitCode {
    let args = Args::parse_args();

    match execute(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if matches!(e, Error::PathNotAccessible(_)) {
                eprintln!(
                    "Hint: check filesystem permissions; if surveyor runs in a \
                     container, mount the codebase path into it"
                );
            }
            ExitCode::FAILURE
        }
    }
}

fn execute(args: Args) -> Result<()> {
    match args.command {
        Command::Analyze {
            path,
            output,
            exclude,
            config,
            format,
            timeout,
            project_id,
            store,
            verbose,
        } => {
            let mut cfg = if let Some(config_path) = &config {
                Config::load_or_default(config_path)
            } else {
                Config::load_or_default(Path::new("surveyor.toml"))
            };

            cfg.merge_cli(
                output,
                exclude,
                Some(parse_format(&format)?),
                timeout,
                project_id,
                store,
            );
            cfg.validate()?;

            if verbose {
                println!("Analyzing: {}", path.display());
                println!("Format: {:?}", cfg.output.format);
                println!("Timeout: {}s", cfg.analysis.timeout_secs);
                println!("Exclude: {:?}", cfg.analysis.exclude);
            }

            let analyzer = Analyzer::new(cfg.clone()).with_verbose(verbose);

            println!("Scanning codebase...");
            let analysis = analyzer.analyze(&path)?;

            println!(
                "Scan complete: {} files, {} lines, {} entry points",
                analysis.total_files,
                analysis.total_lines,
                analysis.entry_points.len()
            );

            if !analysis.warnings.is_empty() {
                println!("\nWarnings ({}):", analysis.warnings.len());
                for warning in analysis.warnings.iter().take(5) {
                    println!("  {}", warning);
                }
                if analysis.warnings.len() > 5 {
                    println!("  ... and {} more", analysis.warnings.len() - 5);
                }
            }

            match cfg.output.format {
                OutputFormat::Text => {
                    println!();
                    print!("{}", output::render_text(&analysis));
                }
                OutputFormat::Json => {
                    let json = output::render_json(&analysis)?;
                    let output_path = cfg.output.directory.join("analysis.json");
                    std::fs::create_dir_all(&cfg.output.directory)?;
                    std::fs::write(&output_path, json)?;
                    println!("JSON written to: {}", output_path.display());
                }
                OutputFormat::Markdown => {
                    let md = output::render_markdown(&analysis)?;
                    let output_path = cfg.output.directory.join("report.md");
                    std::fs::create_dir_all(&cfg.output.directory)?;
                    std::fs::write(&output_path, md)?;
                    println!("Report written to: {}", output_path.display());
                }
            }

            if let Some(store_path) = &cfg.output.store {
                let store = AnalysisStore::new(store_path);
                store.append(&analysis)?;
                println!("Snapshot recorded in {}", store_path.display());
            }

            Ok(())
        }

        Command::Latest { path, store } => {
            let store = AnalysisStore::new(store_path_or_default(store));
            // stored records carry canonical paths
            let lookup = path.canonicalize().unwrap_or(path);

            match store.latest(&lookup)? {
                Some(analysis) => {
                    print!("{}", output::render_text(&analysis));
                    println!("Recorded: {}", analysis.timestamp);
                    Ok(())
                }
                None => Err(Error::store(format!(
                    "no snapshot recorded for {}",
                    lookup.display()
                ))),
            }
        }

        Command::History { project_id, store } => {
            let store = AnalysisStore::new(store_path_or_default(store));
            let records = store.for_project(&project_id)?;

            if records.is_empty() {
                println!("No snapshots recorded for project {}", project_id);
                return Ok(());
            }

            println!("{} snapshots for project {}:", records.len(), project_id);
            for record in records {
                println!(
                    "  {}  {}  {} files, {} lines",
                    record.timestamp,
                    record.codebase_path.display(),
                    record.total_files,
                    record.total_lines
                );
            }
            Ok(())
        }

        Command::Version => {
            println!("surveyor {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn parse_format(format: &str) -> Result<OutputFormat> {
    match format {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        other => Err(Error::other(format!("Unknown format: {}", other))),
    }
}

fn store_path_or_default(store: Option<PathBuf>) -> PathBuf {
    store.unwrap_or_else(|| PathBuf::from(DEFAULT_STORE))
}
