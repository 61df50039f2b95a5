//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Architecture snapshots from local codebases
#[derive(Parser, Debug)]
#[command(name = "surveyor")]
#[command(about = "Architecture snapshots from local codebases")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan a codebase and produce an architecture snapshot
    Analyze {
        /// Path to the codebase root
        path: PathBuf,

        /// Output directory for rendered reports
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Extra directory names to exclude (can be repeated)
        #[arg(long)]
        exclude: Vec<String>,

        /// Config file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format (text, json, markdown)
        #[arg(long, default_value = "text")]
        format: String,

        /// Wall-clock budget in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Associate the snapshot with an external project id
        #[arg(long)]
        project_id: Option<String>,

        /// Append the snapshot to a history file
        #[arg(long)]
        store: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show the most recent snapshot recorded for a path
    Latest {
        /// Path the codebase was scanned at
        path: PathBuf,

        /// History file to read
        #[arg(long)]
        store: Option<PathBuf>,
    },

    /// List all snapshots recorded for a project, newest first
    History {
        /// External project id
        #[arg(long = "project")]
        project_id: String,

        /// History file to read
        #[arg(long)]
        store: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_defaults() {
        let args = Args::try_parse_from(["surveyor", "analyze", "./src"]).unwrap();
        match args.command {
            Command::Analyze {
                path,
                output,
                format,
                timeout,
                store,
                verbose,
                ..
            } => {
                assert_eq!(path, PathBuf::from("./src"));
                assert!(output.is_none());
                assert_eq!(format, "text");
                assert!(timeout.is_none());
                assert!(store.is_none());
                assert!(!verbose);
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_analyze_with_options() {
        let args = Args::try_parse_from([
            "surveyor",
            "analyze",
            "./project",
            "--output",
            "/tmp/out",
            "--exclude",
            "coverage",
            "--exclude",
            "tmp",
            "--config",
            "custom.toml",
            "--format",
            "json",
            "--timeout",
            "30",
            "--project-id",
            "proj-1",
            "--store",
            "history.jsonl",
            "--verbose",
        ])
        .unwrap();

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
                assert_eq!(path, PathBuf::from("./project"));
                assert_eq!(output, Some(PathBuf::from("/tmp/out")));
                assert_eq!(exclude, vec!["coverage".to_string(), "tmp".to_string()]);
                assert_eq!(config, Some(PathBuf::from("custom.toml")));
                assert_eq!(format, "json");
                assert_eq!(timeout, Some(30));
                assert_eq!(project_id, Some("proj-1".to_string()));
                assert_eq!(store, Some(PathBuf::from("history.jsonl")));
                assert!(verbose);
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_latest() {
        let args = Args::try_parse_from(["surveyor", "latest", "/code/app"]).unwrap();
        match args.command {
            Command::Latest { path, store } => {
                assert_eq!(path, PathBuf::from("/code/app"));
                assert!(store.is_none());
            }
            _ => panic!("Expected Latest command"),
        }
    }

    #[test]
    fn test_history() {
        let args =
            Args::try_parse_from(["surveyor", "history", "--project", "proj-9"]).unwrap();
        match args.command {
            Command::History { project_id, .. } => {
                assert_eq!(project_id, "proj-9");
            }
            _ => panic!("Expected History command"),
        }
    }

    #[test]
    fn test_history_requires_project() {
        assert!(Args::try_parse_from(["surveyor", "history"]).is_err());
    }

    #[test]
    fn test_version_command() {
        let args = Args::try_parse_from(["surveyor", "version"]).unwrap();
        assert!(matches!(args.command, Command::Version));
    }
}
