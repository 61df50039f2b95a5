//! Surveyor - Architecture snapshots from local codebases
//!
//! Walks a source tree, classifies files, extracts architectural signals
//! (entry points, tech stack, directory layout), and assembles them into
//! one immutable analysis record for consumers orienting themselves in an
//! unfamiliar codebase.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod store;

// Re-export main types
pub use analysis::{
    AnalysisResult, Analyzer, DirectorySummary, EntryPoint, EntryPointDetector, EntryPointKind,
    TechStack,
};
pub use config::{Config, OutputFormat};
pub use error::{Error, Result};
pub use store::AnalysisStore;
