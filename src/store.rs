// Append-only snapshot history, one JSON record per line.
//
// Local-file stand-in for an external persistence layer: the engine
// itself never reads or writes history. Records are keyed by
// (codebase_path, timestamp); "latest" is the maximum timestamp.

use crate::analysis::AnalysisResult;
use crate::error::{Error, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Default history file name
pub const DEFAULT_STORE: &str = "surveyor-history.jsonl";

/// JSON-lines snapshot history
pub struct AnalysisStore {
    path: PathBuf,
}

impl AnalysisStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Append one snapshot record
    pub fn append(&self, result: &AnalysisResult) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let line = serde_json::to_string(result)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| Error::store(format!("cannot open {}: {}", self.path.display(), e)))?;
        writeln!(file, "{}", line)?;
        Ok(())
    }

    /// Load every record in the file. Torn or malformed lines are
    /// skipped; they never poison the rest of the history.
    pub fn load_all(&self) -> Result<Vec<AnalysisResult>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let contents = std::fs::read_to_string(&self.path)?;
        let records = contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect();
        Ok(records)
    }

    /// Most recent snapshot for a codebase path, by maximum timestamp
    pub fn latest(&self, codebase_path: &Path) -> Result<Option<AnalysisResult>> {
        let records = self.load_all()?;
        Ok(records
            .into_iter()
            .filter(|r| r.codebase_path == codebase_path)
            .max_by_key(|r| r.timestamp))
    }

    /// All snapshots for a project, newest first
    pub fn for_project(&self, project_id: &str) -> Result<Vec<AnalysisResult>> {
        let mut records: Vec<AnalysisResult> = self
            .load_all()?
            .into_iter()
            .filter(|r| r.project_id.as_deref() == Some(project_id))
            .collect();
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(records)
    }
}
