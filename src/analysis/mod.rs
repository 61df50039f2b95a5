// Codebase analysis engine: walk, classify, detect, infer, aggregate.

pub mod entry_points;
pub mod language;
pub mod summary;
pub mod tech_stack;
pub mod walker;

pub use entry_points::{EntryPoint, EntryPointDetector, EntryPointKind};
pub use tech_stack::{TechStack, TechStackInferencer};
pub use walker::{Deadline, TreeWalker};

use crate::config::Config;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use uuid::Uuid;

/// Per-directory rollup in the snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectorySummary {
    pub file_count: usize,
}

/// One immutable architecture snapshot of a codebase.
///
/// Produced in one shot at the end of a scan and never edited afterward;
/// a new scan of the same path produces a new record, and "latest" is
/// defined purely by maximum timestamp for that path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Opaque record identifier
    pub id: Uuid,
    /// Canonicalized absolute path that was scanned
    pub codebase_path: PathBuf,
    /// Optional external project association, pass-through data
    pub project_id: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub total_files: usize,
    pub total_lines: usize,
    /// Language name -> line count; only recognized languages appear
    pub languages: BTreeMap<String, usize>,
    /// Discovery order
    pub entry_points: Vec<EntryPoint>,
    /// Top-level directory name -> rollup; root-level files not included
    pub directory_structure: BTreeMap<String, DirectorySummary>,
    pub tech_stack: TechStack,
    /// Derived text, computed once from the other fields
    pub architecture_summary: String,
    /// Non-fatal per-file problems encountered during the scan
    pub warnings: Vec<String>,
}

/// Result of examining a single file. The per-file stages are pure
/// functions of path + content; reports are folded into the snapshot by
/// an associative, commutative merge so parallel completion order never
/// affects the outcome.
#[derive(Debug, Default)]
struct FileReport {
    language: Option<&'static str>,
    lines: usize,
    entry_point: Option<EntryPoint>,
    top_level_dir: Option<String>,
    warning: Option<String>,
}

/// Main analyzer orchestrating the scan pipeline
pub struct Analyzer {
    config: Config,
    detectors: Vec<Box<dyn EntryPointDetector>>,
    verbose: bool,
}

impl Analyzer {
    /// Create a new analyzer with the given configuration
    pub fn new(config: Config) -> Self {
        Self {
            config,
            detectors: entry_points::default_detectors(),
            verbose: false,
        }
    }

    /// Create analyzer with verbose output
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Replace the detector chain (stronger detectors can be substituted
    /// without changing the engine contract)
    pub fn with_detectors(mut self, detectors: Vec<Box<dyn EntryPointDetector>>) -> Self {
        self.detectors = detectors;
        self
    }

    /// Analyze the codebase at `root` and produce one snapshot.
    ///
    /// Synchronous: returns a completed `AnalysisResult` or one of the
    /// terminal errors. There is no partial result.
    pub fn analyze(&self, root: &Path) -> Result<AnalysisResult> {
        if !root.exists() {
            return Err(Error::PathNotFound(root.to_path_buf()));
        }

        let root = root
            .canonicalize()
            .map_err(|_| Error::PathNotAccessible(root.to_path_buf()))?;

        let deadline = Deadline::new(Duration::from_secs(self.config.analysis.timeout_secs));
        let exclude = self.config.analysis.exclude.clone();

        let walker = TreeWalker::new(exclude.clone());
        let walk = walker.walk(&root, &deadline)?;

        let progress = if self.verbose {
            let pb = ProgressBar::new(walk.files.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .unwrap()
                    .progress_chars("#>-"),
            );
            Some(pb)
        } else {
            None
        };

        // Fan out over files; collect preserves walk order, so entry
        // points come back in discovery order.
        let reports: Vec<FileReport> = walk
            .files
            .par_iter()
            .map(|path| {
                deadline.check()?;
                let report = self.examine_file(path, &root);
                if let Some(ref pb) = progress {
                    pb.inc(1);
                }
                Ok(report)
            })
            .collect::<Result<Vec<_>>>()?;

        if let Some(pb) = progress {
            pb.finish_with_message("Scan complete");
        }

        deadline.check()?;
        let inferencer = TechStackInferencer::new(exclude);
        let tech_stack = inferencer.infer(&root);

        let mut result = AnalysisResult {
            id: Uuid::new_v4(),
            codebase_path: root,
            project_id: self.config.project.project_id.clone(),
            timestamp: Utc::now(),
            total_files: 0,
            total_lines: 0,
            languages: BTreeMap::new(),
            entry_points: Vec::new(),
            directory_structure: BTreeMap::new(),
            tech_stack,
            architecture_summary: String::new(),
            warnings: walk.warnings,
        };

        for report in reports {
            merge_report(&mut result, report);
        }

        let max_warnings = self.config.analysis.max_warnings;
        if result.warnings.len() > max_warnings {
            let dropped = result.warnings.len() - max_warnings;
            result.warnings.truncate(max_warnings);
            result.warnings.push(format!("{} more warnings dropped", dropped));
        }

        result.architecture_summary = summary::render(
            result.total_files,
            result.total_lines,
            &result.languages,
            &result.entry_points,
            result.directory_structure.len(),
            &result.tech_stack,
        );

        Ok(result)
    }

    /// Run the per-file stages: classification, line counting, entry
    /// detection. A file that cannot be read or decoded still counts; it
    /// just carries no content-derived signals.
    fn examine_file(&self, path: &Path, root: &Path) -> FileReport {
        let relative = path.strip_prefix(root).unwrap_or(path);

        let mut report = FileReport {
            language: language::classify(path),
            top_level_dir: top_level_dir(relative),
            ..FileReport::default()
        };

        let bytes = match std::fs::read(path) {
            Ok(b) => b,
            Err(e) => {
                report.warning = Some(format!("Could not read {}: {}", relative.display(), e));
                return report;
            }
        };

        let content = match std::str::from_utf8(&bytes) {
            Ok(c) => c,
            Err(_) => {
                report.warning =
                    Some(format!("Skipped line count for binary file {}", relative.display()));
                return report;
            }
        };

        report.lines = language::count_lines(content);
        report.entry_point =
            entry_points::detect(&self.detectors, relative, report.language, content);

        report
    }
}

/// Counter addition, map addition, in-order entry-point concat. Applied
/// to in-order reports; each operation is associative and commutative
/// over the accumulated state.
fn merge_report(result: &mut AnalysisResult, report: FileReport) {
    result.total_files += 1;
    result.total_lines += report.lines;

    if let Some(lang) = report.language {
        *result.languages.entry(lang.to_string()).or_insert(0) += report.lines;
    }

    if let Some(entry) = report.entry_point {
        result.entry_points.push(entry);
    }

    if let Some(dir) = report.top_level_dir {
        result
            .directory_structure
            .entry(dir)
            .or_insert(DirectorySummary { file_count: 0 })
            .file_count += 1;
    }

    if let Some(warning) = report.warning {
        result.warnings.push(warning);
    }
}

/// First path component of a root-relative file path; None for files
/// directly at the root.
fn top_level_dir(relative: &Path) -> Option<String> {
    let mut components = relative.components();
    let first = components.next()?;
    components.next()?;
    Some(first.as_os_str().to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_project() -> TempDir {
        let dir = TempDir::new().unwrap();

        let src = dir.path().join("src");
        fs::create_dir_all(&src).unwrap();

        fs::write(
            src.join("main.py"),
            "def main():\n    pass\n\nif __name__ == \"__main__\":\n    main()\n",
        )
        .unwrap();

        fs::write(
            src.join("utils.py"),
            "def helper():\n    pass\n",
        )
        .unwrap();

        fs::write(dir.path().join("README.md"), "# Test\n").unwrap();

        dir
    }

    fn analyzer() -> Analyzer {
        Analyzer::new(Config::default())
    }

    #[test]
    fn test_analyze_simple_project() {
        let dir = create_test_project();
        let result = analyzer().analyze(dir.path()).unwrap();

        assert_eq!(result.total_files, 3);
        assert_eq!(result.languages.get("Python"), Some(&7));
        assert_eq!(result.entry_points.len(), 1);
        assert!(result.entry_points[0].path.ends_with("main.py"));
        assert_eq!(
            result.directory_structure.get("src"),
            Some(&DirectorySummary { file_count: 2 })
        );
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_analyze_empty_directory() {
        let dir = TempDir::new().unwrap();
        let result = analyzer().analyze(dir.path()).unwrap();

        assert_eq!(result.total_files, 0);
        assert_eq!(result.total_lines, 0);
        assert!(result.languages.is_empty());
        assert!(result.entry_points.is_empty());
        assert!(result.directory_structure.is_empty());
        assert!(result.tech_stack.is_empty());
        assert!(!result.architecture_summary.is_empty());
    }

    #[test]
    fn test_analyze_nonexistent_path() {
        let result = analyzer().analyze(Path::new("/nonexistent/path"));
        assert!(matches!(result, Err(Error::PathNotFound(_))));
    }

    #[test]
    fn test_unrecognized_extensions_count_toward_totals_only() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("data.xyz"), "a\nb\nc\n").unwrap();

        let result = analyzer().analyze(dir.path()).unwrap();
        assert_eq!(result.total_files, 1);
        assert_eq!(result.total_lines, 3);
        assert!(result.languages.is_empty());
    }

    #[test]
    fn test_binary_file_counts_without_lines() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("blob.py"), [0xff, 0xfe, 0x00, 0x01]).unwrap();
        fs::write(dir.path().join("ok.py"), "x = 1\n").unwrap();

        let result = analyzer().analyze(dir.path()).unwrap();
        assert_eq!(result.total_files, 2);
        assert_eq!(result.total_lines, 1);
        assert_eq!(result.languages.get("Python"), Some(&1));
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("blob.py"));
    }

    #[test]
    fn test_entry_point_paths_are_relative() {
        let dir = create_test_project();
        let result = analyzer().analyze(dir.path()).unwrap();

        let ep = &result.entry_points[0];
        assert!(ep.path.is_relative());
        assert_eq!(ep.path, PathBuf::from("src/main.py"));
    }

    #[test]
    fn test_directory_structure_counts_all_scanned_files() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::create_dir_all(dir.path().join("tests")).unwrap();
        fs::write(dir.path().join("src/a.py"), "").unwrap();
        fs::write(dir.path().join("src/b.py"), "").unwrap();
        fs::write(dir.path().join("src/c.py"), "").unwrap();
        fs::write(dir.path().join("tests/t1.py"), "").unwrap();
        fs::write(dir.path().join("tests/t2.py"), "").unwrap();

        let result = analyzer().analyze(dir.path()).unwrap();
        assert_eq!(result.total_files, 5);
        assert_eq!(result.directory_structure.len(), 2);
        assert_eq!(result.directory_structure["src"].file_count, 3);
        assert_eq!(result.directory_structure["tests"].file_count, 2);
    }

    #[test]
    fn test_root_level_files_not_in_directory_structure() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("main.py"), "if __name__ == \"__main__\":\n    pass\n")
            .unwrap();

        let result = analyzer().analyze(dir.path()).unwrap();
        assert_eq!(result.total_files, 1);
        assert!(result.directory_structure.is_empty());
        assert_eq!(result.entry_points.len(), 1);
        assert_eq!(result.entry_points[0].kind, EntryPointKind::CliEntry);
    }

    #[test]
    fn test_counter_conservation() {
        let dir = create_test_project();
        let result = analyzer().analyze(dir.path()).unwrap();

        let dir_total: usize = result
            .directory_structure
            .values()
            .map(|d| d.file_count)
            .sum();
        // 1 root-level file (README.md) + 2 under src/
        assert_eq!(dir_total + 1, result.total_files);

        let language_total: usize = result.languages.values().sum();
        assert!(language_total <= result.total_lines);
    }

    #[test]
    fn test_excluded_directory_contributes_nothing() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("node_modules/dep")).unwrap();
        fs::write(
            dir.path().join("node_modules/dep/setup.py"),
            "if __name__ == \"__main__\":\n    pass\n",
        )
        .unwrap();
        fs::write(dir.path().join("app.py"), "x = 1\n").unwrap();

        let result = analyzer().analyze(dir.path()).unwrap();
        assert_eq!(result.total_files, 1);
        assert!(result.entry_points.is_empty());
        assert!(!result.directory_structure.contains_key("node_modules"));
    }

    #[test]
    fn test_timeout_yields_error_not_partial_result() {
        let dir = create_test_project();
        let mut config = Config::default();
        // validate() floors at 1s; construct the expired state directly
        config.analysis.timeout_secs = 0;

        let result = Analyzer::new(config).analyze(dir.path());
        assert!(matches!(result, Err(Error::Timeout { .. })));
    }

    #[test]
    fn test_determinism_across_runs() {
        let dir = create_test_project();
        let a = analyzer().analyze(dir.path()).unwrap();
        let b = analyzer().analyze(dir.path()).unwrap();

        assert_eq!(a.languages, b.languages);
        assert_eq!(a.directory_structure, b.directory_structure);
        assert_eq!(a.tech_stack, b.tech_stack);
        assert_eq!(a.entry_points, b.entry_points);
        assert_eq!(a.architecture_summary, b.architecture_summary);
        // identity differs per record
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_project_id_passthrough() {
        let dir = create_test_project();
        let mut config = Config::default();
        config.project.project_id = Some("proj-7".to_string());

        let result = Analyzer::new(config).analyze(dir.path()).unwrap();
        assert_eq!(result.project_id.as_deref(), Some("proj-7"));
    }

    #[test]
    fn test_summary_reflects_fields() {
        let dir = create_test_project();
        let result = analyzer().analyze(dir.path()).unwrap();

        assert!(result.architecture_summary.contains("Python project"));
        assert!(result.architecture_summary.contains("3 files"));
        assert!(result.architecture_summary.contains("1 entry point"));
    }

    #[test]
    fn test_top_level_dir() {
        assert_eq!(top_level_dir(Path::new("src/main.py")), Some("src".to_string()));
        assert_eq!(top_level_dir(Path::new("src/deep/a.py")), Some("src".to_string()));
        assert_eq!(top_level_dir(Path::new("main.py")), None);
    }

    #[test]
    fn test_snapshot_serialization_round_trip() {
        let dir = create_test_project();
        let result = analyzer().analyze(dir.path()).unwrap();

        let json = serde_json::to_string(&result).unwrap();
        let back: AnalysisResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.total_files, result.total_files);
        assert_eq!(back.languages, result.languages);
        assert_eq!(back.entry_points, result.entry_points);
        assert_eq!(back.id, result.id);
    }
}
