// Entry-point detection heuristics.
//
// These are textual heuristics, not parse-tree analyses: the main-guard
// idiom is matched anywhere in the file, including inside comments and
// string literals. Missed idiomatic entries and matches inside comments
// are accepted trade-offs of the strategy.

use crate::analysis::language;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A file heuristically identified as a program's executable starting point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPoint {
    /// Path relative to the scanned root
    pub path: PathBuf,
    #[serde(rename = "type")]
    pub kind: EntryPointKind,
    pub description: String,
}

/// Best-guess classification of an entry point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryPointKind {
    CliEntry,
    WebEntry,
    Unknown,
}

impl EntryPointKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryPointKind::CliEntry => "cli_entry",
            EntryPointKind::WebEntry => "web_entry",
            EntryPointKind::Unknown => "unknown",
        }
    }
}

/// One heuristic signal for an executable entry. Implementations are pure
/// functions over a file's path and content, so a parse-tree detector can
/// be substituted without changing the engine contract.
pub trait EntryPointDetector: Send + Sync {
    fn name(&self) -> &'static str;

    /// Emit an entry point if this signal matches
    fn detect(
        &self,
        relative_path: &Path,
        file_language: Option<&str>,
        content: &str,
    ) -> Option<EntryPoint>;
}

const MAIN_GUARD_PATTERNS: &[&str] = &[
    r#"if __name__ == "__main__""#,
    "if __name__ == '__main__'",
];

/// Import names that mark a file as part of a web service
const WEB_FRAMEWORK_HINTS: &[&str] = &[
    "fastapi",
    "flask",
    "django",
    "starlette",
    "aiohttp",
    "tornado",
    "bottle",
];

fn classify_by_imports(content: &str) -> EntryPointKind {
    let lower = content.to_lowercase();
    if WEB_FRAMEWORK_HINTS.iter().any(|hint| lower.contains(hint)) {
        EntryPointKind::WebEntry
    } else {
        EntryPointKind::CliEntry
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// The canonical signal: a top-level conditional comparing the module's
/// "am I the main program" marker.
pub struct MainGuardDetector;

impl EntryPointDetector for MainGuardDetector {
    fn name(&self) -> &'static str {
        "main_guard"
    }

    fn detect(
        &self,
        relative_path: &Path,
        file_language: Option<&str>,
        content: &str,
    ) -> Option<EntryPoint> {
        let lang = file_language?;
        if !language::is_executable_language(lang) {
            return None;
        }

        if !MAIN_GUARD_PATTERNS.iter().any(|p| content.contains(p)) {
            return None;
        }

        Some(EntryPoint {
            path: relative_path.to_path_buf(),
            kind: classify_by_imports(content),
            description: format!("Entry point in {}", file_name_of(relative_path)),
        })
    }
}

/// A `#!` interpreter line at the very start of the file marks a script
/// entry. Recognized interpreters get a proper tag; anything else is
/// `unknown`.
pub struct ShebangDetector;

impl EntryPointDetector for ShebangDetector {
    fn name(&self) -> &'static str {
        "shebang"
    }

    fn detect(
        &self,
        relative_path: &Path,
        _file_language: Option<&str>,
        content: &str,
    ) -> Option<EntryPoint> {
        if !content.starts_with("#!") {
            return None;
        }

        let interpreter = content.lines().next().unwrap_or("");
        let kind = if interpreter.contains("python") {
            classify_by_imports(content)
        } else if interpreter.contains("sh") {
            EntryPointKind::CliEntry
        } else {
            EntryPointKind::Unknown
        };

        Some(EntryPoint {
            path: relative_path.to_path_buf(),
            kind,
            description: format!("Script entry in {}", file_name_of(relative_path)),
        })
    }
}

/// The default detector chain, in priority order. A file yields at most
/// one entry point: the first detector that matches wins.
pub fn default_detectors() -> Vec<Box<dyn EntryPointDetector>> {
    vec![Box::new(MainGuardDetector), Box::new(ShebangDetector)]
}

/// Run the detector chain over one file
pub fn detect(
    detectors: &[Box<dyn EntryPointDetector>],
    relative_path: &Path,
    file_language: Option<&str>,
    content: &str,
) -> Option<EntryPoint> {
    detectors
        .iter()
        .find_map(|d| d.detect(relative_path, file_language, content))
}
