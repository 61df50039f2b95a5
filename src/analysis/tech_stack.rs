// Tech-stack inference from well-known manifest files.
//
// Keyword lookup over manifest text, bucketed into frameworks, databases,
// and tools. Manifests are read at the root and its immediate
// subdirectories only; results are a set union with no precedence, so
// visitation order never matters.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Inferred technology sets. Disjoint buckets, no duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechStack {
    pub frameworks: BTreeSet<String>,
    pub databases: BTreeSet<String>,
    pub tools: BTreeSet<String>,
}

impl TechStack {
    /// Set-union merge; associative and commutative
    pub fn merge(&mut self, other: TechStack) {
        self.frameworks.extend(other.frameworks);
        self.databases.extend(other.databases);
        self.tools.extend(other.tools);
    }

    pub fn is_empty(&self) -> bool {
        self.frameworks.is_empty() && self.databases.is_empty() && self.tools.is_empty()
    }
}

/// Manifest filenames worth reading as tech-stack signals
pub const MANIFEST_FILES: &[&str] = &[
    "requirements.txt",
    "pyproject.toml",
    "Pipfile",
    "package.json",
    "Cargo.toml",
    "go.mod",
    "Gemfile",
    "Dockerfile",
    "docker-compose.yml",
    "docker-compose.yaml",
];

const FRAMEWORK_KEYWORDS: &[(&str, &str)] = &[
    ("fastapi", "FastAPI"),
    ("flask", "Flask"),
    ("django", "Django"),
    ("starlette", "Starlette"),
    ("express", "Express"),
    ("react", "React"),
    ("vue", "Vue"),
    ("svelte", "Svelte"),
    ("axum", "Axum"),
    ("actix-web", "Actix Web"),
    ("rails", "Rails"),
    ("sinatra", "Sinatra"),
    ("laravel", "Laravel"),
];

const DATABASE_KEYWORDS: &[(&str, &str)] = &[
    ("postgres", "PostgreSQL"),
    ("psycopg", "PostgreSQL"),
    ("mysql", "MySQL"),
    ("mariadb", "MariaDB"),
    ("sqlite", "SQLite"),
    ("redis", "Redis"),
    ("mongodb", "MongoDB"),
    ("pymongo", "MongoDB"),
    ("mongoose", "MongoDB"),
    ("chromadb", "ChromaDB"),
    ("elasticsearch", "Elasticsearch"),
    ("cassandra", "Cassandra"),
];

const TOOL_KEYWORDS: &[(&str, &str)] = &[
    ("pytest", "pytest"),
    ("[tool.poetry]", "Poetry"),
    ("[tool.uv]", "uv"),
    ("webpack", "Webpack"),
    ("vite", "Vite"),
    ("eslint", "ESLint"),
    ("jest", "Jest"),
    ("mypy", "mypy"),
    ("ruff", "Ruff"),
];

/// Scans manifest files and buckets keyword hits into a `TechStack`.
pub struct TechStackInferencer {
    exclude: BTreeSet<String>,
}

impl TechStackInferencer {
    /// Create an inferencer; excluded directory names are skipped when
    /// looking at immediate subdirectories.
    pub fn new(exclude: impl IntoIterator<Item = String>) -> Self {
        Self {
            exclude: exclude.into_iter().collect(),
        }
    }

    /// Infer the tech stack for a root directory. Missing manifests
    /// contribute nothing; re-running yields the same sets.
    pub fn infer(&self, root: &Path) -> TechStack {
        let mut stack = TechStack::default();
        self.scan_dir(root, &mut stack);

        if let Ok(entries) = fs::read_dir(root) {
            for entry in entries.flatten() {
                let path = entry.path();
                if !path.is_dir() {
                    continue;
                }
                let name = entry.file_name();
                let excluded = name
                    .to_str()
                    .map(|n| self.exclude.contains(n))
                    .unwrap_or(false);
                if !excluded {
                    self.scan_dir(&path, &mut stack);
                }
            }
        }

        stack
    }

    fn scan_dir(&self, dir: &Path, stack: &mut TechStack) {
        for name in MANIFEST_FILES {
            let path = dir.join(name);
            if path.is_file() {
                scan_manifest(name, &path, stack);
            }
        }
    }
}

fn scan_manifest(name: &str, path: &Path, stack: &mut TechStack) {
    if name == "Dockerfile" || name.starts_with("docker-compose") {
        stack.tools.insert("Docker".to_string());
    }

    // Unreadable or binary manifests simply contribute nothing
    let Ok(content) = fs::read_to_string(path) else {
        return;
    };
    let lower = content.to_lowercase();

    for (keyword, canonical) in FRAMEWORK_KEYWORDS {
        if lower.contains(keyword) {
            stack.frameworks.insert(canonical.to_string());
        }
    }
    for (keyword, canonical) in DATABASE_KEYWORDS {
        if lower.contains(keyword) {
            stack.databases.insert(canonical.to_string());
        }
    }
    for (keyword, canonical) in TOOL_KEYWORDS {
        if lower.contains(keyword) {
            stack.tools.insert(canonical.to_string());
        }
    }
}
