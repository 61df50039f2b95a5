// Deterministic architecture-summary rendering.

use crate::analysis::entry_points::EntryPoint;
use crate::analysis::tech_stack::TechStack;
use std::collections::BTreeMap;

/// Render the human-readable summary from the aggregated fields. Pure
/// function of its inputs: same snapshot, same sentences.
pub fn render(
    total_files: usize,
    total_lines: usize,
    languages: &BTreeMap<String, usize>,
    entry_points: &[EntryPoint],
    directory_count: usize,
    tech_stack: &TechStack,
) -> String {
    let mut parts = Vec::new();

    let subject = match dominant_language(languages) {
        Some(lang) => format!("{} project", lang),
        None => "Project".to_string(),
    };
    parts.push(format!(
        "{} with {} files ({} lines of code)",
        subject,
        total_files,
        format_thousands(total_lines)
    ));

    if !tech_stack.frameworks.is_empty() {
        let frameworks: Vec<&str> = tech_stack.frameworks.iter().map(|s| s.as_str()).collect();
        parts.push(format!("Uses {} framework", frameworks.join(", ")));
    }

    if !tech_stack.databases.is_empty() {
        let databases: Vec<&str> = tech_stack.databases.iter().map(|s| s.as_str()).collect();
        parts.push(format!("Databases: {}", databases.join(", ")));
    }

    match entry_points.len() {
        0 => {}
        1 => parts.push("Found 1 entry point".to_string()),
        n => parts.push(format!("Found {} entry points", n)),
    }

    if directory_count > 0 {
        parts.push(format!("{} top-level directories", directory_count));
    }

    parts.join(". ") + "."
}

/// Language with the most lines; name order breaks ties
fn dominant_language(languages: &BTreeMap<String, usize>) -> Option<&str> {
    languages
        .iter()
        .max_by(|(a_name, a_lines), (b_name, b_lines)| {
            a_lines.cmp(b_lines).then(b_name.cmp(a_name))
        })
        .map(|(name, _)| name.as_str())
}

fn format_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::entry_points::EntryPointKind;
    use std::path::PathBuf;

    fn entry(path: &str) -> EntryPoint {
        EntryPoint {
            path: PathBuf::from(path),
            kind: EntryPointKind::CliEntry,
            description: format!("Entry point in {}", path),
        }
    }

    #[test]
    fn test_empty_project() {
        let summary = render(0, 0, &BTreeMap::new(), &[], 0, &TechStack::default());
        assert_eq!(summary, "Project with 0 files (0 lines of code).");
    }

    #[test]
    fn test_full_summary() {
        let mut languages = BTreeMap::new();
        languages.insert("Python".to_string(), 3210);

        let mut stack = TechStack::default();
        stack.frameworks.insert("FastAPI".to_string());
        stack.databases.insert("PostgreSQL".to_string());

        let entries = vec![entry("main.py"), entry("worker.py")];

        let summary = render(42, 3210, &languages, &entries, 5, &stack);
        assert_eq!(
            summary,
            "Python project with 42 files (3,210 lines of code). \
             Uses FastAPI framework. Databases: PostgreSQL. \
             Found 2 entry points. 5 top-level directories."
        );
    }

    #[test]
    fn test_single_entry_point_phrasing() {
        let summary = render(1, 10, &BTreeMap::new(), &[entry("main.py")], 0, &TechStack::default());
        assert!(summary.contains("Found 1 entry point."));
        assert!(!summary.contains("entry points"));
    }

    #[test]
    fn test_dominant_language_by_lines() {
        let mut languages = BTreeMap::new();
        languages.insert("Python".to_string(), 100);
        languages.insert("JavaScript".to_string(), 900);
        assert_eq!(dominant_language(&languages), Some("JavaScript"));
    }

    #[test]
    fn test_dominant_language_tie_breaks_by_name() {
        let mut languages = BTreeMap::new();
        languages.insert("Go".to_string(), 50);
        languages.insert("Rust".to_string(), 50);
        assert_eq!(dominant_language(&languages), Some("Go"));
    }

    #[test]
    fn test_determinism() {
        let mut languages = BTreeMap::new();
        languages.insert("Rust".to_string(), 777);
        let stack = TechStack::default();

        let a = render(3, 777, &languages, &[], 2, &stack);
        let b = render(3, 777, &languages, &[], 2, &stack);
        assert_eq!(a, b);
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(1234567), "1,234,567");
    }
}
