// Language classification by file extension, plus line counting.

use std::path::Path;

/// Extension -> language table. Open-ended: unrecognized extensions still
/// count toward file/line totals, they just get no language bucket.
const EXTENSION_TABLE: &[(&str, &str)] = &[
    ("py", "Python"),
    ("pyi", "Python"),
    ("rs", "Rust"),
    ("js", "JavaScript"),
    ("mjs", "JavaScript"),
    ("jsx", "JavaScript"),
    ("ts", "TypeScript"),
    ("tsx", "TypeScript"),
    ("go", "Go"),
    ("java", "Java"),
    ("c", "C"),
    ("h", "C"),
    ("cpp", "C++"),
    ("cc", "C++"),
    ("hpp", "C++"),
    ("rb", "Ruby"),
    ("php", "PHP"),
    ("sh", "Shell"),
    ("bash", "Shell"),
    ("html", "HTML"),
    ("css", "CSS"),
    ("sql", "SQL"),
    ("kt", "Kotlin"),
    ("swift", "Swift"),
];

/// Map a file path to a language tag by extension
pub fn classify(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?;
    EXTENSION_TABLE
        .iter()
        .find(|(e, _)| ext.eq_ignore_ascii_case(e))
        .map(|(_, lang)| *lang)
}

/// Count newline-delimited records in decoded text
pub fn count_lines(content: &str) -> usize {
    content.lines().count()
}

/// Languages whose files are scanned for executable-entry idioms
pub fn is_executable_language(language: &str) -> bool {
    language == "Python"
}
