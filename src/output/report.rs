// Renders a snapshot as JSON, Markdown, or plain text.

use crate::analysis::AnalysisResult;
use crate::error::Result;
use tera::{Context, Tera};

/// Pretty-printed JSON record
pub fn render_json(analysis: &AnalysisResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(analysis)?)
}

/// Markdown report from the embedded template
pub fn render_markdown(analysis: &AnalysisResult) -> Result<String> {
    let mut tera = Tera::default();
    tera.add_raw_template(
        "report.md",
        include_str!("../../templates/report.md.tera"),
    )?;

    let mut context = Context::new();
    context.insert("analysis", analysis);
    Ok(tera.render("report.md", &context)?)
}

/// Terminal-friendly text rendering: the summary plus headline counters
pub fn render_text(analysis: &AnalysisResult) -> String {
    let mut out = String::new();

    out.push_str(&analysis.architecture_summary);
    out.push('\n');
    out.push('\n');

    out.push_str(&format!("Path:    {}\n", analysis.codebase_path.display()));
    out.push_str(&format!("Files:   {}\n", analysis.total_files));
    out.push_str(&format!("Lines:   {}\n", analysis.total_lines));

    if !analysis.languages.is_empty() {
        let langs: Vec<String> = analysis
            .languages
            .iter()
            .map(|(name, lines)| format!("{} ({})", name, lines))
            .collect();
        out.push_str(&format!("Languages: {}\n", langs.join(", ")));
    }

    if !analysis.entry_points.is_empty() {
        out.push_str("Entry points:\n");
        for ep in &analysis.entry_points {
            out.push_str(&format!("  {} [{}]\n", ep.path.display(), ep.kind.as_str()));
        }
    }

    if !analysis.warnings.is_empty() {
        out.push_str(&format!("Warnings: {}\n", analysis.warnings.len()));
    }

    out
}
