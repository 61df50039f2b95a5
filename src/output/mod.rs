// Snapshot rendering

pub mod report;

pub use report::{render_json, render_markdown, render_text};
