use colored::Colorize;
use xml_equiv_core::{format_summary, format_text, DiffResult};

/// Render differences for terminal output.
pub fn render_text(description: &str, result: &DiffResult) -> String {
    let mut out = vec![description.bold().to_string()];

    for line in format_text(result).lines() {
        let colored = if line.starts_with('!') {
            line.red().to_string()
        } else if line.starts_with('~') {
            line.yellow().to_string()
        } else {
            line.green().to_string()
        };
        out.push(colored);
    }

    out.push(render_summary(result));
    out.join("\n")
}

/// Render the one-line verdict.
pub fn render_summary(result: &DiffResult) -> String {
    format_summary(result).cyan().to_string()
}
