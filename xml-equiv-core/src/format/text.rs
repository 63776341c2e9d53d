use crate::diff::result::DiffResult;

/// Format a comparison result as plain text, one line per difference.
///
/// `!` marks a major difference and `~` a minor one. A result without any
/// differences renders as `= identical`.
pub fn format_text(result: &DiffResult) -> String {
    if result.differences().is_empty() {
        return "= identical".to_string();
    }

    let mut lines = Vec::with_capacity(result.differences().len());
    for difference in result.differences() {
        let marker = if difference.is_major() { '!' } else { '~' };
        lines.push(format!("{marker} {difference}"));
    }
    lines.join("\n")
}

/// Format the verdict and difference counts on one line.
pub fn format_summary(result: &DiffResult) -> String {
    format!(
        "equal={} identical={} major={} minor={}",
        result.is_equal(),
        result.is_identical(),
        result.major_count(),
        result.minor_count()
    )
}
