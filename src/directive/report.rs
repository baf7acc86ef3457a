use crate::directive::model::ParseError;

/// Report text when a parse produced no errors.
pub const NO_ISSUES: &str = "None";

/// Render parse errors as the node's issues text.
///
/// One line per error, `"<shader>" line <n>: <message>`, or [`NO_ISSUES`] when there are none.
pub fn issues_report(shader_label: &str, errors: &[ParseError]) -> String {
    if errors.is_empty() {
        return NO_ISSUES.to_owned();
    }
    errors
        .iter()
        .map(|e| format!("\"{shader_label}\" line {}: {}", e.line, e.issue))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
#[path = "../../tests/unit/directive/report.rs"]
mod tests;
