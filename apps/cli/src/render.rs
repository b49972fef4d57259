//! Plain-text rendering of the critique. Pure functions from state to
//! lines; the terminal loop just prints what comes back.

use promptlens_api::analysis::models::Analysis;

/// Formats the critique panel. Falls back to the zero-valued placeholder
/// when no analysis has run yet.
pub fn render_analysis(analysis: Option<&Analysis>) -> String {
    let placeholder;
    let analysis = match analysis {
        Some(analysis) => analysis,
        None => {
            placeholder = Analysis::placeholder();
            &placeholder
        }
    };

    let mut out = String::new();
    out.push_str(&format!(
        "Overall: {}/100 ({})\n",
        analysis.overall_score, analysis.overall_label
    ));

    for criterion in &analysis.criteria {
        out.push_str(&format!(
            "  {:<14} {:>3}/100  {:<8} {}\n",
            criterion.label,
            criterion.score,
            criterion.level.as_str(),
            criterion.feedback
        ));
    }

    if !analysis.suggestions.is_empty() {
        out.push_str("Suggestions:\n");
        for suggestion in &analysis.suggestions {
            out.push_str(&format!("  - {suggestion}\n"));
        }
    }

    if !analysis.improved_prompt.trim().is_empty() {
        out.push_str("Improved prompt:\n");
        out.push_str(&format!("  {}\n", analysis.improved_prompt));
    }

    out
}
