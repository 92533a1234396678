//! Turning model replies into `AnalysisResult`s.

use tracing::warn;

use logylyzer_core::models::analysis::AnalysisResult;

/// Parse a model reply as an `AnalysisResult`.
///
/// Never fails: a reply that is not the requested JSON object becomes
/// [`AnalysisResult::fallback`] carrying the raw reply text.
pub fn parse_analysis(reply: &str) -> AnalysisResult {
    match serde_json::from_str::<AnalysisResult>(strip_code_fence(reply)) {
        Ok(result) => result,
        Err(e) => {
            warn!(error = %e, reply_len = reply.len(), "model reply is not a valid analysis, keeping raw text");
            AnalysisResult::fallback(reply)
        }
    }
}

/// Remove a surrounding Markdown code fence (```` ```json ... ``` ````), if any.
pub fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(opened) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = opened.strip_suffix("```") else {
        return trimmed;
    };

    // Drop the info string (`json`, `JSON`, ...) on the opening line.
    match body.split_once('\n') {
        Some((info, rest)) if !info.trim_start().starts_with('{') => rest.trim(),
        _ => body.trim(),
    }
}
