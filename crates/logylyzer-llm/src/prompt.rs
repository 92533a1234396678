/// Instruction sent ahead of the raw logs. The JSON shape mirrors
/// `AnalysisResult` field for field.
const ANALYSIS_INSTRUCTIONS: &str = r#"You are a DevOps AI Assistant. Analyze the following logs and return a JSON response with this exact structure:

{
  "rootCause": "Brief description of the root cause",
  "severity": "low|medium|high|critical",
  "suggestedFix": "Detailed fix instructions",
  "patternsDetected": ["pattern1", "pattern2"]
}"#;

const ANALYSIS_CLOSING: &str = "Return only valid JSON, no additional text.";

/// Build the analysis prompt with `logs` embedded verbatim.
pub fn build_analysis_prompt(logs: &str) -> String {
    format!("{ANALYSIS_INSTRUCTIONS}\n\nLogs:\n{logs}\n\n{ANALYSIS_CLOSING}")
}
