use regex::RegexSet;

use crate::error::AgentError;

/// Decides which log lines are worth an analysis request.
#[derive(Debug, Clone)]
pub struct ErrorFilter {
    patterns: RegexSet,
}

impl ErrorFilter {
    /// Build a case-insensitive filter from regex patterns.
    pub fn new<I, S>(patterns: I) -> Result<Self, AgentError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| format!("(?i){}", p.as_ref()));
        let patterns = RegexSet::new(patterns).map_err(|e| AgentError::Pattern(e.to_string()))?;
        Ok(Self { patterns })
    }

    pub fn matches(&self, line: &str) -> bool {
        self.patterns.is_match(line)
    }
}
