use serde::Serialize;

const FALLBACK_SUMMARY: &str = "No data available";

/// Uniform `{summary, details}` presentation shape shared by every consumer.
///
/// `summary` is never empty; `details` may be.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedResponse {
    summary: String,
    details: Vec<String>,
}

impl NormalizedResponse {
    pub fn new(summary: impl Into<String>, details: Vec<String>) -> Self {
        let summary = summary.into();
        let summary = if summary.trim().is_empty() {
            String::from(FALLBACK_SUMMARY)
        } else {
            summary
        };

        Self { summary, details }
    }

    pub fn summary_only(summary: impl Into<String>) -> Self {
        Self::new(summary, Vec::new())
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn details(&self) -> &[String] {
        &self.details
    }

    /// Summary followed by one line per detail.
    pub fn render(&self) -> String {
        let mut out = self.summary.clone();
        for detail in &self.details {
            out.push('\n');
            out.push_str(detail);
        }
        out
    }
}
