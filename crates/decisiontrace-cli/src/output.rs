//! Output formatting for decision records.

use decisiontrace_core::DecisionRecord;

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Labelled, human-readable block
    Text,
    /// One JSON object per record, same shape as the log
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Output formatter.
#[derive(Debug, Clone, Copy)]
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Render one record.
    pub fn record(&self, record: &DecisionRecord) -> String {
        match self.format {
            OutputFormat::Text => render_text(record),
            OutputFormat::Json => render_json(record),
        }
    }
}

fn render_text(record: &DecisionRecord) -> String {
    let mut out = String::from("\n--- DECISION TRACE ---\n");
    out.push_str(&format!("Answer: {}\n", record.final_answer()));

    if record.assumptions().is_empty() {
        out.push_str("Assumptions: (none)\n");
    } else {
        out.push_str("Assumptions:\n");
        for (i, assumption) in record.assumptions().iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", i + 1, assumption));
        }
    }

    out.push_str(&format!("Evidence Type: {}\n", record.evidence_type()));
    out.push_str(&format!("Confidence: {}\n", record.confidence()));
    out.push_str(&format!("Risk Level: {}\n", record.risk_level()));
    out.push_str(&format!("Decision ID: {}\n", record.decision_id()));
    out.push_str(&format!("Timestamp: {}\n", record.timestamp_rfc3339()));
    out
}

fn render_json(record: &DecisionRecord) -> String {
    // A validated record always serializes.
    serde_json::to_string(record).unwrap_or_default()
}
