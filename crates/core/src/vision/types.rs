use serde::{Deserialize, Serialize};

/// A detected label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub description: String,
    /// Confidence in [0.0, 1.0].
    pub score: f64,
}

impl Label {
    pub fn new(description: impl Into<String>, score: f64) -> Self {
        Self {
            description: description.into(),
            score,
        }
    }

    /// `(98.00%) Cat`
    pub fn display(&self) -> String {
        format!("({:.2}%) {}", self.score * 100.0, self.description)
    }
}

/// Comma-joined label list, e.g. `(98.00%) Cat, (91.00%) Pet`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelSummary(String);

impl LabelSummary {
    /// Summarize the first `top` labels in the given order.
    ///
    /// Returns `None` when there is nothing to summarize.
    pub fn from_labels(labels: &[Label], top: usize) -> Option<Self> {
        let entries: Vec<String> = labels.iter().take(top).map(Label::display).collect();
        if entries.is_empty() {
            return None;
        }
        Some(Self(entries.join(", ")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LabelSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
