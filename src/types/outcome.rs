//! Per-row outcome data structures

use serde::Serialize;

/// How outcomes are resolved for a run, decided once by schema detection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "column", rename_all = "lowercase")]
pub enum AnalysisMode {
    /// Ground truth comes from the named binary class column
    Labeled(String),
    /// No class column; outcomes are simulated
    Unlabeled,
}

/// Resolved outcome for one row
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeRecord {
    /// Predicted label
    pub is_fraudulent: bool,
    /// Confidence in [0, 100]
    pub confidence: f64,
    /// Ground truth, when the input carries one
    pub actual: Option<bool>,
}

impl OutcomeRecord {
    pub fn labeled(is_fraudulent: bool, confidence: f64) -> Self {
        Self {
            is_fraudulent,
            confidence,
            actual: Some(is_fraudulent),
        }
    }

    pub fn simulated(is_fraudulent: bool, confidence: f64) -> Self {
        Self {
            is_fraudulent,
            confidence,
            actual: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_serialization() {
        let json = serde_json::to_string(&AnalysisMode::Labeled("Class".into())).unwrap();
        assert_eq!(json, r#"{"type":"labeled","column":"Class"}"#);

        let json = serde_json::to_string(&AnalysisMode::Unlabeled).unwrap();
        assert_eq!(json, r#"{"type":"unlabeled"}"#);
    }

    #[test]
    fn test_record_constructors() {
        assert_eq!(OutcomeRecord::labeled(true, 80.0).actual, Some(true));
        assert_eq!(OutcomeRecord::simulated(true, 80.0).actual, None);
    }
}
