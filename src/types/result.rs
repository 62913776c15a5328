//! Analysis result data structures, the shape handed to rendering

use crate::analysis::correlation::CorrelationMatrix;
use crate::analysis::stats::ColumnStats;
use crate::metrics::{ClassificationMetrics, ConfusionCounts};
use crate::types::outcome::AnalysisMode;
use serde::Serialize;
use uuid::Uuid;

/// One display row of the result sample
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleTransaction {
    /// Human-readable rendering of the seconds-offset time field
    pub time: String,
    /// Amount with two decimals
    pub amount: String,
    pub is_fraudulent: bool,
    /// Confidence with two decimals
    pub confidence: String,
}

/// Complete output of one analysis run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Unique run identifier
    pub analysis_id: Uuid,

    /// Whether outcomes came from a class column or from simulation
    pub mode: AnalysisMode,

    pub total_transactions: u64,
    pub genuine_count: u64,
    pub fraudulent_count: u64,

    /// Percentages rounded to two decimals
    pub genuine_percent: f64,
    pub fraud_percent: f64,
    pub risk_score: f64,

    pub metrics: ClassificationMetrics,
    pub confusion_matrix: ConfusionCounts,

    /// True when the confusion matrix is approximated from assumed rates
    pub metrics_approximated: bool,

    pub correlations: CorrelationMatrix,

    /// Statistics of the amount column, when present
    pub amount_stats: Option<ColumnStats>,

    pub sample_transactions: Vec<SampleTransaction>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_serialization() {
        let sample = SampleTransaction {
            time: "00:00:00".to_string(),
            amount: "149.62".to_string(),
            is_fraudulent: false,
            confidence: "12.50".to_string(),
        };

        let json = serde_json::to_value(&sample).unwrap();
        assert_eq!(json["isFraudulent"], false);
        assert_eq!(json["amount"], "149.62");
        assert_eq!(json["confidence"], "12.50");
    }
}
