//! Outcome aggregation into class counts and confusion metrics

use crate::config::AppConfig;
use crate::metrics::{percent, ClassificationMetrics, ConfusionCounts};
use crate::types::outcome::{AnalysisMode, OutcomeRecord};
use tracing::debug;

/// Aggregated view of all outcomes in a run
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OutcomeSummary {
    pub total: u64,
    pub genuine_count: u64,
    pub fraudulent_count: u64,
    pub genuine_percent: f64,
    pub fraud_percent: f64,
    /// Equal to `fraud_percent`
    pub risk_score: f64,
    pub confusion: ConfusionCounts,
    pub metrics: ClassificationMetrics,
    /// True when the confusion counts come from assumed rates, not comparison
    pub approximated: bool,
}

/// Reduces outcome records into an [`OutcomeSummary`].
///
/// With ground truth the confusion counts are exact. Without it they are
/// approximated from an assumed recall and precision applied to the tallies.
pub struct OutcomeAggregator {
    assumed_recall: f64,
    assumed_precision: f64,
}

impl OutcomeAggregator {
    /// Create an aggregator with the rates used for simulated runs
    pub fn new(assumed_recall: f64, assumed_precision: f64) -> Self {
        Self {
            assumed_recall,
            assumed_precision,
        }
    }

    /// Create an aggregator from configuration
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.simulation.assumed_recall,
            config.simulation.assumed_precision,
        )
    }

    /// Aggregate all records in a single pass
    pub fn aggregate(&self, records: &[OutcomeRecord], mode: &AnalysisMode) -> OutcomeSummary {
        let mut fraudulent = 0u64;
        let mut genuine = 0u64;
        let mut exact = ConfusionCounts::default();

        for record in records {
            if record.is_fraudulent {
                fraudulent += 1;
            } else {
                genuine += 1;
            }

            match (record.is_fraudulent, record.actual) {
                (true, Some(true)) => exact.true_positives += 1,
                (true, Some(false)) => exact.false_positives += 1,
                (false, Some(false)) => exact.true_negatives += 1,
                (false, Some(true)) => exact.false_negatives += 1,
                (_, None) => {}
            }
        }

        let (confusion, approximated) = match mode {
            AnalysisMode::Labeled(_) => (exact, false),
            AnalysisMode::Unlabeled => (self.approximate(fraudulent, genuine), true),
        };

        let total = fraudulent + genuine;
        let fraud_percent = percent(fraudulent, total);

        debug!(
            total,
            fraudulent,
            genuine,
            approximated,
            confusion = ?confusion,
            "Outcomes aggregated"
        );

        OutcomeSummary {
            total,
            genuine_count: genuine,
            fraudulent_count: fraudulent,
            genuine_percent: percent(genuine, total),
            fraud_percent,
            risk_score: fraud_percent,
            confusion,
            metrics: confusion.metrics(),
            approximated,
        }
    }

    /// Confusion counts implied by the assumed rates.
    ///
    /// Keeps `TP + FN == fraudulent` and `TN + FP == genuine`.
    pub fn approximate(&self, fraudulent: u64, genuine: u64) -> ConfusionCounts {
        let tp = ((fraudulent as f64 * self.assumed_recall).round() as u64).min(fraudulent);
        let fp = if self.assumed_precision > 0.0 {
            let implied = tp as f64 * (1.0 - self.assumed_precision) / self.assumed_precision;
            (implied.round() as u64).min(genuine)
        } else {
            genuine
        };

        ConfusionCounts {
            true_positives: tp,
            false_positives: fp,
            true_negatives: genuine - fp,
            false_negatives: fraudulent - tp,
        }
    }
}

impl Default for OutcomeAggregator {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labeled() -> AnalysisMode {
        AnalysisMode::Labeled("Class".to_string())
    }

    #[test]
    fn test_labeled_scenario() {
        let records = vec![
            OutcomeRecord::labeled(true, 90.0),
            OutcomeRecord::labeled(false, 10.0),
            OutcomeRecord::labeled(false, 20.0),
        ];
        let summary = OutcomeAggregator::default().aggregate(&records, &labeled());

        assert_eq!(summary.total, 3);
        assert_eq!(summary.fraudulent_count, 1);
        assert_eq!(summary.genuine_count, 2);
        assert_eq!(summary.genuine_percent, 66.67);
        assert_eq!(summary.fraud_percent, 33.33);
        assert_eq!(summary.risk_score, summary.fraud_percent);
        assert_eq!(summary.confusion.true_positives, 1);
        assert_eq!(summary.confusion.true_negatives, 2);
        assert_eq!(summary.metrics.accuracy, 1.0);
        assert!(!summary.approximated);
    }

    #[test]
    fn test_exact_comparison_with_distinct_prediction() {
        let records = vec![
            OutcomeRecord {
                is_fraudulent: true,
                confidence: 80.0,
                actual: Some(false),
            },
            OutcomeRecord {
                is_fraudulent: false,
                confidence: 10.0,
                actual: Some(true),
            },
        ];
        let summary = OutcomeAggregator::default().aggregate(&records, &labeled());
        assert_eq!(summary.confusion.false_positives, 1);
        assert_eq!(summary.confusion.false_negatives, 1);
        assert_eq!(summary.metrics.accuracy, 0.0);
    }

    #[test]
    fn test_unlabeled_approximation() {
        let records: Vec<OutcomeRecord> = (0..100)
            .map(|i| OutcomeRecord::simulated(i < 20, 50.0))
            .collect();
        let summary = OutcomeAggregator::default().aggregate(&records, &AnalysisMode::Unlabeled);

        let c = summary.confusion;
        assert!(summary.approximated);
        assert_eq!(c.true_positives, 17);
        assert_eq!(c.false_negatives, 3);
        assert_eq!(c.false_positives, 2);
        assert_eq!(c.true_negatives, 78);
        assert_eq!(c.actual_fraudulent(), summary.fraudulent_count);
        assert_eq!(c.actual_genuine(), summary.genuine_count);
    }

    #[test]
    fn test_approximation_caps_false_positives() {
        let c = OutcomeAggregator::new(1.0, 0.1).approximate(10, 3);
        assert_eq!(c.true_positives, 10);
        assert_eq!(c.false_positives, 3);
        assert_eq!(c.true_negatives, 0);
    }

    #[test]
    fn test_empty_run() {
        let summary = OutcomeAggregator::default().aggregate(&[], &labeled());
        assert_eq!(summary, OutcomeSummary::default());
    }
}
