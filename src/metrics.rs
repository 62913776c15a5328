//! Classification quality metrics and the run summary report.

use serde::Serialize;
use tracing::info;

/// Predicted-versus-actual outcome counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfusionCounts {
    pub true_positives: u64,
    pub false_positives: u64,
    pub true_negatives: u64,
    pub false_negatives: u64,
}

impl ConfusionCounts {
    pub fn total(&self) -> u64 {
        self.true_positives + self.false_positives + self.true_negatives + self.false_negatives
    }

    /// Rows whose actual outcome is fraudulent
    pub fn actual_fraudulent(&self) -> u64 {
        self.true_positives + self.false_negatives
    }

    /// Rows whose actual outcome is genuine
    pub fn actual_genuine(&self) -> u64 {
        self.true_negatives + self.false_positives
    }

    /// Accuracy, precision, recall and F1 derived from these counts
    pub fn metrics(&self) -> ClassificationMetrics {
        let tp = self.true_positives as f64;
        let fp = self.false_positives as f64;
        let tn = self.true_negatives as f64;
        let fn_ = self.false_negatives as f64;

        let accuracy = ratio(tp + tn, self.total() as f64);
        let precision = ratio(tp, tp + fp);
        let recall = ratio(tp, tp + fn_);
        let f1_score = ratio(2.0 * precision * recall, precision + recall);

        ClassificationMetrics {
            accuracy,
            precision,
            recall,
            f1_score,
        }
    }
}

/// Rates in [0, 1]; each is 0 when its denominator is 0
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
}

/// `numerator / denominator`, or 0 for a zero denominator
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// `count / total * 100` rounded to two decimals, 0 for an empty total
pub fn percent(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(count as f64 / total as f64 * 100.0)
}

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Log a framed summary of a finished run
pub fn print_summary(
    total: u64,
    genuine: u64,
    fraudulent: u64,
    counts: &ConfusionCounts,
    metrics: &ClassificationMetrics,
) {
    let fraud_pct = percent(fraudulent, total);
    let genuine_pct = percent(genuine, total);

    info!("╔══════════════════════════════════════════════════════════════╗");
    info!("║            FRAUD ANALYSIS - CLASSIFICATION SUMMARY           ║");
    info!("╠══════════════════════════════════════════════════════════════╣");
    info!("║ Transactions: {:>10}                                      ║", total);
    info!(
        "║ Genuine:      {:>10} ({:>6.2}%)                            ║",
        genuine, genuine_pct
    );
    info!(
        "║ Fraudulent:   {:>10} ({:>6.2}%)                            ║",
        fraudulent, fraud_pct
    );
    info!("╠══════════════════════════════════════════════════════════════╣");
    info!(
        "║ TP={:>8} FP={:>8} TN={:>8} FN={:>8}               ║",
        counts.true_positives, counts.false_positives, counts.true_negatives, counts.false_negatives
    );
    info!("╠══════════════════════════════════════════════════════════════╣");
    for (name, value) in [
        ("Accuracy", metrics.accuracy),
        ("Precision", metrics.precision),
        ("Recall", metrics.recall),
        ("F1 Score", metrics.f1_score),
    ] {
        let bar: String = "█".repeat((value * 20.0).round() as usize);
        info!("║   {:10}: {:>6.2}% {}", name, value * 100.0, bar);
    }
    info!("╚══════════════════════════════════════════════════════════════╝");
}
