//! Chart-ready data shapes for the rendering boundary.
//!
//! A [`ChartSet`] is an owned value built from one finished run. Whoever
//! renders it owns it and replaces it when the next run succeeds; nothing
//! here keeps chart state between runs.

use crate::metrics::percent;
use crate::types::outcome::OutcomeRecord;
use crate::types::result::AnalysisResult;
use crate::types::table::RawTable;
use serde::Serialize;

/// Bins in the amount histogram
pub const AMOUNT_BINS: usize = 50;

const SECONDS_PER_DAY: f64 = 86_400.0;
const SECONDS_PER_HOUR: f64 = 3_600.0;

/// Genuine/fraudulent split, for a pie or donut chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassDistribution {
    pub labels: [&'static str; 2],
    pub counts: [u64; 2],
    pub percentages: [f64; 2],
}

/// Equal-width histogram with a fraudulent-row overlay
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Histogram {
    /// `bins + 1` ascending edges; empty when there is no data
    pub bin_edges: Vec<f64>,
    pub counts: Vec<u64>,
    pub fraud_counts: Vec<u64>,
}

/// One bar of the metrics chart, in percent
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricBar {
    pub name: &'static str,
    pub percent: f64,
}

/// All chart inputs for one analysis run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSet {
    pub class_distribution: ClassDistribution,
    pub amount_histogram: Histogram,
    /// Transactions per hour of day; empty when there is no time column
    pub hourly_distribution: Vec<u64>,
    pub metric_bars: Vec<MetricBar>,
}

impl ChartSet {
    /// Build every chart shape from a finished run
    pub fn build(
        table: &RawTable,
        outcomes: &[OutcomeRecord],
        result: &AnalysisResult,
        amount_column: &str,
        time_column: &str,
    ) -> Self {
        let total = result.total_transactions;
        let class_distribution = ClassDistribution {
            labels: ["Genuine", "Fraudulent"],
            counts: [result.genuine_count, result.fraudulent_count],
            percentages: [
                percent(result.genuine_count, total),
                percent(result.fraudulent_count, total),
            ],
        };

        let amounts: Vec<(f64, bool)> = outcomes
            .iter()
            .enumerate()
            .filter_map(|(i, o)| {
                table
                    .cell(i, amount_column)
                    .and_then(|c| c.as_f64())
                    .map(|a| (a, o.is_fraudulent))
            })
            .collect();

        let m = &result.metrics;
        let metric_bars = vec![
            MetricBar {
                name: "Accuracy",
                percent: m.accuracy * 100.0,
            },
            MetricBar {
                name: "Precision",
                percent: m.precision * 100.0,
            },
            MetricBar {
                name: "Recall",
                percent: m.recall * 100.0,
            },
            MetricBar {
                name: "F1 Score",
                percent: m.f1_score * 100.0,
            },
        ];

        Self {
            class_distribution,
            amount_histogram: histogram(&amounts, AMOUNT_BINS),
            hourly_distribution: hourly_counts(table, time_column),
            metric_bars,
        }
    }
}

/// Histogram of `(value, is_fraudulent)` pairs over `[min, max]`.
///
/// A constant column is widened to `[v - 0.5, v + 0.5]`.
pub fn histogram(values: &[(f64, bool)], bins: usize) -> Histogram {
    if values.is_empty() || bins == 0 {
        return Histogram::default();
    }

    let (mut min, mut max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (v, _)| {
            (lo.min(*v), hi.max(*v))
        });
    if min == max {
        min -= 0.5;
        max += 0.5;
    }

    let width = (max - min) / bins as f64;
    let bin_edges = (0..=bins).map(|i| min + width * i as f64).collect();
    let mut counts = vec![0u64; bins];
    let mut fraud_counts = vec![0u64; bins];

    for (value, is_fraudulent) in values {
        let idx = (((value - min) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
        if *is_fraudulent {
            fraud_counts[idx] += 1;
        }
    }

    Histogram {
        bin_edges,
        counts,
        fraud_counts,
    }
}

/// Count rows per hour of day from a seconds-offset column
pub fn hourly_counts(table: &RawTable, time_column: &str) -> Vec<u64> {
    if !table.has_column(time_column) {
        return Vec::new();
    }

    let mut hours = vec![0u64; 24];
    for secs in table.column_cells(time_column).filter_map(|c| c.as_f64()) {
        if secs < 0.0 {
            continue;
        }
        let hour = ((secs % SECONDS_PER_DAY) / SECONDS_PER_HOUR).floor() as usize;
        hours[hour.min(23)] += 1;
    }
    hours
}
