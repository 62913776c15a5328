//! Descriptive statistics over a numeric column

use serde::Serialize;

/// Summary statistics of one column
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ColumnStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation (n - 1 denominator)
    pub std: f64,
}

/// Compute min/max/mean/median/sample std.
///
/// Empty input yields all zeros; a single value has std 0.
pub fn compute_stats(values: &[f64]) -> ColumnStats {
    if values.is_empty() {
        return ColumnStats::default();
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;

    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };

    let std = if n > 1 {
        let variance = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        variance.sqrt()
    } else {
        0.0
    };

    ColumnStats {
        min: sorted[0],
        max: sorted[n - 1],
        mean,
        median,
        std,
    }
}
