//! Pairwise feature correlation matrix

use crate::config::PlaceholderRange;
use crate::types::table::FeatureSet;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::debug;

/// Symmetric correlation matrix over named features
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationMatrix {
    pub features: Vec<String>,
    pub matrix: Vec<Vec<f64>>,
    /// Number of off-diagonal pairs filled with a placeholder
    pub placeholder_cells: usize,
}

impl CorrelationMatrix {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Placeholder settings for cells without a sample-based correlation
#[derive(Debug, Clone, Copy)]
pub struct CorrelationOptions {
    pub seed: u64,
    pub placeholder: PlaceholderRange,
}

impl Default for CorrelationOptions {
    fn default() -> Self {
        Self {
            seed: 42,
            placeholder: PlaceholderRange::Generic,
        }
    }
}

/// Compute the N x N correlation matrix of a feature set.
///
/// Each pair is compared only over rows where both columns hold a number.
/// Cells are Pearson coefficients where at least two such rows exist and
/// both sides have non-zero variance. Any other pair gets a placeholder
/// drawn from the configured range, seeded by the pair so the matrix stays
/// symmetric and reproducible.
pub fn compute_correlations(features: &FeatureSet, options: &CorrelationOptions) -> CorrelationMatrix {
    let columns = features.columns();
    let n = columns.len();
    let mut matrix = vec![vec![0.0; n]; n];
    let mut placeholder_cells = 0;

    for i in 0..n {
        matrix[i][i] = 1.0;
        for j in (i + 1)..n {
            let (a, b) = columns[i].paired_with(&columns[j]);
            let value = match pearson(&a, &b) {
                Some(r) => r,
                None => {
                    placeholder_cells += 1;
                    let r = placeholder(options, i, j);
                    debug!(
                        a = %columns[i].name,
                        b = %columns[j].name,
                        value = r,
                        "Correlation not computable, using placeholder"
                    );
                    r
                }
            };
            matrix[i][j] = value;
            matrix[j][i] = value;
        }
    }

    CorrelationMatrix {
        features: features.names(),
        matrix,
        placeholder_cells,
    }
}

/// Pearson correlation, or `None` when it is undefined for these samples
pub fn pearson(a: &[f64], b: &[f64]) -> Option<f64> {
    if a.len() != b.len() || a.len() < 2 {
        return None;
    }

    let n = a.len() as f64;
    let mean_a = a.iter().sum::<f64>() / n;
    let mean_b = b.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (x, y) in a.iter().zip(b) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    if var_a <= 0.0 || var_b <= 0.0 {
        return None;
    }

    let r = cov / (var_a.sqrt() * var_b.sqrt());
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}

// i < j always, so (i, j) and (j, i) share one draw
fn placeholder(options: &CorrelationOptions, i: usize, j: usize) -> f64 {
    let pair = ((i as u64) << 32) | j as u64;
    let mut rng = StdRng::seed_from_u64(options.seed ^ pair.wrapping_mul(0x9E37_79B9_7F4A_7C15));
    let (low, high) = options.placeholder.bounds();
    rng.gen_range(low..=high)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::table::NumericColumn;

    fn set(cols: &[(&str, &[f64])]) -> FeatureSet {
        FeatureSet::new(
            cols.iter()
                .map(|(name, values)| NumericColumn::new(*name, values.to_vec()))
                .collect(),
        )
    }

    #[test]
    fn test_perfect_correlations() {
        let features = set(&[
            ("a", &[1.0, 2.0, 3.0, 4.0]),
            ("b", &[2.0, 4.0, 6.0, 8.0]),
            ("c", &[4.0, 3.0, 2.0, 1.0]),
        ]);
        let result = compute_correlations(&features, &CorrelationOptions::default());

        assert_eq!(result.features, vec!["a", "b", "c"]);
        assert!((result.matrix[0][1] - 1.0).abs() < 1e-12);
        assert!((result.matrix[0][2] + 1.0).abs() < 1e-12);
        assert_eq!(result.placeholder_cells, 0);
        for i in 0..3 {
            assert_eq!(result.matrix[i][i], 1.0);
        }
    }

    #[test]
    fn test_pairs_use_shared_rows_only() {
        // a is missing row 3, b is missing row 0
        let features = FeatureSet::new(vec![
            NumericColumn::with_rows("a", vec![0, 1, 2], vec![1.0, 2.0, 3.0]),
            NumericColumn::with_rows("b", vec![1, 2, 3], vec![9.0, 8.0, 7.0]),
        ]);
        let result = compute_correlations(&features, &CorrelationOptions::default());

        // Shared rows 1 and 2 pair (2, 9) and (3, 8)
        assert!((result.matrix[0][1] + 1.0).abs() < 1e-12);
        assert_eq!(result.placeholder_cells, 0);
    }

    #[test]
    fn test_placeholder_for_too_few_shared_rows() {
        let features = FeatureSet::new(vec![
            NumericColumn::with_rows("a", vec![0, 1, 2], vec![1.0, 2.0, 3.0]),
            NumericColumn::with_rows("b", vec![2, 3], vec![1.0, 2.0]),
        ]);
        let options = CorrelationOptions::default();
        let result = compute_correlations(&features, &options);

        assert_eq!(result.placeholder_cells, 1);
        let v = result.matrix[0][1];
        assert_eq!(v, result.matrix[1][0]);
        assert!((-0.5..=0.9).contains(&v));

        // Same seed, same placeholder
        let again = compute_correlations(&features, &options);
        assert_eq!(again.matrix, result.matrix);
    }

    #[test]
    fn test_placeholder_for_constant_column() {
        let features = set(&[("a", &[1.0, 1.0, 1.0]), ("b", &[1.0, 2.0, 3.0])]);
        let options = CorrelationOptions {
            seed: 7,
            placeholder: PlaceholderRange::Heatmap,
        };
        let result = compute_correlations(&features, &options);
        assert_eq!(result.placeholder_cells, 1);
        assert!((-1.0..=1.0).contains(&result.matrix[0][1]));
    }

    #[test]
    fn test_empty_feature_set() {
        let result = compute_correlations(&FeatureSet::default(), &CorrelationOptions::default());
        assert!(result.is_empty());
        assert!(result.matrix.is_empty());
    }

    #[test]
    fn test_paired_with_skips_gaps() {
        let a = NumericColumn::with_rows("a", vec![0, 2, 4, 5], vec![1.0, 3.0, 5.0, 6.0]);
        let b = NumericColumn::with_rows("b", vec![1, 2, 5], vec![20.0, 30.0, 60.0]);
        assert_eq!(a.paired_with(&b), (vec![3.0, 6.0], vec![30.0, 60.0]));
    }

    #[test]
    fn test_pearson_undefined() {
        assert_eq!(pearson(&[], &[]), None);
        assert_eq!(pearson(&[1.0], &[1.0]), None);
        assert_eq!(pearson(&[1.0, 2.0], &[1.0]), None);
    }
}
