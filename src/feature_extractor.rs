//! Schema detection and feature extraction from parsed tables.
//!
//! Turns the loosely typed [`RawTable`] into the typed inputs of the
//! analysis stages: the [`AnalysisMode`] of the run and the numeric
//! columns used for statistics and correlations.

use crate::config::AppConfig;
use crate::types::outcome::AnalysisMode;
use crate::types::table::{CellValue, FeatureSet, NumericColumn, RawTable};
use tracing::debug;

/// Extracts typed columns from a table according to the configured schema.
pub struct FeatureExtractor {
    class_column: String,
    features: Vec<String>,
    max_features: usize,
}

impl FeatureExtractor {
    /// Create an extractor from explicit schema settings.
    pub fn new(class_column: impl Into<String>, features: Vec<String>, max_features: usize) -> Self {
        Self {
            class_column: class_column.into(),
            features,
            max_features,
        }
    }

    /// Create an extractor from application configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.analysis.class_column.clone(),
            config.correlation.features.clone(),
            config.correlation.max_features,
        )
    }

    /// Decide once per run whether ground truth is available.
    pub fn detect_mode(&self, table: &RawTable) -> AnalysisMode {
        if table.has_column(&self.class_column) {
            AnalysisMode::Labeled(self.class_column.clone())
        } else {
            AnalysisMode::Unlabeled
        }
    }

    /// Numeric values of a column in source order, or `None` if the column
    /// is not in the header. Text and empty cells are dropped; each value
    /// keeps the index of its source row.
    pub fn numeric_column(table: &RawTable, name: &str) -> Option<NumericColumn> {
        let col = table.column_index(name)?;
        let (rows, values): (Vec<usize>, Vec<f64>) = table
            .rows()
            .iter()
            .enumerate()
            .filter_map(|(i, row)| row.get(col).and_then(CellValue::as_f64).map(|v| (i, v)))
            .unzip();
        Some(NumericColumn::with_rows(name, rows, values))
    }

    /// Extract the feature set used for correlation analysis.
    ///
    /// Configured feature names present in the header are used in configured
    /// order. If none are present, every fully numeric column except the class
    /// column is used instead. Both paths are capped at `max_features`.
    pub fn extract(&self, table: &RawTable) -> FeatureSet {
        let mut names: Vec<&str> = self
            .features
            .iter()
            .map(String::as_str)
            .filter(|name| table.has_column(name))
            .collect();

        if names.is_empty() {
            names = table
                .headers()
                .iter()
                .map(String::as_str)
                .filter(|name| *name != self.class_column && is_numeric_column(table, name))
                .collect();
            debug!(
                candidates = names.len(),
                "No configured features present, using numeric columns"
            );
        }

        names.truncate(self.max_features);

        let columns: Vec<NumericColumn> = names
            .into_iter()
            .filter_map(|name| Self::numeric_column(table, name))
            .collect();

        debug!(features = columns.len(), "Feature set extracted");
        FeatureSet::new(columns)
    }

}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

/// A column is numeric when it holds at least one number and every
/// non-empty cell is a number.
fn is_numeric_column(table: &RawTable, name: &str) -> bool {
    let mut any = false;
    for cell in table.column_cells(name) {
        if cell.is_number() {
            any = true;
        } else if !cell.is_empty() {
            return false;
        }
    }
    any
}
