//! Per-row outcome resolution, labeled or simulated

use crate::config::AppConfig;
use crate::error::{AnalysisError, Result};
use crate::types::outcome::{AnalysisMode, OutcomeRecord};
use crate::types::table::{CellValue, RawTable};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

/// Confidence band for rows labeled fraudulent
pub const FRAUD_CONFIDENCE: (f64, f64) = (70.0, 100.0);
/// Confidence band for rows labeled genuine
pub const GENUINE_CONFIDENCE: (f64, f64) = (0.0, 30.0);

/// Resolves one [`OutcomeRecord`] per row.
///
/// In labeled mode the class column is the outcome and confidence is drawn
/// from a band matching it. In unlabeled mode the leading fraction of rows
/// is marked fraudulent and confidence is unconstrained. Every run starts a
/// fresh RNG from the configured seed, so identical input resolves
/// identically.
pub struct OutcomeResolver {
    seed: u64,
    fraud_fraction: f64,
    amount_column: String,
    require_amount: bool,
}

impl OutcomeResolver {
    /// Create a resolver from configuration
    pub fn new(config: &AppConfig) -> Self {
        Self {
            seed: config.simulation.seed,
            fraud_fraction: config.simulation.fraud_fraction,
            amount_column: config.analysis.amount_column.clone(),
            require_amount: config.analysis.require_amount,
        }
    }

    /// Resolve every row of `table` under `mode`
    pub fn resolve(&self, table: &RawTable, mode: &AnalysisMode) -> Result<Vec<OutcomeRecord>> {
        if self.require_amount && !table.has_column(&self.amount_column) {
            return Err(AnalysisError::MissingColumn(self.amount_column.clone()));
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let records = match mode {
            AnalysisMode::Labeled(column) => self.resolve_labeled(table, column, &mut rng)?,
            AnalysisMode::Unlabeled => self.resolve_simulated(table, &mut rng),
        };

        info!(
            mode = ?mode,
            rows = records.len(),
            fraudulent = records.iter().filter(|r| r.is_fraudulent).count(),
            "Outcomes resolved"
        );
        Ok(records)
    }

    fn resolve_labeled(
        &self,
        table: &RawTable,
        column: &str,
        rng: &mut StdRng,
    ) -> Result<Vec<OutcomeRecord>> {
        let col = table
            .column_index(column)
            .ok_or_else(|| AnalysisError::MissingColumn(column.to_string()))?;

        let records = table
            .rows()
            .iter()
            .map(|row| {
                let is_fraudulent = row.get(col).is_some_and(is_positive_label);
                let (low, high) = if is_fraudulent {
                    FRAUD_CONFIDENCE
                } else {
                    GENUINE_CONFIDENCE
                };
                OutcomeRecord::labeled(is_fraudulent, rng.gen_range(low..=high))
            })
            .collect();

        Ok(records)
    }

    fn resolve_simulated(&self, table: &RawTable, rng: &mut StdRng) -> Vec<OutcomeRecord> {
        let total = table.total_rows();
        let flagged = simulated_fraud_count(total, self.fraud_fraction);

        debug!(
            total,
            flagged,
            fraction = self.fraud_fraction,
            "No class column, simulating outcomes"
        );

        (0..total)
            .map(|i| OutcomeRecord::simulated(i < flagged, rng.gen_range(0.0..=100.0)))
            .collect()
    }
}

impl Default for OutcomeResolver {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}

/// `floor(total * fraction)`, the number of leading rows flagged in simulation
pub fn simulated_fraud_count(total: usize, fraction: f64) -> usize {
    ((total as f64 * fraction).floor() as usize).min(total)
}

fn is_positive_label(cell: &CellValue) -> bool {
    match cell {
        CellValue::Number(n) => *n == 1.0,
        CellValue::Text(s) => s == "1",
    }
}
