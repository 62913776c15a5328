//! Result assembly: composes stage outputs into one [`AnalysisResult`]

use crate::analysis::aggregator::OutcomeSummary;
use crate::analysis::correlation::CorrelationMatrix;
use crate::analysis::stats::ColumnStats;
use crate::config::AppConfig;
use crate::types::outcome::{AnalysisMode, OutcomeRecord};
use crate::types::result::{AnalysisResult, SampleTransaction};
use crate::types::table::{CellValue, RawTable};
use chrono::NaiveTime;
use tracing::debug;
use uuid::Uuid;

const SECONDS_PER_DAY: u64 = 86_400;

/// Everything the assembler needs from the upstream stages
pub struct AssemblyInput<'a> {
    pub table: &'a RawTable,
    pub mode: AnalysisMode,
    pub outcomes: &'a [OutcomeRecord],
    pub summary: OutcomeSummary,
    pub correlations: CorrelationMatrix,
    pub amount_stats: Option<ColumnStats>,
}

/// Composes stage outputs; performs no numeric derivation of its own
pub struct ResultAssembler {
    sample_size: usize,
    amount_column: String,
    time_column: String,
}

impl ResultAssembler {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            sample_size: config.analysis.sample_size,
            amount_column: config.analysis.amount_column.clone(),
            time_column: config.analysis.time_column.clone(),
        }
    }

    /// Build the final result
    pub fn assemble(&self, input: AssemblyInput<'_>) -> AnalysisResult {
        let sample_transactions = self.sample(input.table, input.outcomes);
        let analysis_id = Uuid::new_v4();

        debug!(
            analysis_id = %analysis_id,
            samples = sample_transactions.len(),
            "Result assembled"
        );

        let summary = input.summary;
        AnalysisResult {
            analysis_id,
            mode: input.mode,
            total_transactions: summary.total,
            genuine_count: summary.genuine_count,
            fraudulent_count: summary.fraudulent_count,
            genuine_percent: summary.genuine_percent,
            fraud_percent: summary.fraud_percent,
            risk_score: summary.risk_score,
            metrics: summary.metrics,
            confusion_matrix: summary.confusion,
            metrics_approximated: summary.approximated,
            correlations: input.correlations,
            amount_stats: input.amount_stats,
            sample_transactions,
        }
    }

    /// Leading display rows, in source order
    fn sample(&self, table: &RawTable, outcomes: &[OutcomeRecord]) -> Vec<SampleTransaction> {
        outcomes
            .iter()
            .take(self.sample_size)
            .enumerate()
            .map(|(i, outcome)| SampleTransaction {
                time: format_time(table.cell(i, &self.time_column)),
                amount: format_amount(table.cell(i, &self.amount_column)),
                is_fraudulent: outcome.is_fraudulent,
                confidence: format!("{:.2}", outcome.confidence),
            })
            .collect()
    }
}

impl Default for ResultAssembler {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}

/// Render a seconds offset as `HH:MM:SS`, with a `day N, ` prefix after the
/// first day. Text cells are shown as-is.
pub fn format_time(cell: Option<&CellValue>) -> String {
    match cell {
        Some(CellValue::Number(secs)) if *secs >= 0.0 => {
            let secs = secs.trunc() as u64;
            let day = secs / SECONDS_PER_DAY;
            let clock = NaiveTime::from_num_seconds_from_midnight_opt(
                (secs % SECONDS_PER_DAY) as u32,
                0,
            )
            .map(|t| t.format("%H:%M:%S").to_string())
            .unwrap_or_default();
            if day == 0 {
                clock
            } else {
                format!("day {}, {}", day + 1, clock)
            }
        }
        Some(CellValue::Number(secs)) => format!("{}s", secs),
        Some(CellValue::Text(s)) if !s.is_empty() => s.clone(),
        _ => "N/A".to_string(),
    }
}

/// Two-decimal amount, or `N/A` for missing and non-numeric cells
pub fn format_amount(cell: Option<&CellValue>) -> String {
    match cell.and_then(CellValue::as_f64) {
        Some(amount) => format!("{:.2}", amount),
        None => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_table;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(Some(&CellValue::Number(0.0))), "00:00:00");
        assert_eq!(format_time(Some(&CellValue::Number(3661.7))), "01:01:01");
        assert_eq!(format_time(Some(&CellValue::Number(90_000.0))), "day 2, 01:00:00");
        assert_eq!(format_time(Some(&CellValue::Text("noon".into()))), "noon");
        assert_eq!(format_time(Some(&CellValue::empty())), "N/A");
        assert_eq!(format_time(None), "N/A");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(Some(&CellValue::Number(149.626))), "149.63");
        assert_eq!(format_amount(Some(&CellValue::Number(2.0))), "2.00");
        assert_eq!(format_amount(Some(&CellValue::Text("x".into()))), "N/A");
        assert_eq!(format_amount(None), "N/A");
    }

    #[test]
    fn test_sample_is_capped_and_ordered() {
        let body: String = (0..15).map(|i| format!("{},{}\n", i * 60, i)).collect();
        let table = parse_table(&format!("Time,Amount\n{}", body)).unwrap();
        let outcomes: Vec<OutcomeRecord> = (0..15)
            .map(|i| OutcomeRecord::simulated(i == 0, 42.0))
            .collect();

        let result = ResultAssembler::default().assemble(AssemblyInput {
            table: &table,
            mode: AnalysisMode::Unlabeled,
            outcomes: &outcomes,
            summary: OutcomeSummary::default(),
            correlations: CorrelationMatrix::default(),
            amount_stats: None,
        });

        let samples = &result.sample_transactions;
        assert_eq!(samples.len(), 10);
        assert_eq!(samples[0].time, "00:00:00");
        assert_eq!(samples[1].time, "00:01:00");
        assert_eq!(samples[9].amount, "9.00");
        assert!(samples[0].is_fraudulent);
        assert_eq!(samples[3].confidence, "42.00");
    }
}
