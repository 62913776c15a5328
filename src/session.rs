//! Pipeline orchestration and the last-known-good session state

use crate::analysis::{
    compute_correlations, compute_stats, CorrelationOptions, OutcomeAggregator, OutcomeResolver,
};
use crate::assembler::{AssemblyInput, ResultAssembler};
use crate::charts::ChartSet;
use crate::config::AppConfig;
use crate::error::Result;
use crate::feature_extractor::FeatureExtractor;
use crate::loader::UploadLoader;
use crate::metrics;
use crate::parser::parse_table;
use crate::types::result::AnalysisResult;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

/// Result and chart data of one successful run
#[derive(Debug, Clone)]
pub struct AnalysisOutput {
    pub result: AnalysisResult,
    pub charts: ChartSet,
}

/// Runs the full pipeline for one upload. Holds only configuration, so
/// every run starts from fresh state.
pub struct Analyzer {
    loader: UploadLoader,
    extractor: FeatureExtractor,
    resolver: OutcomeResolver,
    aggregator: OutcomeAggregator,
    assembler: ResultAssembler,
    correlation: CorrelationOptions,
    amount_column: String,
    time_column: String,
}

impl Analyzer {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            loader: UploadLoader::from_config(config),
            extractor: FeatureExtractor::from_config(config),
            resolver: OutcomeResolver::new(config),
            aggregator: OutcomeAggregator::from_config(config),
            assembler: ResultAssembler::new(config),
            correlation: CorrelationOptions {
                seed: config.simulation.seed,
                placeholder: config.correlation.placeholder,
            },
            amount_column: config.analysis.amount_column.clone(),
            time_column: config.analysis.time_column.clone(),
        }
    }

    /// Analyze in-memory file content
    pub fn analyze_text(&self, content: &str) -> Result<AnalysisOutput> {
        let start = Instant::now();
        self.loader.check_size(content.len() as u64)?;

        let table = parse_table(content)?;
        let mode = self.extractor.detect_mode(&table);
        let outcomes = self.resolver.resolve(&table, &mode)?;

        let amount_stats = FeatureExtractor::numeric_column(&table, &self.amount_column)
            .map(|column| compute_stats(&column.values));
        let features = self.extractor.extract(&table);
        let correlations = compute_correlations(&features, &self.correlation);
        let summary = self.aggregator.aggregate(&outcomes, &mode);

        metrics::print_summary(
            summary.total,
            summary.genuine_count,
            summary.fraudulent_count,
            &summary.confusion,
            &summary.metrics,
        );

        let result = self.assembler.assemble(AssemblyInput {
            table: &table,
            mode,
            outcomes: &outcomes,
            summary,
            correlations,
            amount_stats,
        });
        let charts = ChartSet::build(
            &table,
            &outcomes,
            &result,
            &self.amount_column,
            &self.time_column,
        );

        info!(
            analysis_id = %result.analysis_id,
            rows = result.total_transactions,
            features = result.correlations.len(),
            elapsed_us = start.elapsed().as_micros(),
            "Analysis complete"
        );

        Ok(AnalysisOutput { result, charts })
    }

    /// Validate, read and analyze a file
    pub async fn analyze_file<P: AsRef<Path>>(&self, path: P) -> Result<AnalysisOutput> {
        let content = self.loader.load(path).await?;
        self.analyze_text(&content)
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}

/// Owns the last successful output.
///
/// A run replaces the output wholesale only when it succeeds completely;
/// a failed run leaves the previous output in place. Taking `&mut self`
/// keeps runs on one session strictly sequential.
pub struct AnalysisSession {
    analyzer: Analyzer,
    current: Option<AnalysisOutput>,
}

impl AnalysisSession {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            analyzer: Analyzer::new(config),
            current: None,
        }
    }

    /// Analyze text and, on success, make it the current output
    pub fn submit_text(&mut self, content: &str) -> Result<&AnalysisOutput> {
        let output = self.analyzer.analyze_text(content);
        self.commit(output)
    }

    /// Analyze a file and, on success, make it the current output
    pub async fn submit_file<P: AsRef<Path>>(&mut self, path: P) -> Result<&AnalysisOutput> {
        let output = self.analyzer.analyze_file(path).await;
        self.commit(output)
    }

    /// Last-known-good output, if any run has succeeded
    pub fn current(&self) -> Option<&AnalysisOutput> {
        self.current.as_ref()
    }

    /// Release the current output, handing it to the caller
    pub fn take(&mut self) -> Option<AnalysisOutput> {
        self.current.take()
    }

    fn commit(&mut self, output: Result<AnalysisOutput>) -> Result<&AnalysisOutput> {
        match output {
            Ok(output) => Ok(&*self.current.insert(output)),
            Err(e) => {
                warn!(
                    kind = ?e.kind(),
                    error = %e,
                    kept_previous = self.current.is_some(),
                    "Analysis failed"
                );
                Err(e)
            }
        }
    }
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}
