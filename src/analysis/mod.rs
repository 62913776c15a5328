//! Analysis stages: statistics, correlations, outcome resolution, aggregation

pub mod aggregator;
pub mod correlation;
pub mod resolver;
pub mod stats;

pub use aggregator::{OutcomeAggregator, OutcomeSummary};
pub use correlation::{compute_correlations, CorrelationMatrix, CorrelationOptions};
pub use resolver::OutcomeResolver;
pub use stats::{compute_stats, ColumnStats};
