//! Fraud Insights Library
//!
//! Tabular fraud analysis for uploaded transaction files: parsing,
//! descriptive statistics, feature correlations, outcome resolution and
//! classification metrics, assembled into one result per upload.

pub mod analysis;
pub mod assembler;
pub mod charts;
pub mod config;
pub mod error;
pub mod feature_extractor;
pub mod loader;
pub mod metrics;
pub mod parser;
pub mod session;
pub mod types;

pub use config::AppConfig;
pub use error::{AnalysisError, ErrorKind};
pub use feature_extractor::FeatureExtractor;
pub use parser::parse_table;
pub use session::{AnalysisOutput, AnalysisSession, Analyzer};
pub use types::{result::AnalysisResult, table::RawTable};
