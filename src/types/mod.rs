//! Type definitions for the analysis pipeline

pub mod outcome;
pub mod result;
pub mod table;

pub use outcome::{AnalysisMode, OutcomeRecord};
pub use result::{AnalysisResult, SampleTransaction};
pub use table::{CellValue, FeatureSet, NumericColumn, RawTable, Row};
