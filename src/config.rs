//! Configuration management for the analysis pipeline

use anyhow::{Context, Result};
use config::{Config, File};
use serde::Deserialize;
use std::path::Path;

/// Interval used for correlation cells that cannot be computed from samples
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlaceholderRange {
    /// [-0.5, 0.9], the generic dashboard range
    #[default]
    Generic,
    /// [-1.0, 1.0], for heatmap-only display
    Heatmap,
}

impl PlaceholderRange {
    /// Inclusive (low, high) bounds of the interval
    pub fn bounds(&self) -> (f64, f64) {
        match self {
            PlaceholderRange::Generic => (-0.5, 0.9),
            PlaceholderRange::Heatmap => (-1.0, 1.0),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub correlation: CorrelationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Upload acceptance rules, checked before any parsing
#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    /// Maximum accepted file size in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,
    /// Accepted file extension, without the dot
    #[serde(default = "default_allowed_extension")]
    pub allowed_extension: String,
}

fn default_max_upload_bytes() -> u64 {
    10 * 1024 * 1024
}

fn default_allowed_extension() -> String {
    "csv".to_string()
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: default_max_upload_bytes(),
            allowed_extension: default_allowed_extension(),
        }
    }
}

/// Column names and result shaping
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Binary ground-truth column (1 = fraudulent)
    #[serde(default = "default_class_column")]
    pub class_column: String,
    /// Transaction amount column
    #[serde(default = "default_amount_column")]
    pub amount_column: String,
    /// Seconds-offset time column
    #[serde(default = "default_time_column")]
    pub time_column: String,
    /// Fail with a schema error when the amount column is absent
    #[serde(default = "default_require_amount")]
    pub require_amount: bool,
    /// Number of display rows in the result
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,
}

fn default_class_column() -> String {
    "Class".to_string()
}

fn default_amount_column() -> String {
    "Amount".to_string()
}

fn default_time_column() -> String {
    "Time".to_string()
}

fn default_require_amount() -> bool {
    true
}

fn default_sample_size() -> usize {
    10
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            class_column: default_class_column(),
            amount_column: default_amount_column(),
            time_column: default_time_column(),
            require_amount: default_require_amount(),
            sample_size: default_sample_size(),
        }
    }
}

/// Fallback simulation parameters, used when no class column is present
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    /// Seed for every random draw in a run
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Fraction of rows (taken from the top) marked fraudulent
    #[serde(default = "default_fraud_fraction")]
    pub fraud_fraction: f64,
    /// Recall assumed when approximating the confusion matrix
    #[serde(default = "default_assumed_recall")]
    pub assumed_recall: f64,
    /// Precision assumed when approximating the confusion matrix
    #[serde(default = "default_assumed_precision")]
    pub assumed_precision: f64,
}

fn default_seed() -> u64 {
    42
}

fn default_fraud_fraction() -> f64 {
    0.2
}

fn default_assumed_recall() -> f64 {
    0.85
}

fn default_assumed_precision() -> f64 {
    0.90
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            fraud_fraction: default_fraud_fraction(),
            assumed_recall: default_assumed_recall(),
            assumed_precision: default_assumed_precision(),
        }
    }
}

/// Correlation matrix settings
#[derive(Debug, Clone, Deserialize)]
pub struct CorrelationConfig {
    /// Preferred feature columns, in display order
    #[serde(default = "default_features")]
    pub features: Vec<String>,
    /// Upper bound on matrix dimension
    #[serde(default = "default_max_features")]
    pub max_features: usize,
    #[serde(default)]
    pub placeholder: PlaceholderRange,
}

fn default_features() -> Vec<String> {
    (1..=28).map(|i| format!("V{}", i)).collect()
}

fn default_max_features() -> usize {
    15
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            features: default_features(),
            max_features: default_max_features(),
            placeholder: PlaceholderRange::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (json, pretty)
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default location, falling back to defaults
    /// when the file does not exist
    pub fn load() -> Result<Self> {
        let path = Path::new("config/config.toml");
        if path.exists() {
            Self::load_from_path(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .context("Failed to build configuration")?;

        let config: Self = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the pipeline cannot honor
    pub fn validate(&self) -> Result<()> {
        let sim = &self.simulation;
        if !(0.0..=1.0).contains(&sim.fraud_fraction) {
            anyhow::bail!("simulation.fraud_fraction must be within [0, 1]");
        }
        if !(sim.assumed_recall > 0.0 && sim.assumed_recall <= 1.0) {
            anyhow::bail!("simulation.assumed_recall must be within (0, 1]");
        }
        if !(sim.assumed_precision > 0.0 && sim.assumed_precision <= 1.0) {
            anyhow::bail!("simulation.assumed_precision must be within (0, 1]");
        }
        if self.upload.max_upload_bytes == 0 {
            anyhow::bail!("upload.max_upload_bytes must be positive");
        }
        Ok(())
    }
}
