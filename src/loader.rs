//! Upload loader: acceptance checks and the asynchronous file read

use crate::config::{AppConfig, UploadConfig};
use crate::error::{AnalysisError, Result};
use std::path::Path;
use tracing::{info, warn};

/// Validates uploads against the configured limits before reading them
#[derive(Debug, Clone)]
pub struct UploadLoader {
    max_bytes: u64,
    allowed_extension: String,
}

impl UploadLoader {
    /// Create a loader from upload settings
    pub fn new(upload: &UploadConfig) -> Self {
        Self {
            max_bytes: upload.max_upload_bytes,
            allowed_extension: upload.allowed_extension.trim_start_matches('.').to_lowercase(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.upload)
    }

    /// Reject files whose name does not carry the allowed extension
    pub fn check_extension(&self, path: &Path) -> Result<()> {
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.allowed_extension));

        if matches {
            Ok(())
        } else {
            Err(AnalysisError::UnsupportedFile {
                file: path.display().to_string(),
                expected: self.allowed_extension.clone(),
            })
        }
    }

    /// Reject sizes above the limit
    pub fn check_size(&self, size: u64) -> Result<()> {
        if size > self.max_bytes {
            Err(AnalysisError::TooLarge {
                size,
                limit: self.max_bytes,
            })
        } else {
            Ok(())
        }
    }

    /// Validate and read an upload. Extension and size are checked from the
    /// name and metadata, so rejected files are never read.
    pub async fn load<P: AsRef<Path>>(&self, path: P) -> Result<String> {
        let path = path.as_ref();
        self.check_extension(path)?;

        let size = tokio::fs::metadata(path).await?.len();
        self.check_size(size)?;

        let bytes = tokio::fs::read(path).await?;
        // The file may have grown since the metadata call
        self.check_size(bytes.len() as u64)?;

        let content = match String::from_utf8(bytes) {
            Ok(s) => s,
            Err(e) => {
                warn!(path = %path.display(), "Upload is not valid UTF-8, replacing invalid bytes");
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };

        info!(path = %path.display(), bytes = size, "Upload loaded");
        Ok(content)
    }
}

impl Default for UploadLoader {
    fn default() -> Self {
        Self::new(&UploadConfig::default())
    }
}
