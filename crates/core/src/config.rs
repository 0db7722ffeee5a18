use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Knobs for one metadata-extraction run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Reject classes in the unnamed package instead of giving them an
    /// empty package name.
    pub require_package: bool,
    /// Replay `RuntimeInvisibleAnnotations` as well as the visible ones.
    pub include_invisible_annotations: bool,
    /// Replay members flagged `ACC_SYNTHETIC`.
    pub include_synthetic_members: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            require_package: true,
            include_invisible_annotations: true,
            include_synthetic_members: true,
        }
    }
}

impl ExtractConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&content)?;
        tracing::debug!("Loaded extract config from {}: {:?}", path.display(), config);
        Ok(config)
    }
}
