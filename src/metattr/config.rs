use crate::error::{MetaError, Result};
use crate::store::fs_backend::{default_prefix, FsBackend};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

/// Linux refuses attribute values above XATTR_SIZE_MAX.
pub const DEFAULT_MAX_VALUE_BYTES: usize = 64 * 1024;

/// Configuration for metattr, stored in `<config dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MetattrConfig {
    /// Largest encoded metadata value that will be written
    #[serde(default = "default_max_value_bytes")]
    pub max_value_bytes: usize,

    /// Namespace prefix for attribute names; platform default when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute_prefix: Option<String>,
}

fn default_max_value_bytes() -> usize {
    DEFAULT_MAX_VALUE_BYTES
}

impl Default for MetattrConfig {
    fn default() -> Self {
        Self {
            max_value_bytes: DEFAULT_MAX_VALUE_BYTES,
            attribute_prefix: None,
        }
    }
}

impl MetattrConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(MetaError::Io)?;
        let config: MetattrConfig =
            serde_json::from_str(&content).map_err(MetaError::Serialization)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        self.validate()?;
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(MetaError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(MetaError::Serialization)?;
        fs::write(config_path, content).map_err(MetaError::Io)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_value_bytes == 0 {
            return Err(MetaError::Config(
                "max_value_bytes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn attribute_prefix(&self) -> &str {
        self.attribute_prefix.as_deref().unwrap_or(default_prefix())
    }

    /// Production backend configured with this prefix.
    pub fn backend(&self) -> FsBackend {
        FsBackend::new().with_prefix(self.attribute_prefix())
    }
}
