//! Client configuration

use crate::error::{EthAppError, EthAppResult};
use eth_hw_apdu::constants::length::{APDU_MAX_PAYLOAD, DEFAULT_CHUNK_SIZE};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for [`EthApp`](crate::EthApp)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EthAppConfig {
    /// Maximum data bytes per frame for chunked commands
    pub chunk_size: usize,
}

impl Default for EthAppConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl EthAppConfig {
    /// Parse from TOML; missing keys take their defaults
    pub fn from_toml_str(source: &str) -> EthAppResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| EthAppError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    pub fn load(path: impl AsRef<Path>) -> EthAppResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| EthAppError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&source)
    }

    /// Check value ranges
    pub fn validate(&self) -> EthAppResult<()> {
        if self.chunk_size == 0 || self.chunk_size > APDU_MAX_PAYLOAD {
            return Err(EthAppError::Config(format!(
                "chunk_size must be between 1 and {}, got {}",
                APDU_MAX_PAYLOAD, self.chunk_size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_apply_to_missing_keys() {
        assert_eq!(EthAppConfig::from_toml_str("").unwrap(), EthAppConfig::default());
        assert_eq!(EthAppConfig::default().chunk_size, 150);
    }

    #[test]
    fn rejects_out_of_range_chunk_size() {
        assert!(matches!(
            EthAppConfig::from_toml_str("chunk_size = 0"),
            Err(EthAppError::Config(_))
        ));
        assert!(matches!(
            EthAppConfig::from_toml_str("chunk_size = 256"),
            Err(EthAppError::Config(_))
        ));
        assert!(EthAppConfig::from_toml_str("chunk_size = \"big\"").is_err());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "chunk_size = 64").unwrap();
        let config = EthAppConfig::load(file.path()).unwrap();
        assert_eq!(config.chunk_size, 64);
        assert!(EthAppConfig::load("/nonexistent/eth-hw.toml").is_err());
    }
}
