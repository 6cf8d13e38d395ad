use super::{ConfigError, LoggerConfig, TransportConfig};
use crate::domain::record::RESERVED_KEYS;
use std::collections::HashSet;

impl LoggerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Default metadata must not shadow the record's own keys
        if let Some(key) = self
            .default_meta
            .keys()
            .find(|key| RESERVED_KEYS.contains(&key.as_str()))
        {
            return Err(ConfigError::InvalidConfig(format!(
                "default_meta key '{key}' is reserved"
            )));
        }

        let mut seen_paths = HashSet::new();
        for transport in &self.transports {
            let TransportConfig::File { path, .. } = transport else {
                continue;
            };

            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfig(
                    "File transport path must not be empty".to_string(),
                ));
            }

            // Two handles on one file would interleave partial lines
            if !seen_paths.insert(path.clone()) {
                return Err(ConfigError::InvalidConfig(format!(
                    "File transport path '{}' is configured more than once",
                    path.display()
                )));
            }
        }

        Ok(())
    }
}
