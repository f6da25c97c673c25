//! Wiki configuration.

use serde::{Deserialize, Serialize};

use crate::model::Iri;
use crate::{Error, Result};

/// Which store backs the wiki.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StoreConfig {
    /// In-memory (no persistence)
    Memory,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::Memory
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WikiConfig {
    /// Every topic lives below this IRI.
    pub root_uri: String,
    #[serde(default)]
    pub store: StoreConfig,
    /// Write the root resource into an empty store.
    #[serde(default = "default_create")]
    pub create: bool,
}

fn default_create() -> bool {
    true
}

impl WikiConfig {
    pub fn memory(root_uri: impl Into<String>) -> Self {
        Self { root_uri: root_uri.into(), store: StoreConfig::Memory, create: true }
    }

    /// Parse a configuration from JSON.
    ///
    /// ```json
    /// { "root_uri": "http://localhost:1234/", "store": { "type": "memory" } }
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let config: WikiConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The root must be an absolute IRI ending in `/` or `#`, so that
    /// appending a topic name yields an IRI below it.
    pub fn validate(&self) -> Result<()> {
        Iri::new(self.root_uri.as_str())
            .map_err(|e| Error::ConfigError(format!("root_uri: {e}")))?;
        if !self.root_uri.ends_with(['/', '#']) {
            return Err(Error::ConfigError(format!(
                "root_uri '{}' must end with '/' or '#'",
                self.root_uri
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_defaults() {
        let config = WikiConfig::from_json(r#"{ "root_uri": "http://localhost/" }"#).unwrap();
        assert_eq!(config, WikiConfig::memory("http://localhost/"));
    }

    #[test]
    fn test_from_json_explicit() {
        let config = WikiConfig::from_json(
            r#"{ "root_uri": "http://a.com/wiki#", "store": { "type": "memory" }, "create": false }"#,
        )
        .unwrap();
        assert!(!config.create);
        assert_eq!(config.store, StoreConfig::Memory);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = WikiConfig::memory("http://localhost/");
        assert_eq!(WikiConfig::from_json(&config.to_json().unwrap()).unwrap(), config);
    }

    #[test]
    fn test_invalid_root() {
        for root in ["localhost/", "http://localhost", "http://local host/"] {
            let err = WikiConfig::memory(root).validate().unwrap_err();
            assert!(matches!(err, Error::ConfigError(_)), "{root}");
        }
        assert!(matches!(WikiConfig::from_json("{"), Err(Error::Json(_))));
    }
}
