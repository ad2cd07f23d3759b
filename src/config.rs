use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::LayerKey;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Where the error message goes when a run fails
    pub error_file: Option<PathBuf>,
    pub fields: FieldConfig,
}

/// Identifying attribute read from the matched feature of each layer
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FieldConfig {
    pub zip: String,
    pub lepc: String,
    pub county: String,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            zip: LayerKey::Zip.default_name_field().to_string(),
            lepc: LayerKey::Lepc.default_name_field().to_string(),
            county: LayerKey::County.default_name_field().to_string(),
        }
    }
}

impl FieldConfig {
    pub fn get(&self, layer: LayerKey) -> &str {
        match layer {
            LayerKey::Zip => &self.zip,
            LayerKey::Lepc => &self.lepc,
            LayerKey::County => &self.county,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_census_fields() {
        let config = Config::default();
        assert_eq!(config.fields.get(LayerKey::Zip), "ZCTA5CE10");
        assert_eq!(config.fields.get(LayerKey::Lepc), "NAME");
        assert_eq!(config.fields.get(LayerKey::County), "NAME");
        assert!(config.error_file.is_none());
    }

    #[test]
    fn test_partial_override() {
        let config: Config = toml::from_str(
            r#"
            error_file = "/tmp/locate.err"

            [fields]
            zip = "ZCTA5CE20"
            "#,
        )
        .unwrap();

        assert_eq!(config.error_file, Some(PathBuf::from("/tmp/locate.err")));
        assert_eq!(config.fields.get(LayerKey::Zip), "ZCTA5CE20");
        assert_eq!(config.fields.get(LayerKey::County), "NAME");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("locate.toml");
        fs::write(&path, "[fields]\nlepc = \"LEPC_NAME\"\n").unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.fields.lepc, "LEPC_NAME");
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(toml::from_str::<Config>("output = \"x\"").is_err());
    }
}
