use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::{fs::File, io::Read, path::Path, str::FromStr};

use crate::error::{Error, Result};

/// Name of the optional configuration file in the provider root directory.
pub const CONFIG_FILE_NAME: &str = "tfdocs.toml";

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Configuration for the provider being checked.
    pub provider: ProviderConfig,
    /// Configuration for the resource and data source content checks.
    pub contents: ContentsConfig,
    /// Configuration for the front matter checks.
    pub front_matter: FrontMatterConfig,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Config> {
        let mut buffer = String::new();
        File::open(path)
            .with_context(|| "Failed to open config file")?
            .read_to_string(&mut buffer)
            .with_context(|| "Failed to read config file")?;

        Config::from_str(&buffer)
    }

    /// Load `tfdocs.toml` from the provider root, or the defaults when there is none.
    pub fn discover(root: impl AsRef<Path>) -> Result<Config> {
        let path = root.as_ref().join(CONFIG_FILE_NAME);

        if !path.is_file() {
            log::debug!("No config file found at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        log::debug!("Loading config file {}", path.display());
        Config::load(&path).with_context(|| format!("error loading config ({})", path.display()))
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        toml::from_str(source).with_context(|| "Attempted to parse invalid configuration file")
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ProviderConfig {
    /// Provider name used to derive resource names, e.g. `aws` for `aws_instance`.
    pub name: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ContentsConfig {
    pub enable: bool,
    pub require_schema_ordering: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FrontMatterConfig {
    pub allowed_guide_subcategories: Vec<String>,
    pub allowed_resource_subcategories: Vec<String>,
    pub require_guide_subcategory: bool,
    pub require_resource_subcategory: bool,
}

#[cfg(test)]
mod test {
    use super::*;

    const COMPLEX_CONFIG: &str = r#"
[provider]
name = "test"

[contents]
enable = true
require-schema-ordering = true

[front-matter]
allowed-guide-subcategories = ["Guides"]
allowed-resource-subcategories = ["Compute", "Storage"]
require-resource-subcategory = true
"#;

    #[test]
    fn parses_empty_config() {
        let config = Config::from_str("").expect("should parse");

        assert_eq!(Config::default(), config);
    }

    #[test]
    fn parses_complex_config() {
        let config = Config::from_str(COMPLEX_CONFIG).expect("should parse");

        assert_eq!(Some(String::from("test")), config.provider.name);
        assert!(config.contents.enable);
        assert!(config.contents.require_schema_ordering);
        assert_eq!(
            vec![String::from("Guides")],
            config.front_matter.allowed_guide_subcategories
        );
        assert_eq!(2, config.front_matter.allowed_resource_subcategories.len());
        assert!(!config.front_matter.require_guide_subcategory);
        assert!(config.front_matter.require_resource_subcategory);
    }

    #[test]
    fn rejects_invalid_config() {
        assert!(Config::from_str("[contents]\nenable = \"yes\"\n").is_err());
    }

    #[test]
    fn missing_config_file_is_default() {
        let config = Config::discover("does/not/exist").expect("should load");

        assert_eq!(Config::default(), config);
    }
}
