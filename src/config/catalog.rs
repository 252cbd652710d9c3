//! Catalog seed configuration loaded from config.toml
//!
//! The file names the administrator who becomes the acting user at startup and
//! the categories and tags that should exist in a fresh catalog. Seeding is
//! idempotent: entries already present (matched by name) are left alone.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Administrator account used as the acting user when seeding
    pub admin: AdminConfig,
    /// Categories to seed
    #[serde(default)]
    pub categories: Vec<CategoryConfig>,
    /// Tags to seed
    #[serde(default)]
    pub tags: Vec<TagConfig>,
}

/// Administrator account
#[derive(Debug, Deserialize, Clone)]
pub struct AdminConfig {
    /// Display name
    pub name: String,
    /// Unique login
    pub login: String,
}

/// Configuration for a single category
#[derive(Debug, Deserialize, Clone)]
pub struct CategoryConfig {
    /// Category name
    pub name: String,
    /// Local part of the inbound address routing orders to this category
    #[serde(default)]
    pub alias: Option<String>,
}

/// Configuration for a single tag
#[derive(Debug, Deserialize, Clone)]
pub struct TagConfig {
    /// Tag name
    pub name: String,
    /// Color index; the tag default applies when absent
    #[serde(default)]
    pub color: Option<i32>,
}

/// Loads catalog configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path.as_ref().display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads catalog configuration from `NURSERY_CONFIG`, or ./config.toml when unset
pub fn load_default_config() -> Result<Config> {
    let path = std::env::var("NURSERY_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    load_config(path)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_catalog_config() {
        let toml_str = r#"
            [admin]
            name = "Nursery Admin"
            login = "admin"

            [[categories]]
            name = "Succulents"
            alias = "succulents"

            [[categories]]
            name = "Trees"

            [[tags]]
            name = "Shade"
            color = 3

            [[tags]]
            name = "Pet friendly"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.admin.login, "admin");
        assert_eq!(config.categories.len(), 2);
        assert_eq!(config.categories[0].alias.as_deref(), Some("succulents"));
        assert!(config.categories[1].alias.is_none());
        assert_eq!(config.tags[0].color, Some(3));
        assert!(config.tags[1].color.is_none());
    }

    #[test]
    fn test_missing_admin_is_rejected() {
        let result: std::result::Result<Config, _> =
            toml::from_str("[[tags]]\nname = \"Shade\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("/nonexistent/config.toml");
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
