pub mod app_config_store;
pub mod session_context;
pub mod subpackages_info;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// The application manifest (`app.json`) as far as bundling is concerned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AppConfig {
  #[serde(default)]
  pub pages: Vec<String>,
  #[serde(default, alias = "subPackages", skip_serializing_if = "Option::is_none")]
  pub subpackages: Option<Vec<SubpackageConfig>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SubpackageConfig {
  /// Directory of the subpackage. Entries without a root are not real subpackages.
  #[serde(default)]
  pub root: Option<String>,
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default)]
  pub pages: Vec<String>,
  #[serde(default)]
  pub independent: bool,
}

impl AppConfig {
  pub fn from_json(source: &str) -> anyhow::Result<Self> {
    serde_json::from_str(source).context("Failed to parse app config")
  }
}

#[test]
fn test_parse_app_config() {
  let config = AppConfig::from_json(
    r#"{
      "pages": ["pages/index/index"],
      "subPackages": [
        { "root": "packageA", "pages": ["pages/cat"] },
        { "root": "packageB", "name": "pack2", "pages": ["pages/apple"], "independent": true },
        { "pages": ["orphan"] }
      ]
    }"#,
  )
  .unwrap();

  assert_eq!(config.pages, vec!["pages/index/index".to_string()]);
  let subpackages = config.subpackages.unwrap();
  assert_eq!(subpackages.len(), 3);
  assert_eq!(subpackages[0].root.as_deref(), Some("packageA"));
  assert!(!subpackages[0].independent);
  assert_eq!(subpackages[1].name.as_deref(), Some("pack2"));
  assert!(subpackages[1].independent);
  assert_eq!(subpackages[2].root, None);
}

#[test]
fn test_parse_app_config_without_subpackages() {
  let config = AppConfig::from_json(r#"{ "pages": [] }"#).unwrap();
  assert_eq!(config.subpackages, None);
  assert!(AppConfig::from_json("[]").is_err());
}
