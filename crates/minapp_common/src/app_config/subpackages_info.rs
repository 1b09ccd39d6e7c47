use arcstr::ArcStr;
use minapp_error::MinappError;
use minapp_utils::path_ext::belongs_to;

use crate::{AppConfig, COMMONS_CACHE_GROUP};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subpackage {
  /// Never empty.
  pub root: ArcStr,
  pub independent: bool,
}

/// The subpackage topology of an app config.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubpackagesInfo {
  /// Every subpackage with a root, in declaration order.
  pub subpackages: Vec<Subpackage>,
  /// The independent ones among `subpackages`, in the same order.
  pub independents: Vec<Subpackage>,
}

impl SubpackagesInfo {
  pub fn from_app_config(app_config: &AppConfig) -> Self {
    let subpackages = app_config
      .subpackages
      .iter()
      .flatten()
      .filter_map(|config| {
        let root = normalize_root(config.root.as_deref()?);
        (!root.is_empty())
          .then(|| Subpackage { root: root.into(), independent: config.independent })
      })
      .collect::<Vec<_>>();

    let independents = subpackages.iter().filter(|item| item.independent).cloned().collect();

    Self { subpackages, independents }
  }

  /// Roots must not contain one another, otherwise a module would belong to two subpackages.
  /// A root named like the commons group would replace that group's key.
  pub fn validate(&self) -> Result<(), MinappError> {
    for (idx, first) in self.subpackages.iter().enumerate() {
      if first.root == COMMONS_CACHE_GROUP {
        return Err(MinappError::ReservedSubpackageRoot { root: first.root.to_string() });
      }
      for second in &self.subpackages[idx + 1..] {
        if belongs_to(&first.root, &second.root) || belongs_to(&second.root, &first.root) {
          return Err(MinappError::OverlappingSubpackages {
            first: first.root.to_string(),
            second: second.root.to_string(),
          });
        }
      }
    }
    Ok(())
  }

  pub fn independent_roots(&self) -> Vec<ArcStr> {
    self.independents.iter().map(|item| item.root.clone()).collect()
  }
}

pub fn get_subpackages_info(app_config: &AppConfig) -> SubpackagesInfo {
  SubpackagesInfo::from_app_config(app_config)
}

fn normalize_root(root: &str) -> &str {
  root.trim_start_matches("./").trim_matches('/')
}

#[cfg(test)]
mod tests {
  use minapp_error::MinappError;

  use super::{get_subpackages_info, SubpackagesInfo};
  use crate::{AppConfig, SubpackageConfig};

  fn subpackage(root: Option<&str>, independent: bool) -> SubpackageConfig {
    SubpackageConfig { root: root.map(ToString::to_string), independent, ..Default::default() }
  }

  fn app_config(subpackages: Vec<SubpackageConfig>) -> AppConfig {
    AppConfig { pages: vec![], subpackages: Some(subpackages) }
  }

  #[test]
  fn no_subpackages() {
    let info = get_subpackages_info(&AppConfig::default());
    assert!(info.subpackages.is_empty());
    assert!(info.independents.is_empty());
  }

  #[test]
  fn independents_keep_declaration_order() {
    let info = get_subpackages_info(&app_config(vec![
      subpackage(Some("c"), true),
      subpackage(Some("b"), false),
      subpackage(Some("a"), true),
    ]));
    let roots = info.subpackages.iter().map(|item| item.root.as_str()).collect::<Vec<_>>();
    assert_eq!(roots, ["c", "b", "a"]);
    let independents = info.independents.iter().map(|item| item.root.as_str()).collect::<Vec<_>>();
    assert_eq!(independents, ["c", "a"]);
    assert_eq!(info.independent_roots(), vec![arcstr::literal!("c"), arcstr::literal!("a")]);
  }

  #[test]
  fn entries_without_root_are_skipped() {
    let info = get_subpackages_info(&app_config(vec![
      subpackage(None, true),
      subpackage(Some(""), true),
      subpackage(Some("./pkg/"), false),
    ]));
    assert_eq!(info.subpackages.len(), 1);
    assert_eq!(info.subpackages[0].root, "pkg");
    assert!(info.independents.is_empty());
  }

  #[test]
  fn validate_rejects_nested_and_duplicated_roots() {
    let nested = SubpackagesInfo::from_app_config(&app_config(vec![
      subpackage(Some("sub"), false),
      subpackage(Some("sub/inner"), true),
    ]));
    assert!(matches!(
      nested.validate(),
      Err(MinappError::OverlappingSubpackages { first, second })
        if first == "sub" && second == "sub/inner"
    ));

    let duplicated = SubpackagesInfo::from_app_config(&app_config(vec![
      subpackage(Some("sub"), false),
      subpackage(Some("sub"), false),
    ]));
    assert!(duplicated.validate().is_err());

    let siblings = SubpackagesInfo::from_app_config(&app_config(vec![
      subpackage(Some("sub"), false),
      subpackage(Some("sub2"), true),
    ]));
    assert!(siblings.validate().is_ok());
  }

  #[test]
  fn validate_rejects_the_commons_root() {
    let info = SubpackagesInfo::from_app_config(&app_config(vec![
      subpackage(Some("a"), true),
      subpackage(Some("./commons/"), false),
    ]));
    assert!(matches!(
      info.validate(),
      Err(MinappError::ReservedSubpackageRoot { root }) if root == "commons"
    ));

    let nested = SubpackagesInfo::from_app_config(&app_config(vec![
      subpackage(Some("commons/pages"), false),
      subpackage(Some("commons2"), true),
    ]));
    assert!(nested.validate().is_ok());
  }
}
