use std::sync::Arc;

use minapp_error::MinappError;

use crate::{AppConfig, AppConfigStore, CompilerId, SubpackagesInfo};

/// Everything a compile pass knows about the app once its config has been discovered.
///
/// The subpackage topology is derived once here and then handed to whoever needs it, instead of
/// each consumer looking the config up again.
#[derive(Debug)]
pub struct SessionContext {
  compiler_id: CompilerId,
  app_config: Arc<AppConfig>,
  subpackages_info: SubpackagesInfo,
}

impl SessionContext {
  pub fn new(compiler_id: CompilerId, app_config: Arc<AppConfig>) -> Self {
    let subpackages_info = SubpackagesInfo::from_app_config(&app_config);
    Self { compiler_id, app_config, subpackages_info }
  }

  /// Fails with [`MinappError::ManifestMissing`] when the store has nothing for `compiler_id`.
  pub fn from_store(store: &AppConfigStore, compiler_id: CompilerId) -> Result<Self, MinappError> {
    store
      .get(compiler_id)
      .map(|app_config| Self::new(compiler_id, app_config))
      .ok_or(MinappError::ManifestMissing { compiler_id: compiler_id.as_u32() })
  }

  pub fn compiler_id(&self) -> CompilerId {
    self.compiler_id
  }

  pub fn app_config(&self) -> &AppConfig {
    &self.app_config
  }

  pub fn subpackages_info(&self) -> &SubpackagesInfo {
    &self.subpackages_info
  }
}

#[test]
fn test_session_from_store() {
  use crate::SubpackageConfig;

  let store = AppConfigStore::default();
  let compiler_id = CompilerId::next();

  assert!(matches!(
    SessionContext::from_store(&store, compiler_id),
    Err(MinappError::ManifestMissing { compiler_id: id }) if id == compiler_id.as_u32()
  ));

  store.insert(
    compiler_id,
    AppConfig {
      pages: vec![],
      subpackages: Some(vec![SubpackageConfig {
        root: Some("a".into()),
        independent: true,
        ..Default::default()
      }]),
    },
  );
  let session = SessionContext::from_store(&store, compiler_id).unwrap();
  assert_eq!(session.compiler_id(), compiler_id);
  assert_eq!(session.subpackages_info().independents.len(), 1);
  assert_eq!(session.app_config().subpackages.as_ref().map(Vec::len), Some(1));
}
