use std::sync::Arc;

use dashmap::DashMap;

use crate::{AppConfig, CompilerId};

pub type SharedAppConfigStore = Arc<AppConfigStore>;

/// App configs keyed by the compiler that discovered them.
///
/// One store can be shared by several compilers in the same process, e.g. a build emitting for
/// multiple targets at once. Every compiler only ever reads and writes its own entry.
#[derive(Debug, Default)]
pub struct AppConfigStore {
  configs: DashMap<CompilerId, Arc<AppConfig>>,
}

impl AppConfigStore {
  /// Stores the app config seen by `compiler_id`'s current pass, returning the previous pass's one.
  pub fn insert(&self, compiler_id: CompilerId, app_config: AppConfig) -> Option<Arc<AppConfig>> {
    self.configs.insert(compiler_id, Arc::new(app_config))
  }

  pub fn get(&self, compiler_id: CompilerId) -> Option<Arc<AppConfig>> {
    self.configs.get(&compiler_id).map(|entry| Arc::clone(entry.value()))
  }

  pub fn remove(&self, compiler_id: CompilerId) -> Option<Arc<AppConfig>> {
    self.configs.remove(&compiler_id).map(|(_, app_config)| app_config)
  }

  pub fn len(&self) -> usize {
    self.configs.len()
  }

  pub fn is_empty(&self) -> bool {
    self.configs.is_empty()
  }
}

#[test]
fn test_store_is_keyed_by_compiler() {
  let store = AppConfigStore::default();
  let first = CompilerId::next();
  let second = CompilerId::next();

  assert!(store.insert(first, AppConfig { pages: vec!["a".into()], subpackages: None }).is_none());
  assert!(store.get(second).is_none());

  let previous = store.insert(first, AppConfig { pages: vec!["b".into()], subpackages: None });
  assert_eq!(previous.unwrap().pages, vec!["a".to_string()]);
  assert_eq!(store.get(first).unwrap().pages, vec!["b".to_string()]);
  assert_eq!(store.len(), 1);

  store.remove(first);
  assert!(store.is_empty());
}
