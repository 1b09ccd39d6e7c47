use arcstr::ArcStr;
use minapp_common::{AppConfig, EntryPoint, Module, ModuleIdx};

use super::IndexModules;

/// An already resolved module graph plus the app config discovered alongside it.
///
/// Parsing sources and resolving imports belong to the host tool chain, so a build starts from
/// this.
#[derive(Debug, Default)]
pub struct ScanInput {
  /// `None` keeps whatever the store already holds for the compiler.
  pub app_config: Option<AppConfig>,
  pub modules: IndexModules,
  pub entries: Vec<EntryPoint>,
}

impl ScanInput {
  pub fn new(app_config: Option<AppConfig>) -> Self {
    Self { app_config, ..Self::default() }
  }

  /// Adds a module and returns its index.
  pub fn add_module(
    &mut self,
    id: impl Into<ArcStr>,
    size: usize,
    dependencies: Vec<ModuleIdx>,
  ) -> ModuleIdx {
    let idx = self.modules.next_idx();
    self.modules.push(Module { idx, id: id.into(), size, dependencies });
    idx
  }

  pub fn add_entry(&mut self, name: impl Into<ArcStr>, idx: ModuleIdx) {
    self.entries.push(EntryPoint { name: name.into(), idx });
  }
}
