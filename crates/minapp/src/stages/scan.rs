use minapp_common::{AppConfigStore, CompilerId, EntryPoint};
use minapp_error::BuildResult;
use rustc_hash::FxHashSet;
use tracing::trace;

use crate::types::{scan_input::ScanInput, IndexModules};

pub struct ScanStageOutput {
  pub modules: IndexModules,
  pub entries: Vec<EntryPoint>,
}

pub struct ScanStage<'a> {
  compiler_id: CompilerId,
  app_configs: &'a AppConfigStore,
}

impl<'a> ScanStage<'a> {
  pub fn new(compiler_id: CompilerId, app_configs: &'a AppConfigStore) -> Self {
    Self { compiler_id, app_configs }
  }

  /// Checks the module graph and publishes the app config of this pass, so the `compile` hook can
  /// find it.
  pub fn scan(&self, input: ScanInput) -> BuildResult<ScanStageOutput> {
    let ScanInput { app_config, modules, entries } = input;

    if entries.is_empty() {
      return Err(anyhow::anyhow!("You must supply at least one entry to minapp").into());
    }

    let mut errors = vec![];

    for (idx, module) in modules.iter_enumerated() {
      if module.idx != idx {
        errors.push(anyhow::anyhow!(
          "Module {:?} is stored at {idx:?} but claims to be {:?}",
          module.id,
          module.idx
        ));
      }
      for dependency in &module.dependencies {
        if modules.get(*dependency).is_none() {
          errors.push(anyhow::anyhow!(
            "Module {:?} depends on {dependency:?} which is not part of the module graph",
            module.id
          ));
        }
      }
    }

    let mut names = FxHashSet::default();
    for entry in &entries {
      if modules.get(entry.idx).is_none() {
        errors.push(anyhow::anyhow!("Entry {:?} points to a missing module", entry.name));
      }
      if !names.insert(&entry.name) {
        errors.push(anyhow::anyhow!("Entry {:?} is declared more than once", entry.name));
      }
    }

    if !errors.is_empty() {
      return Err(errors.into());
    }

    if let Some(app_config) = app_config {
      trace!(compiler = %self.compiler_id, pages = app_config.pages.len(), "app config updated");
      self.app_configs.insert(self.compiler_id, app_config);
    }

    Ok(ScanStageOutput { modules, entries })
  }
}
