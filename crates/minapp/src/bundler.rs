use std::sync::Arc;

use minapp_common::{AppConfigStore, BundlerOptions, CompilerId, SharedAppConfigStore};
use minapp_error::BuildResult;
use minapp_plugin::{
  CompileContext, PluginDriver, SharedPlugin, SharedPluginDriver, SplitChunksPlugin,
};
use tracing::debug;

use crate::{
  stages::{generate::GenerateStage, scan::ScanStage, split_chunks::SplitChunksStage},
  types::{bundle_output::BundleOutput, scan_input::ScanInput, SharedOptions},
  utils::normalize_options::normalize_options,
};

pub struct Bundler {
  pub closed: bool,
  pub(crate) compiler_id: CompilerId,
  pub(crate) options: SharedOptions,
  pub(crate) plugin_driver: SharedPluginDriver,
  pub(crate) app_configs: SharedAppConfigStore,
}

impl Bundler {
  pub fn new(options: BundlerOptions) -> Self {
    Self::with_plugins(options, vec![])
  }

  /// `plugins` run after the built-in split chunks plugin.
  pub fn with_plugins(options: BundlerOptions, plugins: Vec<SharedPlugin>) -> Self {
    let mut all_plugins: Vec<SharedPlugin> = vec![Arc::new(SplitChunksPlugin::new())];
    all_plugins.extend(plugins);

    Bundler {
      closed: false,
      compiler_id: CompilerId::next(),
      options: Arc::new(normalize_options(options)),
      plugin_driver: PluginDriver::new_shared(all_plugins),
      app_configs: Arc::new(AppConfigStore::default()),
    }
  }

  /// Shares `app_configs` with other bundlers, e.g. one per target of the same app.
  #[must_use]
  pub fn with_app_config_store(mut self, app_configs: SharedAppConfigStore) -> Self {
    self.app_configs = app_configs;
    self
  }

  pub fn compiler_id(&self) -> CompilerId {
    self.compiler_id
  }

  pub fn options(&self) -> &SharedOptions {
    &self.options
  }

  pub fn app_configs(&self) -> &SharedAppConfigStore {
    &self.app_configs
  }

  /// Runs one compile pass. Watch mode calls this again with the updated input.
  pub fn build(&mut self, input: ScanInput) -> BuildResult<BundleOutput> {
    if self.closed {
      return Err(
        anyhow::anyhow!("Bundle is already closed, no more calls to `build` are allowed").into(),
      );
    }

    let scan_output = ScanStage::new(self.compiler_id, &self.app_configs).scan(input)?;

    let ctx = CompileContext::new(self.compiler_id, &self.options, &self.app_configs);
    self.plugin_driver.compile(&ctx)?;

    let split_output = SplitChunksStage::new(&scan_output, &self.options).split()?;
    debug!(
      compiler = %self.compiler_id,
      chunks = split_output.chunk_graph.chunk_table.len(),
      "chunks split"
    );

    GenerateStage::new(&scan_output.modules, &self.options)
      .generate(&split_output.chunk_graph, split_output.warnings)
  }

  /// Forgets this compiler's app config. Other compilers sharing the store are not affected.
  pub fn close(&mut self) {
    if !self.closed {
      self.closed = true;
      self.app_configs.remove(self.compiler_id);
    }
  }
}
