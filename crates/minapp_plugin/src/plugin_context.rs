use minapp_common::{AppConfigStore, CompilerId, NormalizedBundlerOptions, SessionContext};
use minapp_error::MinappError;

/// What the `compile` hook sees of the running compiler.
#[derive(Debug, Clone, Copy)]
pub struct CompileContext<'a> {
  pub compiler_id: CompilerId,
  pub options: &'a NormalizedBundlerOptions,
  pub app_configs: &'a AppConfigStore,
}

impl<'a> CompileContext<'a> {
  pub fn new(
    compiler_id: CompilerId,
    options: &'a NormalizedBundlerOptions,
    app_configs: &'a AppConfigStore,
  ) -> Self {
    Self { compiler_id, options, app_configs }
  }

  /// The session of this compiler's current pass. The host stores the app config before firing
  /// `compile`, so a missing one is an internal error.
  pub fn session(&self) -> Result<SessionContext, MinappError> {
    SessionContext::from_store(self.app_configs, self.compiler_id)
  }
}
