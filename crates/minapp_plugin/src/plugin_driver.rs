use std::sync::Arc;

use minapp_error::BuildResult;
use tracing::trace;

use crate::{CompileContext, SharedPlugin};

pub type SharedPluginDriver = Arc<PluginDriver>;

#[derive(Debug, Default)]
pub struct PluginDriver {
  plugins: Vec<SharedPlugin>,
}

impl PluginDriver {
  pub fn new_shared(plugins: Vec<SharedPlugin>) -> SharedPluginDriver {
    Arc::new(Self { plugins })
  }

  /// Runs every plugin's `compile` hook in registration order, stopping at the first failure.
  pub fn compile(&self, ctx: &CompileContext<'_>) -> BuildResult<()> {
    for plugin in &self.plugins {
      trace!(plugin = %plugin.name(), compiler = %ctx.compiler_id, "compile hook");
      plugin.compile(ctx)?;
    }
    Ok(())
  }
}
