pub mod cache_group;
pub mod extension;
pub mod mini_program_target;
pub mod node_env;
pub mod normalized_bundler_options;
pub mod optimization;
pub mod runtime_chunk;

use std::path::PathBuf;

use crate::{MiniProgramTarget, NodeEnv, OptimizationOptions};

#[derive(Default, Debug, Clone)]
pub struct BundlerOptions {
  // --- Input
  pub cwd: Option<PathBuf>,
  pub target: Option<MiniProgramTarget>,
  pub node_env: Option<NodeEnv>,
  /// Emit WeChat conventions whatever the target is.
  pub integration_mode: Option<bool>,

  // --- Output
  pub dir: Option<String>,
  pub entry_filenames: Option<String>,
  pub css_filenames: Option<String>,

  // --- Optimization
  pub minimize: Option<bool>,
  /// Overrides the optimization options the normalizer would assemble, placeholders included.
  pub optimization: Option<OptimizationOptions>,
}
