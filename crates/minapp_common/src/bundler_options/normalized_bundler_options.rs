use std::path::PathBuf;

use crate::{MiniProgramTarget, NodeEnv, OptimizationOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceMapKind {
  CheapSourceMap,
  SourceMap,
}

#[derive(Debug)]
pub struct NormalizedBundlerOptions {
  // --- Input
  pub cwd: PathBuf,
  /// Directory the entry names are relative to.
  pub context: PathBuf,
  pub target: MiniProgramTarget,
  pub node_env: NodeEnv,
  pub integration_mode: bool,

  // --- Output
  pub dir: String,
  pub entry_filenames: String,
  pub css_filenames: String,
  pub source_map: Option<SourceMapKind>,

  // --- Optimization
  pub optimization: OptimizationOptions,
}
