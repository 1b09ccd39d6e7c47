use crate::{RuntimeChunkName, SharedCacheGroups};

#[derive(Debug, Clone)]
pub struct SplitChunksOptions {
  /// A module is only split out when at least this many selected chunks share it.
  pub min_chunks: usize,
  /// Split chunks smaller than this, in bytes, are not created.
  pub min_size: usize,
  pub cache_groups: Option<SharedCacheGroups>,
}

impl Default for SplitChunksOptions {
  fn default() -> Self {
    Self { min_chunks: 2, min_size: 0, cache_groups: Some(SharedCacheGroups::default()) }
  }
}

#[derive(Debug, Clone, Default)]
pub struct OptimizationOptions {
  pub minimize: bool,
  /// `None` means the host was assembled without a runtime chunk slot.
  pub runtime_chunk: Option<RuntimeChunkName>,
  pub split_chunks: Option<SplitChunksOptions>,
}
