use crate::ModuleIdx;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ChunkKind {
  EntryPoint {
    module: ModuleIdx,
  },
  /// Created by a cache group.
  #[default]
  Common,
  Runtime,
}
