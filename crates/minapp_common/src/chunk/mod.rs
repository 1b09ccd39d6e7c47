use arcstr::ArcStr;
use minapp_utils::{indexmap::FxIndexSet, path_ext::belongs_to};

use crate::{ChunkIdx, ChunkKind, ModuleIdx};

#[derive(Debug, Default)]
pub struct Chunk {
  pub name: Option<ArcStr>,
  pub kind: ChunkKind,
  // In the order the modules were reached from the entry
  pub modules: FxIndexSet<ModuleIdx>,
  /// The runtime chunk an entry chunk is bound to. Meaningless for other kinds.
  pub runtime: Option<ChunkIdx>,
}

impl Chunk {
  pub fn new(name: Option<ArcStr>, kind: ChunkKind) -> Self {
    Self { name, kind, ..Self::default() }
  }

  /// Chunks without a name only belong to the main package.
  pub fn belongs_to(&self, root: &str) -> bool {
    match &self.name {
      Some(name) => belongs_to(name, root),
      None => root.is_empty(),
    }
  }

  pub fn entry_module_idx(&self) -> Option<ModuleIdx> {
    match &self.kind {
      ChunkKind::EntryPoint { module } => Some(*module),
      ChunkKind::Common | ChunkKind::Runtime => None,
    }
  }

  pub fn is_entry(&self) -> bool {
    matches!(self.kind, ChunkKind::EntryPoint { .. })
  }
}

#[test]
fn test_chunk_belongs_to() {
  let chunk = Chunk::new(Some("sub/pages/index".into()), ChunkKind::Common);
  assert!(chunk.belongs_to("sub"));
  assert!(chunk.belongs_to(""));
  assert!(!chunk.belongs_to("su"));
  assert!(!Chunk::new(None, ChunkKind::Runtime).belongs_to("sub"));
}
