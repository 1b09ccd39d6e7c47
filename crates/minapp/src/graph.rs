use arcstr::ArcStr;
use minapp_common::{Chunk, ChunkIdx, ChunkKind, ModuleIdx};
use oxc_index::{index_vec, IndexVec};
use rustc_hash::FxHashMap;

use crate::types::IndexModules;

#[derive(Debug)]
pub struct ChunkGraph {
  pub chunk_table: IndexVec<ChunkIdx, Chunk>,
  /// A module may sit in several entry chunks until a cache group pulls it out.
  pub module_to_chunks: IndexVec<ModuleIdx, Vec<ChunkIdx>>,
  pub entry_module_to_entry_chunk: FxHashMap<ModuleIdx, ChunkIdx>,
  pub runtime_chunks: FxHashMap<ArcStr, ChunkIdx>,
}

impl ChunkGraph {
  pub fn new(modules: &IndexModules) -> Self {
    Self {
      chunk_table: IndexVec::default(),
      module_to_chunks: index_vec![Vec::new(); modules.len()],
      entry_module_to_entry_chunk: FxHashMap::default(),
      runtime_chunks: FxHashMap::default(),
    }
  }

  pub fn add_chunk(&mut self, chunk: Chunk) -> ChunkIdx {
    let chunk_idx = self.chunk_table.push(chunk);
    if let Some(module) = self.chunk_table[chunk_idx].entry_module_idx() {
      self.entry_module_to_entry_chunk.insert(module, chunk_idx);
    }
    chunk_idx
  }

  pub fn add_module_to_chunk(&mut self, module_idx: ModuleIdx, chunk_idx: ChunkIdx) {
    if self.chunk_table[chunk_idx].modules.insert(module_idx) {
      self.module_to_chunks[module_idx].push(chunk_idx);
    }
  }

  pub fn remove_module_from_chunk(&mut self, module_idx: ModuleIdx, chunk_idx: ChunkIdx) {
    if self.chunk_table[chunk_idx].modules.shift_remove(&module_idx) {
      self.module_to_chunks[module_idx].retain(|idx| *idx != chunk_idx);
    }
  }

  /// Returns the runtime chunk called `name`, creating it on first use.
  pub fn ensure_runtime_chunk(&mut self, name: &ArcStr) -> ChunkIdx {
    if let Some(idx) = self.runtime_chunks.get(name) {
      return *idx;
    }
    let idx = self.add_chunk(Chunk::new(Some(name.clone()), ChunkKind::Runtime));
    self.runtime_chunks.insert(name.clone(), idx);
    idx
  }
}
