use std::cmp::Reverse;

use arcstr::ArcStr;
use itertools::Itertools;
use minapp_common::{Chunk, ChunkIdx, ChunkKind, ModuleIdx};
use minapp_error::BuildResult;
use minapp_utils::indexmap::FxIndexMap;
use tracing::debug;

use crate::{graph::ChunkGraph, stages::scan::ScanStageOutput, types::SharedOptions};

pub struct SplitChunksStageOutput {
  pub chunk_graph: ChunkGraph,
  pub warnings: Vec<anyhow::Error>,
}

/// Modules a cache group takes, each with the chunks it leaves.
#[derive(Default)]
struct GroupCandidate {
  size: usize,
  modules: Vec<(ModuleIdx, Vec<ChunkIdx>)>,
}

pub struct SplitChunksStage<'a> {
  scan_output: &'a ScanStageOutput,
  options: &'a SharedOptions,
}

impl<'a> SplitChunksStage<'a> {
  pub fn new(scan_output: &'a ScanStageOutput, options: &'a SharedOptions) -> Self {
    Self { scan_output, options }
  }

  pub fn split(&self) -> BuildResult<SplitChunksStageOutput> {
    let mut chunk_graph = ChunkGraph::new(&self.scan_output.modules);

    self.create_entry_chunks(&mut chunk_graph);
    let warnings = self.collect_unreachable_modules(&chunk_graph);
    self.apply_cache_groups(&mut chunk_graph);
    self.bind_runtime_chunks(&mut chunk_graph)?;

    Ok(SplitChunksStageOutput { chunk_graph, warnings })
  }

  fn create_entry_chunks(&self, chunk_graph: &mut ChunkGraph) {
    let modules = &self.scan_output.modules;
    for entry in &self.scan_output.entries {
      let chunk_idx = chunk_graph.add_chunk(Chunk::new(
        Some(entry.name.clone()),
        ChunkKind::EntryPoint { module: entry.idx },
      ));

      let mut stack = vec![entry.idx];
      while let Some(module_idx) = stack.pop() {
        if chunk_graph.chunk_table[chunk_idx].modules.contains(&module_idx) {
          continue;
        }
        chunk_graph.add_module_to_chunk(module_idx, chunk_idx);
        stack.extend(modules[module_idx].dependencies.iter().rev().copied());
      }
    }
  }

  fn collect_unreachable_modules(&self, chunk_graph: &ChunkGraph) -> Vec<anyhow::Error> {
    self
      .scan_output
      .modules
      .iter_enumerated()
      .filter(|(idx, _)| chunk_graph.module_to_chunks[*idx].is_empty())
      .map(|(_, module)| anyhow::anyhow!("Module {:?} is not reachable from any entry", module.id))
      .collect()
  }

  /// Moves every shared module into the chunk of the first cache group, by descending priority,
  /// that accepts it and still sees at least `min_chunks` chunks after filtering.
  fn apply_cache_groups(&self, chunk_graph: &mut ChunkGraph) {
    let Some(split_chunks) = &self.options.optimization.split_chunks else {
      return;
    };
    let Some(cache_groups) = &split_chunks.cache_groups else {
      return;
    };
    let cache_groups = cache_groups.read();
    // Stable, so groups with equal priority keep their insertion order
    let cache_groups =
      cache_groups.values().sorted_by_key(|group| Reverse(group.priority())).collect_vec();

    let mut candidates: FxIndexMap<ArcStr, GroupCandidate> = FxIndexMap::default();

    for (module_idx, module) in self.scan_output.modules.iter_enumerated() {
      if chunk_graph.entry_module_to_entry_chunk.contains_key(&module_idx) {
        continue;
      }
      let owners = &chunk_graph.module_to_chunks[module_idx];
      if owners.is_empty() {
        continue;
      }
      let owner_chunks = owners.iter().map(|idx| &chunk_graph.chunk_table[*idx]).collect_vec();

      for group in &cache_groups {
        if !group.test(&owner_chunks) {
          continue;
        }
        let selected = owners
          .iter()
          .copied()
          .filter(|idx| group.chunks(&chunk_graph.chunk_table[*idx]))
          .collect_vec();
        if selected.len() < split_chunks.min_chunks {
          continue;
        }
        let candidate = candidates.entry(group.name.clone()).or_default();
        candidate.size += module.size;
        candidate.modules.push((module_idx, selected));
        break;
      }
    }

    for (name, candidate) in candidates {
      if candidate.size < split_chunks.min_size {
        debug!(group = %name, size = candidate.size, "split chunk below min_size, skipped");
        continue;
      }
      debug!(group = %name, modules = candidate.modules.len(), "split chunk created");
      let chunk_idx = chunk_graph.add_chunk(Chunk::new(Some(name), ChunkKind::Common));
      for (module_idx, selected) in candidate.modules {
        for owner in selected {
          chunk_graph.remove_module_from_chunk(module_idx, owner);
        }
        chunk_graph.add_module_to_chunk(module_idx, chunk_idx);
      }
    }
  }

  fn bind_runtime_chunks(&self, chunk_graph: &mut ChunkGraph) -> BuildResult<()> {
    let Some(runtime_chunk) = &self.options.optimization.runtime_chunk else {
      return Ok(());
    };

    let entry_chunks = chunk_graph
      .chunk_table
      .iter_enumerated()
      .filter(|(_, chunk)| chunk.is_entry())
      .map(|(idx, chunk)| (idx, chunk.name.clone().unwrap_or_default()))
      .collect_vec();

    for (chunk_idx, entry_name) in entry_chunks {
      let runtime_name = runtime_chunk.name_for(&entry_name)?;
      let runtime_idx = chunk_graph.ensure_runtime_chunk(&runtime_name);
      chunk_graph.chunk_table[chunk_idx].runtime = Some(runtime_idx);
    }
    Ok(())
  }
}
