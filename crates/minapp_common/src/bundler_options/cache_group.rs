use std::sync::Arc;

use arcstr::ArcStr;
use minapp_utils::indexmap::FxIndexMap;
use parking_lot::RwLock;

use crate::Chunk;

/// Key and name of the group shared by the main package and every regular subpackage.
pub const COMMONS_CACHE_GROUP: ArcStr = arcstr::literal!("commons");

pub type CacheGroups = FxIndexMap<ArcStr, CacheGroup>;

/// The cache groups slot of the bundler options. The configuration-assembly stage creates it empty
/// and the split chunks plugin fills it once the app config is known.
pub type SharedCacheGroups = Arc<RwLock<CacheGroups>>;

/// A rule deciding which modules are pulled into the shared chunk `name` and which chunks may
/// give their modules to it.
#[derive(Debug, Clone)]
pub struct CacheGroup {
  pub name: ArcStr,
  pub id_hint: ArcStr,
  /// Groups without a priority rank as `0`.
  pub priority: Option<i32>,
  pub rule: CacheGroupRule,
}

impl CacheGroup {
  pub fn priority(&self) -> i32 {
    self.priority.unwrap_or(0)
  }

  /// `module_chunks` are all the chunks that reference the candidate module.
  pub fn test(&self, module_chunks: &[&Chunk]) -> bool {
    match &self.rule {
      CacheGroupRule::Commons(_) | CacheGroupRule::Isolated(_) => true,
      CacheGroupRule::Shared(rule) => rule.test(module_chunks),
    }
  }

  pub fn chunks(&self, chunk: &Chunk) -> bool {
    match &self.rule {
      CacheGroupRule::Commons(rule) => rule.chunks(chunk),
      CacheGroupRule::Isolated(rule) => rule.chunks(chunk),
      CacheGroupRule::Shared(_) => true,
    }
  }
}

#[derive(Debug, Clone)]
pub enum CacheGroupRule {
  Commons(CommonsGroupRule),
  Isolated(IsolatedGroupRule),
  Shared(SharedGroupRule),
}

/// The global fallback group. It never takes modules out of an independent subpackage.
#[derive(Debug, Clone, Default)]
pub struct CommonsGroupRule {
  pub independent_roots: Vec<ArcStr>,
}

impl CommonsGroupRule {
  pub fn chunks(&self, chunk: &Chunk) -> bool {
    !self.independent_roots.iter().any(|root| chunk.belongs_to(root))
  }
}

/// Group of an independent subpackage: any module, but only from chunks inside `root`.
#[derive(Debug, Clone)]
pub struct IsolatedGroupRule {
  pub root: ArcStr,
}

impl IsolatedGroupRule {
  pub fn chunks(&self, chunk: &Chunk) -> bool {
    chunk.belongs_to(&self.root)
  }
}

/// Group of a regular subpackage: only modules no chunk outside `root` references, but any chunk
/// may consume the result.
#[derive(Debug, Clone)]
pub struct SharedGroupRule {
  pub root: ArcStr,
}

impl SharedGroupRule {
  pub fn test(&self, module_chunks: &[&Chunk]) -> bool {
    module_chunks.iter().all(|chunk| chunk.belongs_to(&self.root))
  }
}
