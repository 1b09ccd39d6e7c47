use arcstr::ArcStr;
use minapp_utils::path_ext::extname;

use crate::{ExtensionKind, ModuleIdx};

/// A module of the already parsed module graph handed to the bundler.
#[derive(Debug, Clone)]
pub struct Module {
  pub idx: ModuleIdx,
  /// Path relative to the context, e.g. `packageA/utils/format.js`.
  pub id: ArcStr,
  /// Size in bytes, compared against `split_chunks.min_size`.
  pub size: usize,
  pub dependencies: Vec<ModuleIdx>,
}

impl Module {
  pub fn extension_kind(&self) -> ExtensionKind {
    ExtensionKind::of(extname(&self.id).trim_start_matches('.'))
  }

  pub fn is_stylesheet(&self) -> bool {
    matches!(self.extension_kind(), ExtensionKind::Stylesheet)
  }
}
