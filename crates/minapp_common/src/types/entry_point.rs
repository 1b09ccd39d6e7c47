use arcstr::ArcStr;

use crate::ModuleIdx;

/// An entry of the app, named after its output path relative to the context, e.g.
/// `packageA/pages/cat/index`.
#[derive(Debug, Clone)]
pub struct EntryPoint {
  pub name: ArcStr,
  pub idx: ModuleIdx,
}
