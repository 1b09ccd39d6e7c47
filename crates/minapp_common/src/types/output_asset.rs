use arcstr::ArcStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputAssetKind {
  Script,
  Stylesheet,
}

/// A file the build emits. Rendering the content is left to the host, so an asset only lists the
/// modules it is made of.
#[derive(Debug, Clone)]
pub struct OutputAsset {
  pub filename: String,
  pub kind: OutputAssetKind,
  pub chunk_name: ArcStr,
  pub modules: Vec<ArcStr>,
  /// The runtime chunk an entry's script needs loaded first.
  pub runtime: Option<ArcStr>,
}

impl OutputAsset {
  pub fn filename(&self) -> &str {
    &self.filename
  }
}
