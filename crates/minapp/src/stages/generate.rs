use arcstr::ArcStr;
use minapp_common::{Module, OutputAsset, OutputAssetKind};
use minapp_error::BuildResult;
use minapp_plugin::BasedPlugin;
use rustc_hash::FxHashSet;

use crate::{
  graph::ChunkGraph,
  types::{bundle_output::BundleOutput, IndexModules, SharedOptions},
  utils::render_filename::render_filename,
};

pub struct GenerateStage<'a> {
  modules: &'a IndexModules,
  options: &'a SharedOptions,
}

impl<'a> GenerateStage<'a> {
  pub fn new(modules: &'a IndexModules, options: &'a SharedOptions) -> Self {
    Self { modules, options }
  }

  /// Every chunk emits a script. Chunks holding stylesheets emit a stylesheet as well.
  pub fn generate(
    &self,
    chunk_graph: &ChunkGraph,
    warnings: Vec<anyhow::Error>,
  ) -> BuildResult<BundleOutput> {
    let based = BasedPlugin::from_options(self.options);
    let mut assets = Vec::with_capacity(chunk_graph.chunk_table.len());

    for chunk in &chunk_graph.chunk_table {
      let chunk_name = chunk.name.clone().unwrap_or(arcstr::literal!("chunk"));
      let (stylesheets, scripts): (Vec<&Module>, Vec<&Module>) = chunk
        .modules
        .iter()
        .map(|idx| &self.modules[*idx])
        .partition(|module| module.is_stylesheet());

      let output_ids = |modules: Vec<&Module>| -> Vec<ArcStr> {
        modules
          .iter()
          .map(|module| ArcStr::from(based.transform_ext_for_path(&module.id)))
          .collect()
      };

      assets.push(OutputAsset {
        filename: render_filename(&self.options.entry_filenames, &chunk_name),
        kind: OutputAssetKind::Script,
        chunk_name: chunk_name.clone(),
        modules: output_ids(scripts),
        runtime: chunk.runtime.and_then(|idx| chunk_graph.chunk_table[idx].name.clone()),
      });

      if !stylesheets.is_empty() {
        assets.push(OutputAsset {
          filename: render_filename(&self.options.css_filenames, &chunk_name),
          kind: OutputAssetKind::Stylesheet,
          chunk_name,
          modules: output_ids(stylesheets),
          runtime: None,
        });
      }
    }

    let mut filenames = FxHashSet::default();
    let errors = assets
      .iter()
      .filter(|asset| !filenames.insert(asset.filename.as_str()))
      .map(|asset| anyhow::anyhow!("Multiple chunks emit the same file {:?}", asset.filename))
      .collect::<Vec<_>>();
    if !errors.is_empty() {
      return Err(errors.into());
    }

    Ok(BundleOutput { assets, warnings })
  }
}
