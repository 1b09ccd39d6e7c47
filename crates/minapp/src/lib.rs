mod bundler;
mod graph;
mod stages;
mod types;
mod utils;

pub use crate::{
  bundler::Bundler,
  graph::ChunkGraph,
  types::{bundle_output::BundleOutput, scan_input::ScanInput, IndexModules, SharedOptions},
};
pub use minapp_common::*;
pub use minapp_error::{BuildError, BuildResult, MinappError};
pub use minapp_plugin::*;
