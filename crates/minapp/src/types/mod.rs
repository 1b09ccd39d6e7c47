pub mod bundle_output;
pub mod scan_input;

use std::sync::Arc;

use minapp_common::{Module, ModuleIdx, NormalizedBundlerOptions};
use oxc_index::IndexVec;

pub type IndexModules = IndexVec<ModuleIdx, Module>;

pub type SharedOptions = Arc<NormalizedBundlerOptions>;
