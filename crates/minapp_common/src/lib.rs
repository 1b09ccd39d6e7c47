mod app_config;
mod bundler_options;
mod chunk;
mod types;

pub use bundler_options::{
  cache_group::{
    CacheGroup, CacheGroupRule, CacheGroups, CommonsGroupRule, IsolatedGroupRule,
    SharedCacheGroups, SharedGroupRule, COMMONS_CACHE_GROUP,
  },
  extension::{map_extension, stylesheet_extension_by_name, ExtensionKind},
  mini_program_target::MiniProgramTarget,
  node_env::NodeEnv,
  normalized_bundler_options::{NormalizedBundlerOptions, SourceMapKind},
  optimization::{OptimizationOptions, SplitChunksOptions},
  runtime_chunk::{RuntimeChunkName, RuntimeChunkNameFn, SHARED_RUNTIME_CHUNK_NAME},
  BundlerOptions,
};

pub use crate::{
  app_config::{
    app_config_store::{AppConfigStore, SharedAppConfigStore},
    session_context::SessionContext,
    subpackages_info::{get_subpackages_info, Subpackage, SubpackagesInfo},
    AppConfig, SubpackageConfig,
  },
  chunk::Chunk,
  types::{
    chunk_kind::ChunkKind,
    compiler_id::CompilerId,
    entry_point::EntryPoint,
    module::Module,
    output_asset::{OutputAsset, OutputAssetKind},
    raw_idx::{ChunkIdx, ModuleIdx},
  },
};
