mod based;
mod loaders;
mod plugin;
mod plugin_context;
mod plugin_driver;
mod split_chunks;

pub use crate::{
  based::BasedPlugin,
  loaders::transform::{
    LoaderCallback, LoaderContext, TransformLoader, TransformLoaderOptions, TransformType,
    Translator,
  },
  plugin::{HookNoopReturn, Plugin, SharedPlugin},
  plugin_context::CompileContext,
  plugin_driver::{PluginDriver, SharedPluginDriver},
  split_chunks::{runtime_chunk_name, SplitChunksPlugin},
};
