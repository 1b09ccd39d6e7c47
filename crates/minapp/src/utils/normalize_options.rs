use std::path::Path;

use minapp_common::{
  map_extension, BundlerOptions, MiniProgramTarget, NodeEnv, NormalizedBundlerOptions,
  OptimizationOptions, RuntimeChunkName, SourceMapKind, SplitChunksOptions,
};
use minapp_utils::path_ext::PathExt;
use sugar_path::SugarPath;

pub fn normalize_options(raw_options: BundlerOptions) -> NormalizedBundlerOptions {
  let cwd = raw_options.cwd.map_or_else(|| Path::new(".").absolutize(), |cwd| cwd.normalize());
  let target = raw_options.target.or_else(MiniProgramTarget::from_env).unwrap_or_default();
  let node_env = raw_options.node_env.unwrap_or_default();
  let integration_mode = raw_options.integration_mode.unwrap_or(false);
  let minimize = raw_options.minimize.unwrap_or(!node_env.is_development());

  let css_extension = map_extension("wxss", target, integration_mode);

  // The app config isn't known yet. The split chunks plugin fills these in on every pass.
  let optimization = raw_options.optimization.unwrap_or_else(|| OptimizationOptions {
    minimize,
    runtime_chunk: Some(RuntimeChunkName::placeholder()),
    split_chunks: Some(SplitChunksOptions::default()),
  });

  NormalizedBundlerOptions {
    context: cwd.join("src"),
    dir: raw_options
      .dir
      .unwrap_or_else(|| cwd.join("dist").join(target.as_str()).expect_to_slash()),
    cwd,
    target,
    node_env,
    integration_mode,
    entry_filenames: raw_options.entry_filenames.unwrap_or_else(|| "[name].js".to_string()),
    css_filenames: raw_options
      .css_filenames
      .unwrap_or_else(|| format!("[name].{css_extension}")),
    source_map: source_map_kind(node_env, target),
    optimization,
  }
}

fn source_map_kind(node_env: NodeEnv, target: MiniProgramTarget) -> Option<SourceMapKind> {
  if node_env.is_development() {
    Some(SourceMapKind::CheapSourceMap)
  } else if target == MiniProgramTarget::Wechat {
    Some(SourceMapKind::SourceMap)
  } else {
    None
  }
}

#[test]
fn test_normalize_defaults() {
  let options = normalize_options(BundlerOptions {
    cwd: Some("/project".into()),
    target: Some(MiniProgramTarget::Alipay),
    ..Default::default()
  });

  assert_eq!(options.context, Path::new("/project/src"));
  assert_eq!(options.dir, "/project/dist/alipay");
  assert_eq!(options.entry_filenames, "[name].js");
  assert_eq!(options.css_filenames, "[name].acss");
  assert_eq!(options.source_map, Some(SourceMapKind::CheapSourceMap));
  assert!(!options.optimization.minimize);

  let runtime_chunk = options.optimization.runtime_chunk.as_ref().unwrap();
  assert!(!runtime_chunk.is_resolved());
  let split_chunks = options.optimization.split_chunks.as_ref().unwrap();
  assert_eq!(split_chunks.min_chunks, 2);
  assert_eq!(split_chunks.min_size, 0);
  assert!(split_chunks.cache_groups.as_ref().unwrap().read().is_empty());
}

#[test]
fn test_normalize_production_and_integration() {
  let production = normalize_options(BundlerOptions {
    cwd: Some("/project".into()),
    target: Some(MiniProgramTarget::Wechat),
    node_env: Some(NodeEnv::Production),
    ..Default::default()
  });
  assert_eq!(production.source_map, Some(SourceMapKind::SourceMap));
  assert!(production.optimization.minimize);

  let integration = normalize_options(BundlerOptions {
    cwd: Some("/project".into()),
    target: Some(MiniProgramTarget::Baidu),
    node_env: Some(NodeEnv::Production),
    integration_mode: Some(true),
    ..Default::default()
  });
  assert_eq!(integration.source_map, None);
  assert_eq!(integration.css_filenames, "[name].wxss");
}

// The only test of this crate touching `MINAPP_TARGET`, others pass an explicit target.
#[test]
fn test_normalize_target_from_env() {
  std::env::set_var(MiniProgramTarget::ENV_VAR, " toutiao\n");
  let from_env = normalize_options(BundlerOptions {
    cwd: Some("/project".into()),
    target: None,
    ..Default::default()
  });
  assert_eq!(from_env.target, MiniProgramTarget::Toutiao);
  assert_eq!(from_env.css_filenames, "[name].ttss");
  assert_eq!(from_env.dir, "/project/dist/toutiao");

  let explicit = normalize_options(BundlerOptions {
    cwd: Some("/project".into()),
    target: Some(MiniProgramTarget::Qq),
    ..Default::default()
  });
  assert_eq!(explicit.target, MiniProgramTarget::Qq);

  std::env::set_var(MiniProgramTarget::ENV_VAR, "harmony");
  let unknown =
    normalize_options(BundlerOptions { cwd: Some("/project".into()), ..Default::default() });
  assert_eq!(unknown.target, MiniProgramTarget::default());

  std::env::remove_var(MiniProgramTarget::ENV_VAR);
}
