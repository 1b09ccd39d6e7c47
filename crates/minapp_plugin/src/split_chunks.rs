use arcstr::ArcStr;
use minapp_common::{
  CacheGroup, CacheGroupRule, CommonsGroupRule, IsolatedGroupRule, NormalizedBundlerOptions,
  RuntimeChunkName, SessionContext, SharedCacheGroups, SharedGroupRule, Subpackage,
  COMMONS_CACHE_GROUP, SHARED_RUNTIME_CHUNK_NAME,
};
use minapp_error::MinappError;
use minapp_utils::path_ext::belongs_to;
use tracing::debug;

use crate::{CompileContext, HookNoopReturn, Plugin};

/// Generates `optimization.split_chunks.cache_groups` and the runtime chunk naming rule from the
/// app config.
///
/// The app config can't be read while the options are assembled, so the options only carry empty
/// placeholders. They are patched here, in the `compile` hook, on every pass.
#[derive(Debug, Default)]
pub struct SplitChunksPlugin;

impl SplitChunksPlugin {
  pub fn new() -> Self {
    Self
  }

  /// Options are left untouched unless every slot exists and the subpackages are valid.
  pub fn rewrite(
    &self,
    options: &NormalizedBundlerOptions,
    session: &SessionContext,
  ) -> Result<(), MinappError> {
    let split_chunks = options
      .optimization
      .split_chunks
      .as_ref()
      .ok_or(MinappError::ConfigurationMissing { path: "optimization.split_chunks" })?;
    let cache_groups = split_chunks
      .cache_groups
      .as_ref()
      .ok_or(MinappError::ConfigurationMissing { path: "optimization.split_chunks.cache_groups" })?;
    let runtime_chunk = options
      .optimization
      .runtime_chunk
      .as_ref()
      .ok_or(MinappError::ConfigurationMissing { path: "optimization.runtime_chunk" })?;

    session.subpackages_info().validate()?;
    Self::override_cache_groups(cache_groups, session);
    Self::override_runtime_chunk(runtime_chunk, session);
    Ok(())
  }

  fn override_cache_groups(cache_groups: &SharedCacheGroups, session: &SessionContext) {
    let info = session.subpackages_info();
    let mut cache_groups = cache_groups.write();
    // Groups of the previous pass may describe subpackages that no longer exist
    cache_groups.clear();

    cache_groups.insert(
      COMMONS_CACHE_GROUP,
      CacheGroup {
        name: COMMONS_CACHE_GROUP,
        id_hint: COMMONS_CACHE_GROUP,
        priority: Some(-5),
        rule: CacheGroupRule::Commons(CommonsGroupRule {
          independent_roots: info.independent_roots(),
        }),
      },
    );

    for Subpackage { root, independent } in &info.subpackages {
      let name = ArcStr::from(format!("{root}/commons"));
      let rule = if *independent {
        CacheGroupRule::Isolated(IsolatedGroupRule { root: root.clone() })
      } else {
        CacheGroupRule::Shared(SharedGroupRule { root: root.clone() })
      };
      cache_groups.insert(
        root.clone(),
        CacheGroup { name: name.clone(), id_hint: name, priority: None, rule },
      );
    }

    debug!(
      compiler = %session.compiler_id(),
      groups = ?cache_groups.keys().collect::<Vec<_>>(),
      "cache groups rebuilt"
    );
  }

  fn override_runtime_chunk(runtime_chunk: &RuntimeChunkName, session: &SessionContext) {
    let independent_roots = session.subpackages_info().independent_roots();
    debug!(
      compiler = %session.compiler_id(),
      independents = ?independent_roots,
      "runtime chunk rule rebuilt"
    );
    runtime_chunk.resolve(move |entry| runtime_chunk_name(&independent_roots, entry));
  }
}

impl Plugin for SplitChunksPlugin {
  fn compile(&self, ctx: &CompileContext<'_>) -> HookNoopReturn {
    let session = ctx.session()?;
    self.rewrite(ctx.options, &session)?;
    Ok(())
  }
}

/// Entries of an independent subpackage get a runtime of their own, `<root>/runtime`. Everything
/// else shares `runtime`. The first independent root containing `entry` wins.
pub fn runtime_chunk_name(independent_roots: &[ArcStr], entry: &str) -> ArcStr {
  independent_roots
    .iter()
    .find(|root| belongs_to(entry, root))
    .map_or(SHARED_RUNTIME_CHUNK_NAME, |root| ArcStr::from(format!("{root}/runtime")))
}

#[cfg(test)]
mod tests {
  use std::{path::PathBuf, sync::Arc};

  use arcstr::ArcStr;
  use minapp_common::{
    AppConfig, AppConfigStore, CacheGroupRule, Chunk, ChunkKind, CompilerId, MiniProgramTarget,
    NodeEnv, NormalizedBundlerOptions, OptimizationOptions, RuntimeChunkName, SessionContext,
    SplitChunksOptions, SubpackageConfig,
  };
  use minapp_error::MinappError;

  use super::{runtime_chunk_name, SplitChunksPlugin};
  use crate::{CompileContext, Plugin};

  fn options(optimization: OptimizationOptions) -> NormalizedBundlerOptions {
    NormalizedBundlerOptions {
      cwd: PathBuf::from("/project"),
      context: PathBuf::from("/project/src"),
      target: MiniProgramTarget::Wechat,
      node_env: NodeEnv::Development,
      integration_mode: false,
      dir: "/project/dist/wechat".to_string(),
      entry_filenames: "[name].js".to_string(),
      css_filenames: "[name].wxss".to_string(),
      source_map: None,
      optimization,
    }
  }

  fn placeholders() -> OptimizationOptions {
    OptimizationOptions {
      minimize: false,
      runtime_chunk: Some(RuntimeChunkName::placeholder()),
      split_chunks: Some(SplitChunksOptions::default()),
    }
  }

  fn app_config(subpackages: &[(&str, bool)]) -> AppConfig {
    AppConfig {
      pages: vec!["main/page".to_string()],
      subpackages: Some(
        subpackages
          .iter()
          .map(|(root, independent)| SubpackageConfig {
            root: Some((*root).to_string()),
            independent: *independent,
            ..Default::default()
          })
          .collect(),
      ),
    }
  }

  fn session(app_config: AppConfig) -> SessionContext {
    SessionContext::new(CompilerId::next(), Arc::new(app_config))
  }

  fn chunk(name: &str) -> Chunk {
    Chunk::new(Some(ArcStr::from(name)), ChunkKind::Common)
  }

  fn group_keys(options: &NormalizedBundlerOptions) -> Vec<String> {
    let split_chunks = options.optimization.split_chunks.as_ref().unwrap();
    let cache_groups = split_chunks.cache_groups.as_ref().unwrap().read();
    cache_groups.keys().map(ToString::to_string).collect()
  }

  #[test]
  fn rebuild_from_independent_and_shared_subpackages() {
    let options = options(placeholders());
    let session = session(app_config(&[("a", true), ("b", false)]));
    SplitChunksPlugin::new().rewrite(&options, &session).unwrap();

    assert_eq!(group_keys(&options), ["commons", "a", "b"]);

    let split_chunks = options.optimization.split_chunks.as_ref().unwrap();
    let cache_groups = split_chunks.cache_groups.as_ref().unwrap().read();

    let commons = &cache_groups["commons"];
    assert_eq!(commons.name, "commons");
    assert_eq!(commons.id_hint, "commons");
    assert_eq!(commons.priority, Some(-5));
    assert!(!commons.chunks(&chunk("a/page")));
    assert!(commons.chunks(&chunk("b/page")));
    assert!(commons.chunks(&chunk("main/page")));

    let isolated = &cache_groups["a"];
    assert_eq!(isolated.name, "a/commons");
    assert_eq!(isolated.id_hint, "a/commons");
    assert!(matches!(isolated.rule, CacheGroupRule::Isolated(_)));
    assert!(isolated.test(&[&chunk("main/page")]));
    assert!(isolated.chunks(&chunk("a/page")));
    assert!(!isolated.chunks(&chunk("main/page")));

    let shared = &cache_groups["b"];
    assert_eq!(shared.name, "b/commons");
    assert!(matches!(shared.rule, CacheGroupRule::Shared(_)));
    assert!(shared.test(&[&chunk("b/one"), &chunk("b/two")]));
    assert!(!shared.test(&[&chunk("b/one"), &chunk("main/page")]));
    assert!(shared.chunks(&chunk("main/page")));
    assert!(shared.priority() > commons.priority());

    let runtime_chunk = options.optimization.runtime_chunk.as_ref().unwrap();
    assert_eq!(runtime_chunk.name_for("a/page").unwrap(), "a/runtime");
    assert_eq!(runtime_chunk.name_for("b/page").unwrap(), "runtime");
    assert_eq!(runtime_chunk.name_for("main/page").unwrap(), "runtime");
  }

  #[test]
  fn rebuild_drops_groups_of_the_previous_manifest() {
    let options = options(placeholders());
    let plugin = SplitChunksPlugin::new();

    plugin.rewrite(&options, &session(app_config(&[("a", true), ("b", false)]))).unwrap();
    plugin.rewrite(&options, &session(app_config(&[("c", false)]))).unwrap();

    let fresh = self::options(placeholders());
    plugin.rewrite(&fresh, &session(app_config(&[("c", false)]))).unwrap();

    assert_eq!(group_keys(&options), ["commons", "c"]);
    assert_eq!(group_keys(&options), group_keys(&fresh));

    let runtime_chunk = options.optimization.runtime_chunk.as_ref().unwrap();
    assert_eq!(runtime_chunk.name_for("a/page").unwrap(), "runtime");
  }

  #[test]
  fn rebuild_without_subpackages_only_installs_commons() {
    let options = options(placeholders());
    SplitChunksPlugin::new().rewrite(&options, &session(AppConfig::default())).unwrap();
    assert_eq!(group_keys(&options), ["commons"]);
  }

  #[test]
  fn missing_placeholders_are_fatal() {
    let plugin = SplitChunksPlugin::new();
    let session = session(app_config(&[("a", true)]));

    let without_split_chunks =
      options(OptimizationOptions { split_chunks: None, ..placeholders() });
    assert!(matches!(
      plugin.rewrite(&without_split_chunks, &session),
      Err(MinappError::ConfigurationMissing { path: "optimization.split_chunks" })
    ));

    let without_cache_groups = options(OptimizationOptions {
      split_chunks: Some(SplitChunksOptions {
        cache_groups: None,
        ..SplitChunksOptions::default()
      }),
      ..placeholders()
    });
    assert!(matches!(
      plugin.rewrite(&without_cache_groups, &session),
      Err(MinappError::ConfigurationMissing { path: "optimization.split_chunks.cache_groups" })
    ));

    let without_runtime_chunk =
      options(OptimizationOptions { runtime_chunk: None, ..placeholders() });
    assert!(matches!(
      plugin.rewrite(&without_runtime_chunk, &session),
      Err(MinappError::ConfigurationMissing { path: "optimization.runtime_chunk" })
    ));
  }

  #[test]
  fn overlapping_roots_are_rejected() {
    let options = options(placeholders());
    let session = session(app_config(&[("a", true), ("a/b", true)]));
    let result = SplitChunksPlugin::new().rewrite(&options, &session);
    assert!(matches!(result, Err(MinappError::OverlappingSubpackages { .. })));
    assert!(!options.optimization.runtime_chunk.as_ref().unwrap().is_resolved());
  }

  #[test]
  fn commons_root_is_rejected_before_patching() {
    let options = options(placeholders());
    let session = session(app_config(&[("a", true), ("commons", false)]));
    let result = SplitChunksPlugin::new().rewrite(&options, &session);

    assert!(matches!(
      result,
      Err(MinappError::ReservedSubpackageRoot { root }) if root == "commons"
    ));
    assert!(group_keys(&options).is_empty());
    assert!(!options.optimization.runtime_chunk.as_ref().unwrap().is_resolved());
  }

  #[test]
  fn missing_runtime_chunk_slot_keeps_previous_groups() {
    let plugin = SplitChunksPlugin::new();
    let patched = options(placeholders());
    plugin.rewrite(&patched, &session(app_config(&[("a", true), ("b", false)]))).unwrap();

    // Same cache groups slot, no runtime chunk slot
    let split_chunks = patched.optimization.split_chunks.clone();
    let without_runtime_chunk =
      options(OptimizationOptions { minimize: false, runtime_chunk: None, split_chunks });
    let result = plugin.rewrite(&without_runtime_chunk, &session(app_config(&[("c", false)])));

    assert!(matches!(
      result,
      Err(MinappError::ConfigurationMissing { path: "optimization.runtime_chunk" })
    ));
    assert_eq!(group_keys(&without_runtime_chunk), ["commons", "a", "b"]);
    assert_eq!(group_keys(&patched), ["commons", "a", "b"]);
  }

  #[test]
  fn compile_hook_requires_an_app_config() {
    let options = options(placeholders());
    let store = AppConfigStore::default();
    let compiler_id = CompilerId::next();
    let plugin = SplitChunksPlugin::new();

    let error = plugin.compile(&CompileContext::new(compiler_id, &options, &store)).unwrap_err();
    assert!(matches!(
      error.downcast_ref::<MinappError>(),
      Some(MinappError::ManifestMissing { .. })
    ));

    store.insert(compiler_id, app_config(&[("a", true)]));
    plugin.compile(&CompileContext::new(compiler_id, &options, &store)).unwrap();
    assert_eq!(group_keys(&options), ["commons", "a"]);
    assert_eq!(plugin.name(), "SplitChunksPlugin");
  }

  #[test]
  fn runtime_name_uses_first_matching_independent_root() {
    let roots = [ArcStr::from("a"), ArcStr::from("b")];
    assert_eq!(runtime_chunk_name(&roots, "a/pages/index"), "a/runtime");
    assert_eq!(runtime_chunk_name(&roots, "b"), "b/runtime");
    assert_eq!(runtime_chunk_name(&roots, "ab/pages/index"), "runtime");
    assert_eq!(runtime_chunk_name(&[], "a/pages/index"), "runtime");
  }
}
