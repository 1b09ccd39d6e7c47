use std::sync::Arc;

use futures::future::BoxFuture;
use minapp_common::MiniProgramTarget;
use minapp_error::MinappError;
use serde::Deserialize;
use tokio::sync::oneshot;
use tracing::{trace, warn};

/// What kind of source a transform loader invocation translates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum TransformType {
  #[serde(rename = "wxml", alias = "template")]
  Template,
  #[serde(rename = "wxss", alias = "stylesheet")]
  Stylesheet,
  #[serde(rename = "js", alias = "script")]
  Script,
}

/// Translates WeChat flavoured templates and stylesheets into the dialect of another platform.
pub trait Translator: Send + Sync {
  fn translate<'a>(
    &'a self,
    source: &'a str,
    target: MiniProgramTarget,
    ty: TransformType,
  ) -> BoxFuture<'a, anyhow::Result<String>>;
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransformLoaderOptions {
  #[serde(default)]
  pub target: Option<MiniProgramTarget>,
  #[serde(default, rename = "type")]
  pub ty: Option<TransformType>,
}

impl TransformLoaderOptions {
  /// Parses the loader query, a JSON object. An empty query means no options at all.
  pub fn from_query(query: &str) -> anyhow::Result<Self> {
    let query = query.trim();
    if query.is_empty() {
      return Ok(Self::default());
    }
    Ok(serde_json::from_str(query)?)
  }
}

#[derive(Debug)]
pub struct LoaderContext {
  pub resource: String,
  pub options: TransformLoaderOptions,
  cacheable: bool,
}

impl LoaderContext {
  pub fn new(resource: impl Into<String>, options: TransformLoaderOptions) -> Self {
    Self { resource: resource.into(), options, cacheable: false }
  }

  /// The output only depends on the source and the options.
  pub fn cacheable(&mut self) {
    self.cacheable = true;
  }

  pub fn is_cacheable(&self) -> bool {
    self.cacheable
  }
}

/// The host's completion signal for one loader invocation. Completing consumes it, so a result is
/// delivered at most once, and `run_with_callback` always completes it.
#[derive(Debug)]
pub struct LoaderCallback(oneshot::Sender<anyhow::Result<String>>);

impl LoaderCallback {
  pub fn new() -> (Self, oneshot::Receiver<anyhow::Result<String>>) {
    let (tx, rx) = oneshot::channel();
    (Self(tx), rx)
  }

  pub fn complete(self, result: anyhow::Result<String>) {
    if let Err(result) = self.0.send(result) {
      warn!(failed = result.is_err(), "loader result dropped, the host stopped waiting for it");
    }
  }
}

/// Bridges a source file to the external [`Translator`].
#[derive(Clone)]
pub struct TransformLoader {
  translator: Arc<dyn Translator>,
  default_target: Option<MiniProgramTarget>,
}

impl TransformLoader {
  /// `target` falls back to the one named by `MINAPP_TARGET` when the query has none.
  pub fn new(translator: Arc<dyn Translator>) -> Self {
    Self::with_default_target(translator, MiniProgramTarget::from_env())
  }

  pub fn with_default_target(
    translator: Arc<dyn Translator>,
    default_target: Option<MiniProgramTarget>,
  ) -> Self {
    Self { translator, default_target }
  }

  /// Translates `source`. Translator errors are returned untouched.
  pub async fn run(&self, ctx: &mut LoaderContext, source: &[u8]) -> anyhow::Result<String> {
    ctx.cacheable();

    let target = ctx
      .options
      .target
      .or(self.default_target)
      .ok_or(MinappError::InvocationParameterMissing { param: "target" })?;
    let ty = ctx.options.ty.ok_or(MinappError::InvocationParameterMissing { param: "type" })?;

    let source = String::from_utf8_lossy(source);
    trace!(resource = %ctx.resource, %target, ?ty, "transform");
    self.translator.translate(&source, target, ty).await
  }

  pub async fn run_with_callback(
    &self,
    mut ctx: LoaderContext,
    source: Vec<u8>,
    callback: LoaderCallback,
  ) {
    let result = self.run(&mut ctx, &source).await;
    callback.complete(result);
  }
}

impl std::fmt::Debug for TransformLoader {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("TransformLoader").field("default_target", &self.default_target).finish()
  }
}

#[cfg(test)]
mod tests {
  use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
  };

  use futures::{future::BoxFuture, FutureExt};
  use minapp_common::MiniProgramTarget;
  use minapp_error::MinappError;

  use super::{
    LoaderCallback, LoaderContext, TransformLoader, TransformLoaderOptions, TransformType,
    Translator,
  };

  #[derive(Default)]
  struct RecordingTranslator {
    calls: AtomicUsize,
  }

  impl Translator for RecordingTranslator {
    fn translate<'a>(
      &'a self,
      source: &'a str,
      target: MiniProgramTarget,
      ty: TransformType,
    ) -> BoxFuture<'a, anyhow::Result<String>> {
      self.calls.fetch_add(1, Ordering::SeqCst);
      async move {
        if source.contains("broken") {
          anyhow::bail!("unexpected token in {ty:?}");
        }
        Ok(format!("/* {target} */{}", source.replace("wx:", "a:")))
      }
      .boxed()
    }
  }

  fn options(query: &str) -> TransformLoaderOptions {
    TransformLoaderOptions::from_query(query).unwrap()
  }

  #[tokio::test]
  async fn translates_with_query_options() {
    let translator = Arc::new(RecordingTranslator::default());
    let loader = TransformLoader::with_default_target(Arc::clone(&translator) as _, None);
    let mut ctx =
      LoaderContext::new("pages/index/index.wxml", options(r#"{"target":"alipay","type":"wxml"}"#));

    let output = loader.run(&mut ctx, b"<view wx:if=\"{{ok}}\"/>").await.unwrap();

    assert_eq!(output, "/* alipay */<view a:if=\"{{ok}}\"/>");
    assert!(ctx.is_cacheable());
    assert_eq!(translator.calls.load(Ordering::SeqCst), 1);
  }

  #[tokio::test]
  async fn target_falls_back_to_default() {
    let translator = Arc::new(RecordingTranslator::default());
    let loader = TransformLoader::with_default_target(translator, Some(MiniProgramTarget::Qq));
    let mut ctx = LoaderContext::new("app.wxss", options(r#"{"type":"stylesheet"}"#));
    assert_eq!(loader.run(&mut ctx, b".a{}").await.unwrap(), "/* qq */.a{}");
  }

  // The only test of this crate touching `MINAPP_TARGET`, others inject the default target.
  #[tokio::test]
  async fn target_falls_back_to_environment() {
    let translator: Arc<dyn Translator> = Arc::new(RecordingTranslator::default());

    std::env::set_var(MiniProgramTarget::ENV_VAR, " alipay ");
    let loader = TransformLoader::new(Arc::clone(&translator));
    let mut ctx = LoaderContext::new("index.wxml", options(r#"{"type":"wxml"}"#));
    let output = loader.run(&mut ctx, b"<view wx:for=\"{{list}}\"/>").await.unwrap();
    assert_eq!(output, "/* alipay */<view a:for=\"{{list}}\"/>");

    let mut ctx = LoaderContext::new("index.wxml", options(r#"{"target":"qq","type":"wxml"}"#));
    assert_eq!(loader.run(&mut ctx, b"<view/>").await.unwrap(), "/* qq */<view/>");

    std::env::set_var(MiniProgramTarget::ENV_VAR, "harmony");
    let loader = TransformLoader::new(Arc::clone(&translator));
    std::env::remove_var(MiniProgramTarget::ENV_VAR);

    let mut ctx = LoaderContext::new("index.wxml", options(r#"{"type":"wxml"}"#));
    let error = loader.run(&mut ctx, b"<view/>").await.unwrap_err();
    assert!(matches!(
      error.downcast_ref::<MinappError>(),
      Some(MinappError::InvocationParameterMissing { param: "target" })
    ));
  }

  #[tokio::test]
  async fn missing_parameters_fail_before_translating() {
    let translator = Arc::new(RecordingTranslator::default());
    let loader = TransformLoader::with_default_target(Arc::clone(&translator) as _, None);

    let mut without_type = LoaderContext::new("app.wxss", options(r#"{"target":"wechat"}"#));
    let error = loader.run(&mut without_type, b".a{}").await.unwrap_err();
    assert!(matches!(
      error.downcast_ref::<MinappError>(),
      Some(MinappError::InvocationParameterMissing { param: "type" })
    ));

    let mut without_target = LoaderContext::new("app.wxss", options(r#"{"type":"wxss"}"#));
    let error = loader.run(&mut without_target, b".a{}").await.unwrap_err();
    assert!(matches!(
      error.downcast_ref::<MinappError>(),
      Some(MinappError::InvocationParameterMissing { param: "target" })
    ));

    assert_eq!(translator.calls.load(Ordering::SeqCst), 0);
  }

  #[tokio::test]
  async fn translator_errors_are_forwarded() {
    let loader =
      TransformLoader::with_default_target(Arc::new(RecordingTranslator::default()), None);
    let mut ctx = LoaderContext::new("broken.wxml", options(r#"{"target":"baidu","type":"wxml"}"#));
    let error = loader.run(&mut ctx, b"broken").await.unwrap_err();
    assert_eq!(error.to_string(), "unexpected token in Template");
    assert!(error.downcast_ref::<MinappError>().is_none());
  }

  #[tokio::test]
  async fn callback_completes_once_per_file() {
    let loader =
      TransformLoader::with_default_target(Arc::new(RecordingTranslator::default()), None);

    let files = [
      ("a.wxml", r#"{"target":"toutiao","type":"wxml"}"#, "<view/>"),
      ("b.wxml", r#"{"target":"toutiao"}"#, "<view/>"),
    ];
    let mut receivers = Vec::new();
    let mut handles = Vec::new();
    for (resource, query, source) in files {
      let (callback, rx) = LoaderCallback::new();
      let loader = loader.clone();
      let ctx = LoaderContext::new(resource, options(query));
      handles.push(tokio::spawn(async move {
        loader.run_with_callback(ctx, source.as_bytes().to_vec(), callback).await;
      }));
      receivers.push(rx);
    }
    for handle in handles {
      handle.await.unwrap();
    }

    let mut results = Vec::new();
    for rx in receivers {
      results.push(rx.await.unwrap());
    }
    assert_eq!(results[0].as_ref().unwrap(), "/* toutiao */<view/>");
    assert!(results[1].is_err());
  }

  #[test]
  fn query_parsing() {
    let parsed = options(r#"{"target":"bytedance","type":"js"}"#);
    assert_eq!(parsed.target, Some(MiniProgramTarget::Toutiao));
    assert_eq!(parsed.ty, Some(TransformType::Script));
    assert!(options("").target.is_none());
    assert!(TransformLoaderOptions::from_query(r#"{"type":"less"}"#).is_err());
    assert!(TransformLoaderOptions::from_query(r#"{"mode":"fast"}"#).is_err());
  }
}
