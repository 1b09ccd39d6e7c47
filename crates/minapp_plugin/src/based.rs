use std::borrow::Cow;

use minapp_common::{map_extension, MiniProgramTarget, NormalizedBundlerOptions};
use minapp_utils::path_ext::{extname, replace_extension};

/// Extension helpers shared by everything that names output files.
#[derive(Debug, Clone, Copy)]
pub struct BasedPlugin {
  target: MiniProgramTarget,
  integration_mode: bool,
}

impl BasedPlugin {
  pub fn new(target: MiniProgramTarget, integration_mode: bool) -> Self {
    Self { target, integration_mode }
  }

  pub fn from_options(options: &NormalizedBundlerOptions) -> Self {
    Self::new(options.target, options.integration_mode)
  }

  pub fn target(&self) -> MiniProgramTarget {
    self.target
  }

  pub fn transform_ext<'a>(&self, extension: &'a str) -> Cow<'a, str> {
    map_extension(extension, self.target, self.integration_mode)
  }

  pub fn transform_ext_for_path(&self, pathname: &str) -> String {
    replace_extension(pathname, &self.transform_ext(extname(pathname)))
  }

  pub fn is_js_ext(&self, ext: &str) -> bool {
    self.transform_ext(".js") == ext
  }

  pub fn is_css_ext(&self, ext: &str) -> bool {
    self.transform_ext(".wxss") == ext
  }
}

#[test]
fn test_transform_ext_for_path() {
  let alipay = BasedPlugin::new(MiniProgramTarget::Alipay, false);
  assert_eq!(alipay.transform_ext_for_path("pages/index/index.wxss"), "pages/index/index.acss");
  assert_eq!(alipay.transform_ext_for_path("pages/index/index.wxml"), "pages/index/index.axml");
  assert_eq!(alipay.transform_ext_for_path("pages/index/index.ts"), "pages/index/index.js");
  assert_eq!(alipay.transform_ext_for_path("pages/index/index.json"), "pages/index/index.json");
  assert_eq!(alipay.transform_ext_for_path("LICENSE"), "LICENSE");

  let integration = BasedPlugin::new(MiniProgramTarget::Alipay, true);
  assert_eq!(integration.transform_ext_for_path("app.wxss"), "app.wxss");
}

#[test]
fn test_extension_predicates() {
  let toutiao = BasedPlugin::new(MiniProgramTarget::Toutiao, false);
  assert!(toutiao.is_js_ext(".js"));
  assert!(!toutiao.is_js_ext(".ts"));
  assert!(toutiao.is_css_ext(".ttss"));
  assert!(!toutiao.is_css_ext(".wxss"));

  let integration = BasedPlugin::new(MiniProgramTarget::Toutiao, true);
  assert!(integration.is_css_ext(".wxss"));
  assert_eq!(integration.target(), MiniProgramTarget::Toutiao);
}
