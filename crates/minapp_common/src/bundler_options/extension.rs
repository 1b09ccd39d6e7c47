use std::borrow::Cow;

use crate::MiniProgramTarget;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionKind {
  Script,
  Stylesheet,
  Template,
  Other,
}

impl ExtensionKind {
  /// Classifies an extension given without its leading dot. Every platform dialect is recognized,
  /// so already mapped extensions classify the same way as their sources.
  pub fn of(extension: &str) -> Self {
    match extension {
      "js" | "mjs" | "jsx" | "ts" | "tsx" => Self::Script,
      "wxss" | "css" | "qss" | "acss" | "ttss" => Self::Stylesheet,
      "wxml" | "qml" | "swan" | "axml" | "ttml" => Self::Template,
      _ => Self::Other,
    }
  }
}

/// Maps a source extension to the extension emitted for `target`.
///
/// Scripts always become `js`. Stylesheets and templates use the platform dialect, where
/// integration mode always speaks WeChat's. Unknown extensions are returned as they are. A leading
/// dot is kept.
pub fn map_extension(
  extension: &str,
  target: MiniProgramTarget,
  integration_mode: bool,
) -> Cow<'_, str> {
  let target = if integration_mode { MiniProgramTarget::Wechat } else { target };
  let (dot, bare) = extension.strip_prefix('.').map_or(("", extension), |bare| (".", bare));

  let mapped = match ExtensionKind::of(bare) {
    ExtensionKind::Script => "js",
    ExtensionKind::Stylesheet => target.stylesheet_extension(),
    ExtensionKind::Template => target.template_extension(),
    ExtensionKind::Other => return Cow::Borrowed(extension),
  };

  if mapped == bare {
    Cow::Borrowed(extension)
  } else {
    Cow::Owned(format!("{dot}{mapped}"))
  }
}

/// Stylesheet extension for a target given by name, `wxss` when the name is unknown.
pub fn stylesheet_extension_by_name(name: &str) -> &'static str {
  MiniProgramTarget::from_name(name).map_or("wxss", MiniProgramTarget::stylesheet_extension)
}

#[test]
fn test_map_stylesheet_extension() {
  let cases = [
    (MiniProgramTarget::Wechat, ".wxss"),
    (MiniProgramTarget::Qq, ".qss"),
    (MiniProgramTarget::Baidu, ".css"),
    (MiniProgramTarget::Alipay, ".acss"),
    (MiniProgramTarget::Toutiao, ".ttss"),
  ];
  for (target, expected) in cases {
    assert_eq!(map_extension(".wxss", target, false), expected);
    assert_eq!(map_extension(".css", target, false), expected);
  }
  assert_eq!(map_extension("wxss", MiniProgramTarget::Alipay, false), "acss");
}

#[test]
fn test_map_script_extension() {
  for target in [MiniProgramTarget::Wechat, MiniProgramTarget::Alipay, MiniProgramTarget::Toutiao] {
    assert_eq!(map_extension(".js", target, false), ".js");
    assert_eq!(map_extension(".tsx", target, false), ".js");
    assert_eq!(map_extension(".js", target, true), ".js");
  }
}

#[test]
fn test_integration_mode_forces_wechat() {
  assert_eq!(map_extension(".wxss", MiniProgramTarget::Alipay, true), ".wxss");
  assert_eq!(map_extension(".wxml", MiniProgramTarget::Baidu, true), ".wxml");
  assert_eq!(map_extension(".wxml", MiniProgramTarget::Baidu, false), ".swan");
}

#[test]
fn test_unknown_extension_is_kept() {
  assert_eq!(map_extension(".json", MiniProgramTarget::Alipay, false), ".json");
  assert_eq!(map_extension("", MiniProgramTarget::Alipay, false), "");
}

#[test]
fn test_mapping_is_idempotent() {
  for target in [
    MiniProgramTarget::Wechat,
    MiniProgramTarget::Qq,
    MiniProgramTarget::Baidu,
    MiniProgramTarget::Alipay,
    MiniProgramTarget::Toutiao,
  ] {
    for ext in [".js", ".ts", ".wxss", ".css", ".wxml", ".png"] {
      let once = map_extension(ext, target, false).into_owned();
      assert_eq!(map_extension(&once, target, false), once);
      assert_eq!(map_extension(ext, target, false), once);
    }
  }
}

#[test]
fn test_stylesheet_extension_by_name() {
  assert_eq!(stylesheet_extension_by_name("toutiao"), "ttss");
  assert_eq!(stylesheet_extension_by_name("unknown"), "wxss");
}
