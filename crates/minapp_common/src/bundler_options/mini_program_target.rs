use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// The mini-program platform a build emits for.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MiniProgramTarget {
  #[default]
  Wechat,
  Qq,
  Baidu,
  Alipay,
  #[serde(alias = "bytedance")]
  Toutiao,
}

impl MiniProgramTarget {
  /// Environment variable consulted when no target is configured explicitly.
  pub const ENV_VAR: &'static str = "MINAPP_TARGET";

  pub fn from_name(name: &str) -> Option<Self> {
    match name {
      "wechat" => Some(Self::Wechat),
      "qq" => Some(Self::Qq),
      "baidu" => Some(Self::Baidu),
      "alipay" => Some(Self::Alipay),
      "toutiao" | "bytedance" => Some(Self::Toutiao),
      _ => None,
    }
  }

  pub fn from_env() -> Option<Self> {
    std::env::var(Self::ENV_VAR).ok().and_then(|name| Self::from_name(name.trim()))
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Wechat => "wechat",
      Self::Qq => "qq",
      Self::Baidu => "baidu",
      Self::Alipay => "alipay",
      Self::Toutiao => "toutiao",
    }
  }

  /// Native stylesheet extension of the platform. Changing one of these breaks the platform
  /// runtime, which only loads its own dialect.
  pub fn stylesheet_extension(self) -> &'static str {
    match self {
      Self::Wechat => "wxss",
      Self::Qq => "qss",
      Self::Baidu => "css",
      Self::Alipay => "acss",
      Self::Toutiao => "ttss",
    }
  }

  pub fn template_extension(self) -> &'static str {
    match self {
      Self::Wechat => "wxml",
      Self::Qq => "qml",
      Self::Baidu => "swan",
      Self::Alipay => "axml",
      Self::Toutiao => "ttml",
    }
  }
}

impl FromStr for MiniProgramTarget {
  type Err = anyhow::Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::from_name(s).ok_or_else(|| anyhow::anyhow!("Unknown mini program target `{s}`"))
  }
}

impl Display for MiniProgramTarget {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

#[test]
fn test_target_names() {
  assert_eq!("alipay".parse::<MiniProgramTarget>().unwrap(), MiniProgramTarget::Alipay);
  assert_eq!(MiniProgramTarget::from_name("bytedance"), Some(MiniProgramTarget::Toutiao));
  assert!("weibo".parse::<MiniProgramTarget>().is_err());
  assert_eq!(MiniProgramTarget::Qq.to_string(), "qq");

  let target: MiniProgramTarget = serde_json::from_str("\"bytedance\"").unwrap();
  assert_eq!(target, MiniProgramTarget::Toutiao);
}
