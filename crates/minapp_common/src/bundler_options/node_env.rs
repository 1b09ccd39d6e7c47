use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeEnv {
  #[default]
  Development,
  Production,
}

impl NodeEnv {
  #[inline]
  pub fn is_development(self) -> bool {
    matches!(self, Self::Development)
  }
}

impl FromStr for NodeEnv {
  type Err = anyhow::Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "development" => Ok(Self::Development),
      "production" => Ok(Self::Production),
      _ => Err(anyhow::anyhow!("Unknown node env `{s}`")),
    }
  }
}

impl Display for NodeEnv {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Development => write!(f, "development"),
      Self::Production => write!(f, "production"),
    }
  }
}
