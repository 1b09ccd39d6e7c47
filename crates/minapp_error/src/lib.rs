mod minapp_error;

use std::ops::{Deref, DerefMut};

pub use crate::minapp_error::MinappError;

#[derive(Debug)]
pub struct BuildError(pub Vec<anyhow::Error>);

impl BuildError {
  /// Looks for a [`MinappError`] among the collected errors.
  pub fn downcast_ref(&self) -> Option<&MinappError> {
    self.0.iter().find_map(|error| error.downcast_ref::<MinappError>())
  }
}

impl Deref for BuildError {
  type Target = Vec<anyhow::Error>;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl DerefMut for BuildError {
  fn deref_mut(&mut self) -> &mut Self::Target {
    &mut self.0
  }
}

impl From<anyhow::Error> for BuildError {
  fn from(error: anyhow::Error) -> Self {
    Self(vec![error])
  }
}

impl From<Vec<anyhow::Error>> for BuildError {
  fn from(errors: Vec<anyhow::Error>) -> Self {
    Self(errors)
  }
}

impl From<MinappError> for BuildError {
  fn from(error: MinappError) -> Self {
    Self(vec![error.into()])
  }
}

pub type BuildResult<T> = anyhow::Result<T, BuildError>;

#[test]
fn test_build_error_keeps_minapp_error() {
  let error = BuildError::from(MinappError::ConfigurationMissing {
    path: "optimization.split_chunks.cache_groups",
  });
  assert_eq!(error.len(), 1);
  assert!(matches!(error.downcast_ref(), Some(MinappError::ConfigurationMissing { .. })));
}
