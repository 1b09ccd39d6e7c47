use thiserror::Error;

#[derive(Debug, Error)]
pub enum MinappError {
  /// A placeholder the configuration-assembly stage should have created is absent.
  #[error("The `{path}` in the bundler options must be set")]
  ConfigurationMissing { path: &'static str },

  #[error(
    "`app_config` not found for compiler #{compiler_id}. This might be an internal error in minapp."
  )]
  ManifestMissing { compiler_id: u32 },

  #[error("loader's query param `{param}` expected but not found")]
  InvocationParameterMissing { param: &'static str },

  #[error("Subpackage roots `{first}` and `{second}` overlap, roots must be distinct directories")]
  OverlappingSubpackages { first: String, second: String },

  #[error("Subpackage root `{root}` is reserved for the chunk shared across packages")]
  ReservedSubpackageRoot { root: String },

  #[error(
    "Runtime chunk name for entry `{entry}` was requested before the app config was available"
  )]
  RuntimeChunkUnresolved { entry: String },
}

#[test]
fn test_error_messages() {
  assert_eq!(
    MinappError::InvocationParameterMissing { param: "type" }.to_string(),
    "loader's query param `type` expected but not found"
  );
  assert_eq!(
    MinappError::OverlappingSubpackages { first: "sub".into(), second: "sub/inner".into() }
      .to_string(),
    "Subpackage roots `sub` and `sub/inner` overlap, roots must be distinct directories"
  );
  assert_eq!(
    MinappError::ReservedSubpackageRoot { root: "commons".into() }.to_string(),
    "Subpackage root `commons` is reserved for the chunk shared across packages"
  );
}
