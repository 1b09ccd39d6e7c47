use std::{fmt::Debug, sync::Arc};

use arcstr::ArcStr;
use minapp_error::MinappError;
use parking_lot::RwLock;

pub const SHARED_RUNTIME_CHUNK_NAME: ArcStr = arcstr::literal!("runtime");

pub type RuntimeChunkNameFn = Arc<dyn Fn(&str) -> ArcStr + Send + Sync>;

#[derive(Clone, Default)]
enum RuntimeChunkNameState {
  #[default]
  Unresolved,
  Resolved(RuntimeChunkNameFn),
}

/// Indirection cell for the runtime chunk naming rule.
///
/// The options are assembled before the app config can be read, so they carry this cell in the
/// `Unresolved` state. The split chunks plugin swaps the naming function in on every compile pass.
/// Clones share the same cell.
#[derive(Clone, Default)]
pub struct RuntimeChunkName(Arc<RwLock<RuntimeChunkNameState>>);

impl RuntimeChunkName {
  pub fn placeholder() -> Self {
    Self::default()
  }

  /// Replaces the naming function. The previous one, if any, is dropped.
  pub fn resolve(&self, name_fn: impl Fn(&str) -> ArcStr + Send + Sync + 'static) {
    *self.0.write() = RuntimeChunkNameState::Resolved(Arc::new(name_fn));
  }

  pub fn is_resolved(&self) -> bool {
    matches!(&*self.0.read(), RuntimeChunkNameState::Resolved(_))
  }

  /// Name of the runtime chunk the entry point `entry` binds to.
  pub fn name_for(&self, entry: &str) -> Result<ArcStr, MinappError> {
    let name_fn = match &*self.0.read() {
      RuntimeChunkNameState::Resolved(name_fn) => Arc::clone(name_fn),
      RuntimeChunkNameState::Unresolved => {
        return Err(MinappError::RuntimeChunkUnresolved { entry: entry.to_string() })
      }
    };
    Ok(name_fn(entry))
  }
}

impl Debug for RuntimeChunkName {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let state = if self.is_resolved() { "Resolved" } else { "Unresolved" };
    f.debug_tuple("RuntimeChunkName").field(&state).finish()
  }
}

#[test]
fn test_placeholder_is_unresolved_until_resolved() {
  let placeholder = RuntimeChunkName::placeholder();
  let installed = placeholder.clone();
  assert!(!installed.is_resolved());
  assert!(matches!(
    installed.name_for("pages/index"),
    Err(MinappError::RuntimeChunkUnresolved { entry }) if entry == "pages/index"
  ));

  placeholder.resolve(|_| SHARED_RUNTIME_CHUNK_NAME);
  assert!(installed.is_resolved());
  assert_eq!(installed.name_for("pages/index").unwrap(), "runtime");

  placeholder.resolve(|entry| ArcStr::from(format!("{entry}/runtime")));
  assert_eq!(installed.name_for("a").unwrap(), "a/runtime");
  assert_eq!(format!("{installed:?}"), "RuntimeChunkName(\"Resolved\")");
}
