use std::{borrow::Cow, sync::LazyLock};

use regex::Regex;

// Module segments are snake_case, type names and associated items are not
static MODULE_SEGMENT_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\b[a-z_][a-z0-9_]*::").unwrap());

/// `std::any::type_name` with every module path dropped, generic arguments included.
pub fn pretty_type_name<T: ?Sized>() -> Cow<'static, str> {
  MODULE_SEGMENT_RE.replace_all(std::any::type_name::<T>(), "")
}

#[test]
fn test_pretty_type_name() {
  struct SplitChunksPlugin;
  trait Plugin {}

  assert_eq!(pretty_type_name::<SplitChunksPlugin>(), "SplitChunksPlugin");
  assert_eq!(pretty_type_name::<std::sync::Arc<dyn Plugin>>(), "Arc<dyn Plugin>");
  assert_eq!(pretty_type_name::<Option<std::string::String>>(), "Option<String>");
}
