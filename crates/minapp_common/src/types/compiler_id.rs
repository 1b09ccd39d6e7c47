use std::{
  fmt::Display,
  sync::atomic::{AtomicU32, Ordering},
};

static NEXT_COMPILER_ID: AtomicU32 = AtomicU32::new(0);

/// Identity of one compiler, unique within the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompilerId(u32);

impl CompilerId {
  pub fn next() -> Self {
    Self(NEXT_COMPILER_ID.fetch_add(1, Ordering::Relaxed))
  }

  pub fn as_u32(self) -> u32 {
    self.0
  }
}

impl Display for CompilerId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "#{}", self.0)
  }
}

#[test]
fn test_compiler_ids_are_unique() {
  let first = CompilerId::next();
  let second = CompilerId::next();
  assert_ne!(first, second);
  assert_eq!(format!("{first}"), format!("#{}", first.as_u32()));
}
