use std::path::Path;

use sugar_path::SugarPath;

pub trait PathExt {
  fn expect_to_slash(&self) -> String;
}

impl PathExt for Path {
  fn expect_to_slash(&self) -> String {
    self
      .to_slash()
      .unwrap_or_else(|| panic!("Failed to convert {:?} to slash str", self.display()))
      .into_owned()
  }
}

/// Whether `name` (a module path or a chunk name) lives under the subpackage `root`.
///
/// An empty root is the main package and contains everything. Otherwise `name` must either equal
/// `root` or continue with a `/` right after it, so `sub2/a.js` is not part of `sub`.
pub fn belongs_to(name: &str, root: &str) -> bool {
  if root.is_empty() {
    return true;
  }
  name.strip_prefix(root).is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// Returns the extension of the last path segment including the leading dot, or `""`.
///
/// Dotfiles such as `.eslintrc` have no extension.
pub fn extname(path: &str) -> &str {
  let file_start = path.rfind(['/', '\\']).map_or(0, |idx| idx + 1);
  match path[file_start..].rfind('.') {
    Some(0) | None => "",
    Some(dot) => &path[file_start + dot..],
  }
}

/// Replaces the extension of `path` with `ext`, appending it when `path` has none.
pub fn replace_extension(path: &str, ext: &str) -> String {
  let base = &path[..path.len() - extname(path).len()];
  if ext.is_empty() || ext.starts_with('.') {
    format!("{base}{ext}")
  } else {
    format!("{base}.{ext}")
  }
}

#[test]
fn test_belongs_to() {
  assert!(belongs_to("sub/a.js", "sub"));
  assert!(belongs_to("sub", "sub"));
  assert!(belongs_to("sub/pages/index/index", "sub"));
  assert!(!belongs_to("sub2/a.js", "sub"));
  assert!(!belongs_to("pages/sub/a.js", "sub"));
  assert!(!belongs_to("su", "sub"));
  assert!(belongs_to("anything/at/all", ""));
  assert!(belongs_to("", ""));
}

#[test]
fn test_extname() {
  assert_eq!(extname("pages/index/index.wxss"), ".wxss");
  assert_eq!(extname("pages/index/index"), "");
  assert_eq!(extname("a.b/c"), "");
  assert_eq!(extname(".eslintrc"), "");
  assert_eq!(extname("dir/archive.tar.gz"), ".gz");
}

#[test]
fn test_replace_extension() {
  assert_eq!(replace_extension("pages/index/index.wxss", ".acss"), "pages/index/index.acss");
  assert_eq!(replace_extension("pages/index/index", ".js"), "pages/index/index.js");
  assert_eq!(replace_extension("a.b/c.css", "ttss"), "a.b/c.ttss");
  assert_eq!(replace_extension("app.json", ""), "app");
}

#[test]
fn test_expect_to_slash() {
  let path = Path::new("dist").join("wechat");
  assert_eq!(path.expect_to_slash(), "dist/wechat");
}
