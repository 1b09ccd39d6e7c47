/// Expands the `[name]` placeholder of a filename template.
pub fn render_filename(template: &str, name: &str) -> String {
  template.replace("[name]", name)
}

#[test]
fn test_render_filename() {
  assert_eq!(render_filename("[name].js", "a/commons"), "a/commons.js");
  assert_eq!(render_filename("static/[name].acss", "runtime"), "static/runtime.acss");
  assert_eq!(render_filename("bundle.js", "pages/index"), "bundle.js");
}
