use super::*;
use mathviz::formula::find_unsafe_pattern;

#[test]
fn plain_math_is_accepted() {
  for formula in [
    "A * sin(x + ω*t) * cos(y - ω*t)",
    "exp(-(x^2 + y^2) / 4)",
    "x % 2 + floor(y)",
    "format",
  ] {
    assert!(validate(formula), "{formula}");
  }
}

#[test]
fn call_patterns() {
  assert_eq!(find_unsafe_pattern("eval(x)"), Some("eval("));
  assert_eq!(find_unsafe_pattern("for (;;)"), Some("for("));
  assert_eq!(find_unsafe_pattern("require ('fs')"), Some("require("));
  assert_eq!(find_unsafe_pattern("function(){}"), Some("function("));
}

#[test]
fn keyword_patterns_need_trailing_whitespace() {
  assert_eq!(find_unsafe_pattern("import x"), Some("import "));
  assert_eq!(find_unsafe_pattern("return 1"), Some("return "));
  assert!(validate("newton"));
  assert!(validate("x + returns"));
}

#[test]
fn member_access_patterns() {
  for text in ["window.alert", "document.body", "global.x", "process.env"] {
    assert!(!validate(text), "{text}");
  }
  assert!(!validate("x.__proto__"));
  assert!(!validate("a.prototype"));
}

#[test]
fn every_unsafe_text_fails_to_compile() {
  for text in ["eval(1)", "x + window.y", "prototype", "import os"] {
    assert!(!validate(text));
    assert!(compile(text).unwrap_err().is_unsafe());
  }
}
