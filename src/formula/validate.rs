//! Textual deny-list applied to raw formula text before anything else.
//!
//! This is a defense-in-depth filter only. The real boundary is that the
//! compiled tree can name nothing outside the fixed variable, constant and
//! function tables.

/// What has to follow a denied keyword for it to count as a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Follow {
  /// Optional whitespace, then `(`
  Call,
  /// At least one whitespace character
  Space,
  /// Matches anywhere
  Anything,
}

struct DeniedPattern {
  keyword: &'static str,
  follow: Follow,
  display: &'static str,
}

const fn denied(
  keyword: &'static str,
  follow: Follow,
  display: &'static str,
) -> DeniedPattern {
  DeniedPattern {
    keyword,
    follow,
    display,
  }
}

const DENY_LIST: &[DeniedPattern] = &[
  denied("while", Follow::Call, "while("),
  denied("for", Follow::Call, "for("),
  denied("function", Follow::Call, "function("),
  denied("eval", Follow::Call, "eval("),
  denied("new", Follow::Space, "new "),
  denied("import", Follow::Space, "import "),
  denied("require", Follow::Call, "require("),
  denied("document.", Follow::Anything, "document."),
  denied("window.", Follow::Anything, "window."),
  denied("global.", Follow::Anything, "global."),
  denied("process.", Follow::Anything, "process."),
  denied("constructor", Follow::Anything, "constructor"),
  denied("prototype", Follow::Anything, "prototype"),
  denied("__proto__", Follow::Anything, "__proto__"),
  denied("return", Follow::Space, "return "),
];

/// `true` when the text contains none of the denied patterns.
pub fn validate(text: &str) -> bool {
  find_unsafe_pattern(text).is_none()
}

/// The first denied pattern found in `text`, in deny-list order.
pub fn find_unsafe_pattern(text: &str) -> Option<&'static str> {
  DENY_LIST
    .iter()
    .find(|pattern| matches_anywhere(text, pattern))
    .map(|pattern| pattern.display)
}

fn matches_anywhere(text: &str, pattern: &DeniedPattern) -> bool {
  text.match_indices(pattern.keyword).any(|(start, keyword)| {
    let rest = &text[start + keyword.len()..];
    match pattern.follow {
      Follow::Anything => true,
      Follow::Space => rest.starts_with(char::is_whitespace),
      Follow::Call => rest.trim_start().starts_with('('),
    }
  })
}
