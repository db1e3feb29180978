//! @ai:module:intent Recognize `TODO(author): message` in a single comment line
//! @ai:module:layer domain
//! @ai:module:public_api TodoMatcher, TodoMatch
//! @ai:module:stateless true

use regex::Regex;

const TODO_PATTERN: &str = r"TODO\((.*)\): (.*)";

/// @ai:intent Author and message split out of one matched line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoMatch<'a> {
    pub author: &'a str,
    pub message: &'a str,
}

/// @ai:intent Line-local matcher for TODO annotations
///
/// The author is captured verbatim: it may be empty and, since the capture is
/// greedy, runs to the last `): ` on the line.
#[derive(Debug, Clone)]
pub struct TodoMatcher {
    re: Regex,
}

impl Default for TodoMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoMatcher {
    /// @ai:intent Compile the TODO pattern
    pub fn new() -> Self {
        Self {
            re: Regex::new(TODO_PATTERN).expect("Invalid regex"),
        }
    }

    /// @ai:intent Match one comment line; None means plain comment or continuation text
    /// @ai:example ("// TODO(amy): fix this") -> Some(amy, "fix this")
    /// @ai:example ("// fix this") -> None
    /// @ai:effects pure
    pub fn match_line<'a>(&self, text: &'a str) -> Option<TodoMatch<'a>> {
        let captures = self.re.captures(text)?;
        Some(TodoMatch {
            author: captures.get(1).map_or("", |m| m.as_str()),
            message: captures.get(2).map_or("", |m| m.as_str()),
        })
    }
}
