//! @ai:module:intent Define language-specific comment formats
//! @ai:module:layer domain
//! @ai:module:public_api Language, CommentStyle, detect_language
//! @ai:module:stateless true

use crate::error::{Error, Result};
use std::path::Path;
use std::str::FromStr;

/// @ai:intent Represents a supported programming language with its comment syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Rust,
    Python,
    TypeScript,
    JavaScript,
    Go,
    Java,
    C,
    Cpp,
}

/// @ai:intent Comment markers for a language
#[derive(Debug, Clone)]
pub struct CommentStyle {
    /// Line markers, longest first so `///` wins over `//`.
    pub line: &'static [&'static str],
    pub block_start: Option<&'static str>,
    pub block_end: Option<&'static str>,
    pub block_line_prefix: Option<&'static str>,
    /// String delimiters, each with whether backslash escapes apply inside it.
    pub strings: &'static [(char, bool)],
    /// `'` opens a character literal (or a lifetime) rather than a string.
    pub char_literals: bool,
}

const ALL_LANGUAGES: [Language; 8] = [
    Language::Rust,
    Language::Python,
    Language::TypeScript,
    Language::JavaScript,
    Language::Go,
    Language::Java,
    Language::C,
    Language::Cpp,
];

const SLASH_STYLE: CommentStyle = CommentStyle {
    line: &["//"],
    block_start: Some("/*"),
    block_end: Some("*/"),
    block_line_prefix: Some("*"),
    strings: &[('"', true)],
    char_literals: true,
};

impl Language {
    /// @ai:intent Get the comment style for this language
    /// @ai:effects pure
    pub fn comment_style(&self) -> CommentStyle {
        match self {
            Language::Rust => CommentStyle {
                line: &["///", "//!", "//"],
                ..SLASH_STYLE
            },
            Language::Python => CommentStyle {
                line: &["#"],
                block_start: Some("\"\"\""),
                block_end: Some("\"\"\""),
                block_line_prefix: None,
                strings: &[('"', true), ('\'', true)],
                char_literals: false,
            },
            Language::TypeScript | Language::JavaScript => CommentStyle {
                strings: &[('"', true), ('\'', true), ('`', true)],
                char_literals: false,
                ..SLASH_STYLE
            },
            Language::Go => CommentStyle {
                strings: &[('"', true), ('`', false)],
                ..SLASH_STYLE
            },
            Language::Java | Language::C | Language::Cpp => SLASH_STYLE,
        }
    }

    /// @ai:intent Get file extensions for this language
    /// @ai:effects pure
    pub fn extensions(&self) -> &[&str] {
        match self {
            Language::Rust => &["rs"],
            Language::Python => &["py", "pyi"],
            Language::TypeScript => &["ts", "tsx"],
            Language::JavaScript => &["js", "jsx", "mjs"],
            Language::Go => &["go"],
            Language::Java => &["java"],
            Language::C => &["c", "h"],
            Language::Cpp => &["cpp", "cc", "cxx", "hpp", "hh", "hxx"],
        }
    }

    /// @ai:intent Get language name as string
    /// @ai:effects pure
    pub fn name(&self) -> &'static str {
        match self {
            Language::Rust => "rust",
            Language::Python => "python",
            Language::TypeScript => "typescript",
            Language::JavaScript => "javascript",
            Language::Go => "go",
            Language::Java => "java",
            Language::C => "c",
            Language::Cpp => "cpp",
        }
    }
}

impl FromStr for Language {
    type Err = Error;

    /// @ai:intent Parse a language name as written in the config file
    /// @ai:example ("Go") -> Ok(Go)
    /// @ai:example ("cobol") -> Err(UnknownLanguage)
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        ALL_LANGUAGES
            .into_iter()
            .find(|lang| lang.name() == wanted)
            .ok_or_else(|| Error::UnknownLanguage(s.to_string()))
    }
}

/// @ai:intent Detect the programming language from a file path
/// @ai:pre path is a valid file path
/// @ai:post result is Some if extension is recognized
/// @ai:example ("main.go") -> Some(Go)
/// @ai:example ("test.py") -> Some(Python)
/// @ai:example ("test.txt") -> None
/// @ai:effects pure
pub fn detect_language(path: &Path) -> Option<Language> {
    let ext = path.extension()?.to_str()?;
    ALL_LANGUAGES
        .into_iter()
        .find(|lang| lang.extensions().contains(&ext))
}
