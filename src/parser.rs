//! @ai:module:intent Parse a package directory into files of comment groups
//! @ai:module:layer application
//! @ai:module:public_api parse_dir, parse_source, Package, SourceFile, CommentGroup, CommentLine, SourceSet, ParseOptions
//! @ai:module:depends_on annotation, language, error
//! @ai:module:stateless true

use crate::annotation::{Location, Position};
use crate::error::{Error, Result};
use crate::language::{detect_language, CommentStyle, Language};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// @ai:intent Represents a single comment line with its raw text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentLine {
    /// Raw comment text, marker included.
    pub text: String,
    /// Byte length of the leading comment marker in `text`.
    pub marker_len: usize,
    pub position: Position,
}

/// @ai:intent Represents a block of comments on consecutive lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentGroup {
    pub lines: Vec<CommentLine>,
}

/// @ai:intent A parsed source file and its comment groups, in file order
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub language: Language,
    pub comment_groups: Vec<CommentGroup>,
}

/// @ai:intent All files parsed from one package directory
#[derive(Debug, Clone, Default)]
pub struct Package {
    pub path: PathBuf,
    pub files: Vec<SourceFile>,
}

/// @ai:intent Resolves positions back to file paths and lines
#[derive(Debug, Clone, Default)]
pub struct SourceSet {
    files: Vec<PathBuf>,
}

/// @ai:intent Which files of a package directory get parsed
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    pub include_hidden: bool,
    pub languages: Option<Vec<Language>>,
}

impl CommentLine {
    /// @ai:intent Comment text with the leading marker removed
    /// @ai:example ("// continued here", 2) -> " continued here"
    /// @ai:effects pure
    pub fn body(&self) -> &str {
        self.text.get(self.marker_len..).unwrap_or("")
    }
}

impl Package {
    /// @ai:intent Build the position resolver for this package's files
    pub fn source_set(&self) -> SourceSet {
        SourceSet {
            files: self.files.iter().map(|f| f.path.clone()).collect(),
        }
    }
}

impl SourceSet {
    /// @ai:intent Resolve a position to its file path and line
    /// @ai:effects pure
    pub fn location(&self, position: Position) -> Location {
        let file = self.files.get(position.file()).cloned().unwrap_or_default();
        Location::new(file, position.line())
    }
}

impl ParseOptions {
    /// @ai:intent Check if a language passes the configured filter
    /// @ai:effects pure
    pub fn accepts(&self, language: Language) -> bool {
        self.languages
            .as_ref()
            .map(|langs| langs.contains(&language))
            .unwrap_or(true)
    }
}

/// @ai:intent Parse every supported file directly inside a package directory
/// @ai:pre path is a readable directory
/// @ai:post files are in file-name order; file index i owns positions with file() == i
/// @ai:effects fs:read
pub fn parse_dir(path: &Path, options: &ParseOptions) -> Result<Package> {
    if !path.is_dir() {
        return Err(Error::NotADirectory(path.to_path_buf()));
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(path)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| Error::Walk {
            path: path.to_path_buf(),
            source,
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let file_path = entry.path();

        if !options.include_hidden && is_hidden(entry.file_name()) {
            tracing::debug!("Skipping hidden file {}", file_path.display());
            continue;
        }

        let Some(language) = detect_language(file_path) else {
            continue;
        };

        if !options.accepts(language) {
            tracing::debug!(
                "Skipping {} ({} not selected)",
                file_path.display(),
                language.name()
            );
            continue;
        }

        let content = std::fs::read_to_string(file_path).map_err(|e| Error::FileRead {
            path: file_path.to_path_buf(),
            source: e,
        })?;

        let comment_groups = parse_source(&content, language, files.len());
        tracing::debug!(
            "Parsed {}: {} comment groups",
            file_path.display(),
            comment_groups.len()
        );

        files.push(SourceFile {
            path: file_path.to_path_buf(),
            language,
            comment_groups,
        });
    }

    tracing::info!("Parsed {} files in {}", files.len(), path.display());

    Ok(Package {
        path: path.to_path_buf(),
        files,
    })
}

/// @ai:intent Split one file's text into comment groups
/// @ai:post a blank or code line ends the current group; a trailing comment is a group of its own
/// @ai:effects pure
pub fn parse_source(content: &str, language: Language, file_index: usize) -> Vec<CommentGroup> {
    let style = language.comment_style();
    let mut groups = Vec::new();
    let mut current = CommentGroup::default();
    let mut in_block = false;

    for (line_idx, line) in content.lines().enumerate() {
        let position = Position::new(file_index, line_idx + 1);
        let trimmed = line.trim();

        let scanned = if in_block {
            Some(continue_block_comment(trimmed, &style, position))
        } else {
            scan_comment(trimmed, &style, position)
        };

        match scanned {
            Some((comment, end)) => {
                current.lines.push(comment);
                in_block = end == CommentEnd::Open;

                if let CommentEnd::Code(code) = end {
                    flush_group(&mut current, &mut groups);
                    groups.extend(trailing_group(code, &style, position));
                }
            }
            None => {
                flush_group(&mut current, &mut groups);
                groups.extend(trailing_group(trimmed, &style, position));
            }
        }
    }

    flush_group(&mut current, &mut groups);
    groups
}

/// How a scanned comment line ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommentEnd<'a> {
    /// A block comment continues on the next line.
    Open,
    Closed,
    /// A block comment closed and code follows it on the same line.
    Code(&'a str),
}

impl<'a> CommentEnd<'a> {
    fn after_block(rest: &'a str) -> Self {
        let code = rest.trim();
        if code.is_empty() {
            CommentEnd::Closed
        } else {
            CommentEnd::Code(code)
        }
    }
}

fn flush_group(current: &mut CommentGroup, groups: &mut Vec<CommentGroup>) {
    if !current.lines.is_empty() {
        groups.push(std::mem::take(current));
    }
}

fn trailing_group(code: &str, style: &CommentStyle, position: Position) -> Option<CommentGroup> {
    trailing_comment(code, style, position).map(|comment| CommentGroup {
        lines: vec![comment],
    })
}

fn is_hidden(name: &OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

/// @ai:intent Recognize a line that starts with a comment
/// @ai:effects pure
fn scan_comment<'a>(
    line: &'a str,
    style: &CommentStyle,
    position: Position,
) -> Option<(CommentLine, CommentEnd<'a>)> {
    if let Some(marker) = style.line.iter().find(|m| line.starts_with(*m)) {
        let comment = CommentLine {
            text: line.to_string(),
            marker_len: marker.len(),
            position,
        };
        return Some((comment, CommentEnd::Closed));
    }

    let start = style.block_start.filter(|s| line.starts_with(s))?;
    let rest = &line[start.len()..];

    let (text, end) = match find_block_end(rest, style) {
        Some((end_idx, after)) => (
            &line[..start.len() + end_idx],
            CommentEnd::after_block(after),
        ),
        None => (line, CommentEnd::Open),
    };

    let comment = CommentLine {
        text: text.trim_end().to_string(),
        marker_len: start.len(),
        position,
    };
    Some((comment, end))
}

/// @ai:intent Read one physical line from inside an open block comment
/// @ai:effects pure
fn continue_block_comment<'a>(
    line: &'a str,
    style: &CommentStyle,
    position: Position,
) -> (CommentLine, CommentEnd<'a>) {
    let (text, end) = match find_block_end(line, style) {
        Some((end_idx, after)) => (
            line[..end_idx].trim_end(),
            CommentEnd::after_block(after),
        ),
        None => (line, CommentEnd::Open),
    };

    let marker_len = style
        .block_line_prefix
        .filter(|prefix| text.starts_with(prefix))
        .map(str::len)
        .unwrap_or(0);

    let comment = CommentLine {
        text: text.to_string(),
        marker_len,
        position,
    };
    (comment, end)
}

/// Index of the block terminator in `text`, and the text after it.
fn find_block_end<'a>(text: &'a str, style: &CommentStyle) -> Option<(usize, &'a str)> {
    let end = style.block_end?;
    let idx = text.find(end)?;
    Some((idx, &text[idx + end.len()..]))
}

/// @ai:intent Find a line comment after code, ignoring markers inside string and char literals
/// @ai:effects pure
fn trailing_comment(line: &str, style: &CommentStyle, position: Position) -> Option<CommentLine> {
    // Open string delimiter and whether backslash escapes apply inside it.
    let mut quote: Option<(char, bool)> = None;
    let mut escaped = false;
    let mut skip_to = 0;

    for (idx, ch) in line.char_indices() {
        if idx < skip_to {
            continue;
        }

        if let Some((delim, escapes)) = quote {
            if escaped {
                escaped = false;
            } else if escapes && ch == '\\' {
                escaped = true;
            } else if ch == delim {
                quote = None;
            }
            continue;
        }

        if let Some(&kind) = style.strings.iter().find(|(delim, _)| *delim == ch) {
            quote = Some(kind);
            continue;
        }

        if style.char_literals && ch == '\'' {
            if let Some(len) = char_literal_len(&line[idx..]) {
                skip_to = idx + len;
            }
            continue;
        }

        let rest = &line[idx..];
        if let Some(marker) = style.line.iter().find(|m| rest.starts_with(*m)) {
            return Some(CommentLine {
                text: rest.to_string(),
                marker_len: marker.len(),
                position,
            });
        }
    }

    None
}

/// @ai:intent Byte length of a char literal at the start of `text`
/// @ai:example ("'\"' // x") -> Some(3)
/// @ai:example ("'a str") -> None
/// @ai:effects pure
fn char_literal_len(text: &str) -> Option<usize> {
    let body = text.strip_prefix('\'')?;

    if let Some(escape) = body.strip_prefix('\\') {
        let first = escape.chars().next()?;
        let close = escape[first.len_utf8()..].find('\'')? + first.len_utf8();
        return Some(2 + close + 1);
    }

    // A lifetime has no closing quote right after its first char.
    let first = body.chars().next()?;
    body[first.len_utf8()..]
        .starts_with('\'')
        .then(|| 1 + first.len_utf8() + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn texts(group: &CommentGroup) -> Vec<&str> {
        group.lines.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn test_blank_and_code_lines_end_groups() {
        let source = "// a\n// b\n\n// c\nfunc f() {}\n// d\n";
        let groups = parse_source(source, Language::Go, 0);

        assert_eq!(groups.len(), 3);
        assert_eq!(texts(&groups[0]), vec!["// a", "// b"]);
        assert_eq!(texts(&groups[1]), vec!["// c"]);
        assert_eq!(texts(&groups[2]), vec!["// d"]);
        assert_eq!(groups[2].lines[0].position, Position::new(0, 6));
    }

    #[test]
    fn test_indented_comment_keeps_marker() {
        let groups = parse_source("\t// TODO(amy): fix this\n", Language::Go, 3);
        let line = &groups[0].lines[0];

        assert_eq!(line.text, "// TODO(amy): fix this");
        assert_eq!(line.body(), " TODO(amy): fix this");
        assert_eq!(line.position, Position::new(3, 1));
    }

    #[test]
    fn test_trailing_comment_is_its_own_group() {
        let source = "x := 1 // TODO(amy): later\n// next\n";
        let groups = parse_source(source, Language::Go, 0);

        assert_eq!(groups.len(), 2);
        assert_eq!(texts(&groups[0]), vec!["// TODO(amy): later"]);
        assert_eq!(texts(&groups[1]), vec!["// next"]);
    }

    #[test]
    fn test_marker_inside_string_is_not_a_comment() {
        let source = "url := \"http://example.com\"\n";
        assert!(parse_source(source, Language::Go, 0).is_empty());
    }

    #[test]
    fn test_block_comment_lines_share_a_group() {
        let source = "/* TODO(bob): one\n * two\n */\nfunc f() {}\n/* TODO(amy): single */\n";
        let groups = parse_source(source, Language::Go, 0);

        assert_eq!(groups.len(), 2);
        assert_eq!(texts(&groups[0]), vec!["/* TODO(bob): one", "* two", ""]);
        assert_eq!(groups[0].lines[1].body(), " two");
        assert_eq!(texts(&groups[1]), vec!["/* TODO(amy): single"]);
    }

    #[test]
    fn test_code_after_block_comment_ends_group() {
        let source = "/* TODO(amy): x */ var y = 1\n// unrelated doc\nfunc f() {}\n";
        let groups = parse_source(source, Language::Go, 0);

        assert_eq!(groups.len(), 2);
        assert_eq!(texts(&groups[0]), vec!["/* TODO(amy): x"]);
        assert_eq!(texts(&groups[1]), vec!["// unrelated doc"]);
    }

    #[test]
    fn test_code_after_multiline_block_close_ends_group() {
        let source = "/* TODO(amy): x\n */ var y = 1 // TODO(bob): y\n// unrelated doc\n";
        let groups = parse_source(source, Language::Go, 0);

        assert_eq!(groups.len(), 3);
        assert_eq!(texts(&groups[0]), vec!["/* TODO(amy): x", ""]);
        assert_eq!(texts(&groups[1]), vec!["// TODO(bob): y"]);
        assert_eq!(texts(&groups[2]), vec!["// unrelated doc"]);
    }

    #[test]
    fn test_rune_literal_does_not_hide_trailing_comment() {
        let groups = parse_source("c := '\"' // TODO(amy): x\n", Language::Go, 0);
        assert_eq!(texts(&groups[0]), vec!["// TODO(amy): x"]);

        let groups = parse_source("c := '\\'' // TODO(amy): y\n", Language::Go, 0);
        assert_eq!(texts(&groups[0]), vec!["// TODO(amy): y"]);
    }

    #[test]
    fn test_raw_and_template_strings_are_not_comments() {
        let go = "s := `see // TODO(a): b`\n";
        assert!(parse_source(go, Language::Go, 0).is_empty());

        let ts = "const s = `a // TODO(a): b`; // real\n";
        let groups = parse_source(ts, Language::TypeScript, 0);
        assert_eq!(texts(&groups[0]), vec!["// real"]);

        let py = "s = 'a # TODO(a): b'\n";
        assert!(parse_source(py, Language::Python, 0).is_empty());
    }

    #[test]
    fn test_rust_lifetime_is_not_a_char_literal() {
        let source = "fn f<'a>(s: &'a str) {} // TODO(amy): z\n";
        let groups = parse_source(source, Language::Rust, 0);
        assert_eq!(texts(&groups[0]), vec!["// TODO(amy): z"]);
    }

    #[test]
    fn test_char_literal_len() {
        assert_eq!(char_literal_len("'\"' // x"), Some(3));
        assert_eq!(char_literal_len("'\\n'"), Some(4));
        assert_eq!(char_literal_len("'a str"), None);
    }

    #[test]
    fn test_rust_doc_comment_marker() {
        let groups = parse_source("/// TODO(amy): docs\n//! more\n", Language::Rust, 0);
        let lines = &groups[0].lines;

        assert_eq!(lines[0].marker_len, 3);
        assert_eq!(lines[1].body(), " more");
    }

    #[test]
    fn test_python_hash_comments() {
        let source = "# TODO(amy): py\n#   indented\nx = 1\n";
        let groups = parse_source(source, Language::Python, 0);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].lines[1].body(), "   indented");
    }

    #[test]
    fn test_parse_dir_lists_package_files_in_name_order() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.go"), "// b\n").unwrap();
        fs::write(dir.path().join("a.go"), "// a\n").unwrap();
        fs::write(dir.path().join(".hidden.go"), "// hidden\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "// text\n").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("c.go"), "// c\n").unwrap();

        let package = parse_dir(dir.path(), &ParseOptions::default()).unwrap();
        let names: Vec<_> = package
            .files
            .iter()
            .map(|f| f.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["a.go", "b.go"]);
        assert_eq!(
            package.files[1].comment_groups[0].lines[0].position,
            Position::new(1, 1)
        );

        let set = package.source_set();
        assert_eq!(set.location(Position::new(1, 1)).file_label(), "b.go");
    }

    #[test]
    fn test_parse_dir_options() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".hidden.go"), "// hidden\n").unwrap();
        fs::write(dir.path().join("lib.rs"), "// rust\n").unwrap();

        let options = ParseOptions {
            include_hidden: true,
            languages: Some(vec![Language::Go]),
        };
        let package = parse_dir(dir.path(), &options).unwrap();

        assert_eq!(package.files.len(), 1);
        assert_eq!(package.files[0].language, Language::Go);
    }

    #[test]
    fn test_parse_dir_rejects_missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");

        let err = parse_dir(&missing, &ParseOptions::default()).unwrap_err();
        assert!(matches!(err, Error::NotADirectory(_)));
    }

    #[test]
    fn test_parse_dir_fails_on_unreadable_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("bad.go"), [0xff, 0xfe, 0x00]).unwrap();

        let err = parse_dir(dir.path(), &ParseOptions::default()).unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }));
    }
}
