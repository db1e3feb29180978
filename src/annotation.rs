//! @ai:module:intent Define data structures for TODO annotations
//! @ai:module:layer domain
//! @ai:module:public_api Position, Location, Todo
//! @ai:module:stateless true

use serde::Serialize;
use std::path::PathBuf;

/// @ai:intent Opaque, totally ordered locator of a comment line
///
/// Orders by file index first, then by line, so positions compare the way
/// the files were visited. Resolve one to a path with
/// [`SourceSet::location`](crate::parser::SourceSet::location).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    file: usize,
    line: usize,
}

impl Position {
    /// @ai:intent Create a position from a file index and a 1-based line
    pub fn new(file: usize, line: usize) -> Self {
        Self { file, line }
    }

    pub fn file(&self) -> usize {
        self.file
    }

    pub fn line(&self) -> usize {
        self.line
    }
}

/// @ai:intent Represents a resolved source code location
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Location {
    pub file: PathBuf,
    pub line: usize,
}

impl Location {
    /// @ai:intent Create a new Location
    pub fn new(file: PathBuf, line: usize) -> Self {
        Self { file, line }
    }

    /// @ai:intent Base name of the file, used as the report's file label
    /// @ai:effects pure
    pub fn file_label(&self) -> String {
        self.file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file.display().to_string())
    }
}

/// @ai:intent A single `TODO(author): message` annotation
///
/// `position` and `author` are fixed once created; `message` only grows while
/// continuation lines of the same comment group are merged into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    position: Position,
    author: String,
    message: String,
}

impl Todo {
    /// @ai:intent Create a new annotation from a matched comment line
    pub fn new(position: Position, author: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            position,
            author: author.into(),
            message: message.into(),
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// @ai:intent Append continuation text verbatim, without a separator
    /// @ai:effects mutates self.message
    pub(crate) fn append(&mut self, continuation: &str) {
        self.message.push_str(continuation);
    }
}
