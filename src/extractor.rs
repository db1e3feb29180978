//! @ai:module:intent Extract TODO annotations from parsed comment groups
//! @ai:module:layer application
//! @ai:module:public_api extract_todos, extract_group, todos_in, Scan
//! @ai:module:depends_on annotation, matcher, ordering, parser, error
//! @ai:module:stateless true

use crate::annotation::Todo;
use crate::error::Result;
use crate::matcher::TodoMatcher;
use crate::ordering::sort_todos;
use crate::parser::{parse_dir, CommentGroup, Package, ParseOptions, SourceSet};
use std::path::Path;

/// @ai:intent Sorted annotations of one package plus the resolver for their positions
#[derive(Debug, Clone, Default)]
pub struct Scan {
    pub sources: SourceSet,
    pub todos: Vec<Todo>,
}

/// @ai:intent Parse a package, extract its TODOs and sort them by author then position
/// @ai:pre path is a package directory
/// @ai:post result.todos is sorted; a parse failure returns Err and no annotations
/// @ai:effects fs:read
pub fn todos_in(path: &Path, options: &ParseOptions) -> Result<Scan> {
    let package = parse_dir(path, options).inspect_err(|e| {
        tracing::debug!("Failed to parse package {}: {}", path.display(), e);
    })?;

    let mut todos = extract_todos(&package, &TodoMatcher::new());
    sort_todos(&mut todos);

    tracing::info!(
        "Found {} TODOs in {} files",
        todos.len(),
        package.files.len()
    );

    Ok(Scan {
        sources: package.source_set(),
        todos,
    })
}

/// @ai:intent Extract annotations from every comment group of every file
/// @ai:post result is in file then group order, not sorted
/// @ai:effects pure
pub fn extract_todos(package: &Package, matcher: &TodoMatcher) -> Vec<Todo> {
    let mut todos = Vec::new();

    for file in &package.files {
        for group in &file.comment_groups {
            extract_group(group, matcher, &mut todos);
        }
    }

    todos
}

/// @ai:intent Extract annotations from one comment group, merging continuation lines
/// @ai:post non-matching lines are appended only to a TODO opened earlier in this group
/// @ai:effects mutates todos
pub fn extract_group(group: &CommentGroup, matcher: &TodoMatcher, todos: &mut Vec<Todo>) {
    // Index into `todos` of the TODO still open for continuation lines.
    let mut open: Option<usize> = None;

    for line in &group.lines {
        if let Some(found) = matcher.match_line(&line.text) {
            todos.push(Todo::new(line.position, found.author, found.message));
            open = Some(todos.len() - 1);
        } else if let Some(idx) = open {
            todos[idx].append(line.body());
        }
    }
}
