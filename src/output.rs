//! @ai:module:intent Format the TODO listing and per-author counts (text, JSON)
//! @ai:module:layer infrastructure
//! @ai:module:public_api OutputFormat, TodoRow, AuthorCount, listing_rows, count_by_author, format_listing, format_counts, to_json
//! @ai:module:depends_on annotation, parser
//! @ai:module:stateless true

use crate::annotation::Todo;
use crate::error::Result;
use crate::parser::SourceSet;
use serde::Serialize;

/// Default minimum width of the line-number column.
pub const DEFAULT_LINE_WIDTH: usize = 4;

/// @ai:intent Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    JsonPretty,
}

/// @ai:intent One row of the flat listing, with its position resolved
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TodoRow {
    pub author: String,
    pub file: String,
    pub line: usize,
    pub message: String,
}

/// @ai:intent Number of TODOs owned by one author
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AuthorCount {
    pub author: String,
    pub count: usize,
}

/// @ai:intent Resolve sorted annotations into listing rows
/// @ai:effects pure
pub fn listing_rows(todos: &[Todo], sources: &SourceSet) -> Vec<TodoRow> {
    todos
        .iter()
        .map(|todo| {
            let location = sources.location(todo.position());
            TodoRow {
                author: todo.author().to_string(),
                file: location.file_label(),
                line: location.line,
                message: todo.message().to_string(),
            }
        })
        .collect()
}

/// @ai:intent Count TODOs per author in one pass over an author-sorted list
/// @ai:pre todos is sorted by author
/// @ai:post one entry per author run, in list order; empty input gives no entries
/// @ai:effects pure
pub fn count_by_author(todos: &[Todo]) -> Vec<AuthorCount> {
    let mut counts: Vec<AuthorCount> = Vec::new();

    for todo in todos {
        match counts.last_mut() {
            Some(current) if current.author == todo.author() => current.count += 1,
            _ => counts.push(AuthorCount {
                author: todo.author().to_string(),
                count: 1,
            }),
        }
    }

    counts
}

/// @ai:intent Format the flat listing
/// @ai:effects pure
pub fn format_listing(
    rows: &[TodoRow],
    format: OutputFormat,
    line_width: usize,
) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(&rows, false),
        OutputFormat::JsonPretty => to_json(&rows, true),
        OutputFormat::Text => Ok(format_listing_text(rows, line_width)),
    }
}

/// @ai:intent Format the listing as aligned text columns
/// @ai:post every line is `author  file  line  "message"`; no rows gives ""
/// @ai:effects pure
fn format_listing_text(rows: &[TodoRow], line_width: usize) -> String {
    let author_width = rows.iter().map(|r| text_width(&r.author)).max().unwrap_or(0);
    let file_width = rows.iter().map(|r| text_width(&r.file)).max().unwrap_or(0);

    let mut output = String::new();

    for row in rows {
        output.push_str(&format!(
            "{:<author_width$}  {:<file_width$}  {:>line_width$}  {:?}\n",
            row.author, row.file, row.line, row.message,
        ));
    }

    output
}

/// @ai:intent Format per-author counts
/// @ai:effects pure
pub fn format_counts(counts: &[AuthorCount], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(&counts, false),
        OutputFormat::JsonPretty => to_json(&counts, true),
        OutputFormat::Text => Ok(format_counts_text(counts)),
    }
}

fn format_counts_text(counts: &[AuthorCount]) -> String {
    let width = counts.iter().map(|c| text_width(&c.author)).max().unwrap_or(0);

    let mut output = String::new();
    for entry in counts {
        output.push_str(&format!("{:>width$} {}\n", entry.author, entry.count));
    }
    output
}

// Padding in `format!` counts chars, so widths must too.
fn text_width(s: &str) -> usize {
    s.chars().count()
}

/// @ai:intent Format any serializable value as JSON
/// @ai:effects pure
pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::Position;
    use crate::error::Error;
    use crate::ordering::sort_todos;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn row(author: &str, file: &str, line: usize, message: &str) -> TodoRow {
        TodoRow {
            author: author.to_string(),
            file: file.to_string(),
            line,
            message: message.to_string(),
        }
    }

    fn todos(authors: &[&str]) -> Vec<Todo> {
        let mut todos: Vec<_> = authors
            .iter()
            .enumerate()
            .map(|(idx, author)| Todo::new(Position::new(0, idx + 1), *author, "m"))
            .collect();
        sort_todos(&mut todos);
        todos
    }

    #[test]
    fn test_single_row_listing() {
        let rows = vec![row("amy", "a.go", 5, "fix this")];
        assert_eq!(
            format_listing(&rows, OutputFormat::Text, DEFAULT_LINE_WIDTH).unwrap(),
            "amy  a.go     5  \"fix this\"\n"
        );
    }

    #[test]
    fn test_listing_columns_align() {
        let rows = vec![
            row("amy", "main.go", 12, "short"),
            row("bobby", "a.go", 1234, "long"),
        ];

        let expected = "\
amy    main.go    12  \"short\"
bobby  a.go     1234  \"long\"
";
        assert_eq!(format_listing(&rows, OutputFormat::Text, 4).unwrap(), expected);
    }

    #[test]
    fn test_listing_quotes_and_escapes_message() {
        let rows = vec![row("amy", "a.go", 1, "say \"hi\"\tnow")];
        assert_eq!(
            format_listing(&rows, OutputFormat::Text, 1).unwrap(),
            "amy  a.go  1  \"say \\\"hi\\\"\\tnow\"\n"
        );
    }

    #[test]
    fn test_counts_are_grouped_and_right_justified() {
        let counts = count_by_author(&todos(&["bob", "amy", "bob"]));

        assert_eq!(
            counts,
            vec![
                AuthorCount {
                    author: "amy".to_string(),
                    count: 1
                },
                AuthorCount {
                    author: "bob".to_string(),
                    count: 2
                },
            ]
        );
        assert_eq!(format_counts(&counts, OutputFormat::Text).unwrap(), "amy 1\nbob 2\n");
    }

    #[test]
    fn test_counts_pad_shorter_names() {
        let counts = count_by_author(&todos(&["jo", "alexandra", "jo"]));
        assert_eq!(
            format_counts(&counts, OutputFormat::Text).unwrap(),
            "alexandra 1\n       jo 2\n"
        );
    }

    #[test]
    fn test_empty_author_gets_its_own_count() {
        let counts = count_by_author(&todos(&["amy", ""]));

        assert_eq!(counts[0].author, "");
        assert_eq!(counts[0].count, 1);
        assert_eq!(format_counts(&counts, OutputFormat::Text).unwrap(), "    1\namy 1\n");
    }

    #[test]
    fn test_counts_sum_to_total() {
        let list = todos(&["c", "a", "b", "a", "c", "c"]);
        let counts = count_by_author(&list);

        assert_eq!(counts.iter().map(|c| c.count).sum::<usize>(), list.len());
        assert_eq!(counts.len(), 3);
    }

    #[test]
    fn test_empty_input_prints_nothing() {
        assert!(count_by_author(&[]).is_empty());
        assert_eq!(format_counts(&[], OutputFormat::Text).unwrap(), "");
        assert_eq!(format_listing(&[], OutputFormat::Text, 4).unwrap(), "");
        assert_eq!(format_listing(&[], OutputFormat::Json, 4).unwrap(), "[]");
    }

    #[test]
    fn test_json_listing() {
        let rows = vec![row("amy", "a.go", 5, "fix this")];
        assert_eq!(
            format_listing(&rows, OutputFormat::Json, 4).unwrap(),
            r#"[{"author":"amy","file":"a.go","line":5,"message":"fix this"}]"#
        );
    }

    #[test]
    fn test_json_errors_are_reported() {
        let mut map = BTreeMap::new();
        map.insert((1, 2), "non-string key");

        assert!(matches!(to_json(&map, false), Err(Error::Json(_))));
    }
}
