//! @ai:module:intent whodo library for listing TODO(author) annotations by author
//! @ai:module:layer infrastructure
//! @ai:module:public_api annotation, config, error, extractor, language, matcher, ordering, output, parser
//! @ai:module:stateless true
//!
//! # whodo
//!
//! Scans the source files of one package directory for comments of the form
//! `TODO(author): message`, merges the comment lines that follow a TODO in the
//! same comment group into its message, and reports them sorted by author and
//! position, or counted per author.
//!
//! ## Example
//!
//! ```rust,no_run
//! use whodo::{extractor, output, ParseOptions};
//! use std::path::Path;
//!
//! let scan = extractor::todos_in(Path::new("src"), &ParseOptions::default()).unwrap();
//!
//! let rows = output::listing_rows(&scan.todos, &scan.sources);
//! print!("{}", output::format_listing(&rows, output::OutputFormat::Text, 4).unwrap());
//!
//! let counts = output::count_by_author(&scan.todos);
//! print!("{}", output::format_counts(&counts, output::OutputFormat::Text).unwrap());
//! ```

pub mod annotation;
pub mod config;
pub mod error;
pub mod extractor;
pub mod language;
pub mod matcher;
pub mod ordering;
pub mod output;
pub mod parser;

pub use annotation::{Location, Position, Todo};
pub use config::Config;
pub use error::{Error, Result};
pub use extractor::{extract_todos, todos_in, Scan};
pub use language::{detect_language, Language};
pub use matcher::{TodoMatch, TodoMatcher};
pub use ordering::{by_author_then_position, sort_todos};
pub use output::{
    count_by_author, format_counts, format_listing, listing_rows, AuthorCount, OutputFormat,
    TodoRow,
};
pub use parser::{
    parse_dir, parse_source, CommentGroup, CommentLine, Package, ParseOptions, SourceFile,
    SourceSet,
};
