//! @ai:module:intent Total order over annotations: author, then position
//! @ai:module:layer domain
//! @ai:module:public_api by_author_then_position, sort_todos
//! @ai:module:stateless true

use crate::annotation::Todo;
use std::cmp::Ordering;

/// @ai:intent Compare by author (byte-wise), then by source position
/// @ai:effects pure
pub fn by_author_then_position(a: &Todo, b: &Todo) -> Ordering {
    a.author()
        .cmp(b.author())
        .then_with(|| a.position().cmp(&b.position()))
}

/// @ai:intent Sort annotations in place for reporting
/// @ai:post adjacent entries never decrease by (author, position)
/// @ai:effects mutates todos
pub fn sort_todos(todos: &mut [Todo]) {
    todos.sort_by(by_author_then_position);
}
