//! Errors raised while introspecting and rendering trees.

use thiserror::Error;

use crate::shape::Role;

/// Error returned when a tree cannot be rendered.
///
/// None of these are transient: every variant describes malformed caller
/// data (a badly tagged record, a value that is not a node) or a broken
/// styler configuration. Rendering aborts on the first error and never
/// returns partial output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// A record shape assigns the same role twice at the same nesting level.
    #[error("double asciitree \"{role}\" tag for type {type_name}")]
    DuplicateRole {
        role: Role,
        type_name: &'static str,
    },

    /// A record shape carries tag values that are not roles.
    #[error("invalid asciitree tag(s) {} on field `{field}` of type {type_name}", .tags.join(", "))]
    InvalidTag {
        tags: Vec<String>,
        field: &'static str,
        type_name: &'static str,
    },

    /// A node is neither a record nor a mapping.
    #[error("unsupported asciitree node type {type_name}")]
    UnsupportedNode { type_name: &'static str },

    /// The roots value is neither a sequence, a record, nor a mapping.
    #[error("expecting roots to be a sequence, record, or mapping, but got {type_name}")]
    UnsupportedRoots { type_name: &'static str },

    /// A styler configuration could not be loaded.
    #[error("invalid tree styler configuration: {0}")]
    Config(String),
}
