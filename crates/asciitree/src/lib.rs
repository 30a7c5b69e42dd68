//! # asciitree - pretty-print trees as text
//!
//! Renders hierarchical data as indented text with line-art connectors,
//! the way `tree(1)` shows directories:
//!
//! ```text
//! root
//! │  • someprop: value
//! ├─ child 1
//! └─ child 2
//!       • foo
//! ```
//!
//! Trees are built from caller data in one of two forms:
//!
//! - **Tagged records**: structs deriving [`AsciiTree`], with members marked
//!   as `label`, `properties`, `children`, or `roots`. Roles can be promoted
//!   from embedded structs.
//! - **Mappings** with the well-known keys `label`, `properties`,
//!   `children`, and `roots`: `BTreeMap<String, _>`, `HashMap<String, _>`,
//!   and `serde_json` values.
//!
//! ## Quick start
//!
#![cfg_attr(feature = "derive", doc = "```rust")]
#![cfg_attr(not(feature = "derive"), doc = "```rust,ignore")]
//! use asciitree::{render, AsciiTree, MapStructVisitor, TreeStyler};
//!
//! #[derive(AsciiTree)]
//! struct Dir {
//!     #[asciitree(label)]
//!     name: String,
//!     #[asciitree(properties)]
//!     notes: Vec<String>,
//!     #[asciitree(children)]
//!     entries: Vec<Dir>,
//! }
//!
//! let dir = |name: &str, entries| Dir { name: name.into(), notes: vec![], entries };
//! let tree = Dir {
//!     notes: vec!["3 entries".into()],
//!     ..dir("src", vec![dir("main.rs", vec![]), dir("util", vec![dir("mod.rs", vec![])])])
//! };
//!
//! let text = render(&tree, &MapStructVisitor::new(true, true), &TreeStyler::ascii()).unwrap();
//! assert_eq!(text, "src\n|  * 3 entries\n+- main.rs\n`- util\n   `- mod.rs\n");
//! ```
//!
//! ## Pieces
//!
//! - [`Reflect`] and [`Value`]: borrowed views of caller data
//! - [`Shape`] and [`locate_roles`]: record introspection with a
//!   process-wide cache
//! - [`Visitor`] and [`MapStructVisitor`]: extraction of node data, with
//!   optional sorting
//! - [`Styler`] and [`TreeStyler`]: glyphs and indentation, loadable from
//!   YAML or JSON stylesheets
//! - [`render`], [`render_ascii`], [`render_unicode`]: the entry points
//!
//! Diagnostic logging goes through the [`log`](https://docs.rs/log) facade
//! at `debug` and `trace` level; nothing is printed unless the application
//! installs a logger.

extern crate self as asciitree;

mod error;
mod render;
mod shape;
mod style;
mod value;
mod visitor;

pub use error::TreeError;
pub use render::{render, render_ascii, render_lines, render_unicode, render_value};
pub use shape::{
    locate_roles, parse_tags, reset_shape_cache, FieldDef, Role, RoleLocations, Shape, ShapeCache,
    Shaped,
};
pub use style::{StylePreset, Styler, TreeStyle, TreeStyler, ASCII_STYLE, LINE_STYLE};
pub use value::{Mapping, Record, Reflect, Value};
pub use visitor::{MapStructVisitor, NodeData, Visitor, DEFAULT_VISITOR};

/// Derives [`Shaped`], [`Record`], and [`Reflect`] for a struct with named
/// fields.
///
/// Field attributes:
///
/// - `#[asciitree(label)]`, `#[asciitree(properties)]`,
///   `#[asciitree(children)]`, `#[asciitree(roots)]`: the role(s) the field
///   plays; several roles can be combined as `#[asciitree(label, roots)]`
/// - `#[asciitree(embed)]`: the field is itself a derived record whose roles
///   are promoted, unless this struct defines them directly
#[cfg(feature = "derive")]
pub use asciitree_macros::AsciiTree;
