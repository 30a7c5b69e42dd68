//! Record shapes and the roles their members play.
//!
//! A [`Shape`] is the static description of a record type: its members in
//! declaration order, the raw role tags on each member, and which members
//! are embedded records whose roles are promoted into the outer record.
//! Shapes are usually generated by `#[derive(AsciiTree)]`, but they can be
//! written by hand:
//!
//! ```rust
//! use asciitree::{FieldDef, Shape, Shaped};
//!
//! struct Dir {
//!     name: String,
//!     entries: Vec<Dir>,
//! }
//!
//! const DIR_FIELDS: &[FieldDef] = &[
//!     FieldDef::new("name", "label"),
//!     FieldDef::new("entries", "children"),
//! ];
//!
//! impl Shaped for Dir {
//!     const SHAPE: &'static Shape = &Shape::new::<Dir>("Dir", DIR_FIELDS);
//! }
//! ```
//!
//! Tags are only validated when a shape is first located through the
//! [`ShapeCache`], never when it is declared.

mod cache;

use std::any::TypeId;
use std::fmt;
use std::str::FromStr;

pub use cache::{locate_roles, reset_shape_cache, RoleLocations, ShapeCache};

/// The semantic role a record member or mapping key plays in a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// The node's label text.
    Label,
    /// The node's ordered property texts.
    Properties,
    /// The node's ordered child nodes.
    Children,
    /// The ordered root nodes, only meaningful at the top level.
    Roots,
}

impl Role {
    /// All roles, in the order they are reported.
    pub const ALL: [Role; 4] = [Role::Label, Role::Properties, Role::Children, Role::Roots];

    /// Returns the tag and mapping-key spelling of this role.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Label => "label",
            Role::Properties => "properties",
            Role::Children => "children",
            Role::Roots => "roots",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "label" => Ok(Role::Label),
            "properties" => Ok(Role::Properties),
            "children" => Ok(Role::Children),
            "roots" => Ok(Role::Roots),
            other => Err(other.to_string()),
        }
    }
}

/// Splits a comma-separated role tag into roles.
///
/// Blank items are ignored. If any item is not a role, returns every
/// invalid item (and only those) as the error.
///
/// ```rust
/// use asciitree::{parse_tags, Role};
///
/// assert_eq!(parse_tags("children, roots"), Ok(vec![Role::Children, Role::Roots]));
/// assert_eq!(parse_tags(""), Ok(vec![]));
/// assert_eq!(parse_tags("label,foo,bar"), Err(vec!["foo".into(), "bar".into()]));
/// ```
pub fn parse_tags(tags: &str) -> Result<Vec<Role>, Vec<String>> {
    let mut roles = Vec::new();
    let mut invalid = Vec::new();
    for item in tags.split(',').map(str::trim).filter(|item| !item.is_empty()) {
        match item.parse::<Role>() {
            Ok(role) => roles.push(role),
            Err(bad) => invalid.push(bad),
        }
    }
    if invalid.is_empty() {
        Ok(roles)
    } else {
        Err(invalid)
    }
}

/// Static description of a record type.
#[derive(Debug)]
pub struct Shape {
    /// Identity of the described type; the cache key.
    pub type_id: fn() -> TypeId,
    /// Name used in diagnostics.
    pub type_name: &'static str,
    /// Members in declaration order.
    pub fields: &'static [FieldDef],
}

impl Shape {
    /// Describes the record type `T`.
    pub const fn new<T: 'static>(type_name: &'static str, fields: &'static [FieldDef]) -> Self {
        Shape {
            type_id: TypeId::of::<T>,
            type_name,
            fields,
        }
    }

    /// Returns the identity of the described type.
    pub fn id(&self) -> TypeId {
        (self.type_id)()
    }
}

/// One member of a record [`Shape`].
#[derive(Debug)]
pub struct FieldDef {
    /// Member name, for diagnostics.
    pub name: &'static str,
    /// Raw comma-separated role tags; empty for untagged members.
    pub tags: &'static str,
    /// Shape of an embedded record whose roles are promoted.
    pub embed: Option<&'static Shape>,
}

impl FieldDef {
    /// A plain member with the given raw role tags.
    pub const fn new(name: &'static str, tags: &'static str) -> Self {
        FieldDef {
            name,
            tags,
            embed: None,
        }
    }

    /// An embedded record member.
    pub const fn embedded(name: &'static str, shape: &'static Shape) -> Self {
        FieldDef {
            name,
            tags: "",
            embed: Some(shape),
        }
    }

    /// Adds raw role tags to this member.
    pub const fn with_tags(mut self, tags: &'static str) -> Self {
        self.tags = tags;
        self
    }
}

/// Types with a compile-time [`Shape`].
///
/// Separate from [`Record`](crate::Record) so that `Record` stays usable as
/// a trait object while embedded shapes can still be referenced in
/// constants.
pub trait Shaped {
    const SHAPE: &'static Shape;
}
