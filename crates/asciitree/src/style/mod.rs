//! Line-art glyphs and the styler that positions them.
//!
//! - [`TreeStyle`]: the five glyphs used to draw branches and properties
//! - [`ASCII_STYLE`] and [`LINE_STYLE`]: the built-in glyph sets
//! - [`Styler`]: how the renderer turns labels, properties, and child lines
//!   into positioned text
//! - [`TreeStyler`]: the standard [`Styler`], configurable with indentation
//!   widths and loadable from YAML or JSON

mod styler;

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

pub use styler::{StylePreset, Styler, TreeStyler};

/// The glyphs used for painting a tree.
///
/// "ASCII" is used loosely here: the glyphs can be any text, including
/// Unicode box-drawing characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeStyle {
    /// Forks off an intermediate child, such as `├`.
    pub fork: Cow<'static, str>,
    /// Connects a branch to its node, such as `─`.
    pub nodeconn: Cow<'static, str>,
    /// Continues a vertical branch past a node, such as `│`.
    pub nofork: Cow<'static, str>,
    /// Ends a vertical branch at the last child, such as `└`.
    pub lastnode: Cow<'static, str>,
    /// Marks a property, such as `•`.
    pub property: Cow<'static, str>,
}

/// Pure ASCII glyphs, without any line or box characters.
pub const ASCII_STYLE: TreeStyle = TreeStyle {
    fork: Cow::Borrowed("+"),
    nodeconn: Cow::Borrowed("-"),
    nofork: Cow::Borrowed("|"),
    lastnode: Cow::Borrowed("`"),
    property: Cow::Borrowed("*"),
};

/// Unicode line-drawing glyphs.
pub const LINE_STYLE: TreeStyle = TreeStyle {
    fork: Cow::Borrowed("├"),
    nodeconn: Cow::Borrowed("─"),
    nofork: Cow::Borrowed("│"),
    lastnode: Cow::Borrowed("└"),
    property: Cow::Borrowed("•"),
};

impl Default for TreeStyle {
    fn default() -> Self {
        ASCII_STYLE
    }
}
