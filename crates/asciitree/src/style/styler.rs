//! Composition of glyphs, indentation, and text into tree lines.

use serde::{Deserialize, Deserializer, Serialize};

use super::{TreeStyle, ASCII_STYLE, LINE_STYLE};
use crate::error::TreeError;

/// Formats the individual lines of a rendered tree.
///
/// The renderer decides *which* of these applies to a line; the styler
/// decides what the line looks like. Child lines arrive already styled by
/// the deeper levels and are only prefixed here.
pub trait Styler {
    /// Styles a node label. Defaults to the unadorned label.
    fn node_label(&self, label: &str) -> String {
        label.to_string()
    }

    /// Styles a property text before it is positioned. Defaults to the
    /// unadorned property.
    fn property(&self, property: &str) -> String {
        property.to_string()
    }

    /// First line of a child that has following siblings.
    fn branched_node(&self, line: &str) -> String;

    /// First line of the last child.
    fn last_node(&self, line: &str) -> String;

    /// Further lines of a child that has following siblings.
    fn indent_line(&self, line: &str) -> String;

    /// Further lines of the last child.
    fn indent_line_last_node(&self, line: &str) -> String;

    /// A property of a node without children.
    fn property_leaf(&self, property: &str) -> String;

    /// A property of a node whose children follow below.
    fn property_children_following(&self, property: &str) -> String;
}

/// Glyphs plus indentation widths.
///
/// `child_indent` is the column width a child level adds (at least 2 for
/// sensible output); `prop_indent` is the width before a property marker
/// (at least 1). Smaller widths never fail, they just repeat nothing.
///
/// ```rust
/// use asciitree::{Styler, TreeStyler, ASCII_STYLE};
///
/// let styler = TreeStyler::with_indents(ASCII_STYLE, 4, 4);
/// assert_eq!(styler.branched_node("foo"), "+-- foo");
/// assert_eq!(styler.last_node("foo"), "`-- foo");
/// assert_eq!(styler.property_leaf("proo"), "    * proo");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeStyler {
    #[serde(deserialize_with = "deserialize_style")]
    pub style: TreeStyle,
    pub child_indent: usize,
    pub prop_indent: usize,
}

impl TreeStyler {
    /// Creates a styler with both indentations set to 3.
    pub fn new(style: TreeStyle) -> Self {
        Self::with_indents(style, 3, 3)
    }

    /// Creates a styler with explicit indentation widths.
    pub fn with_indents(style: TreeStyle, child_indent: usize, prop_indent: usize) -> Self {
        Self {
            style,
            child_indent,
            prop_indent,
        }
    }

    /// Plain ASCII styler.
    pub fn ascii() -> Self {
        Self::new(ASCII_STYLE)
    }

    /// Unicode line-drawing styler.
    pub fn line() -> Self {
        Self::new(LINE_STYLE)
    }

    /// Loads a styler from a YAML stylesheet.
    ///
    /// ```rust
    /// use asciitree::{TreeStyler, LINE_STYLE};
    ///
    /// let styler = TreeStyler::from_yaml("style: line\nchild_indent: 4\n").unwrap();
    /// assert_eq!(styler.style, LINE_STYLE);
    /// assert_eq!(styler.child_indent, 4);
    /// assert_eq!(styler.prop_indent, 3);
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<Self, TreeError> {
        serde_yaml::from_str(yaml).map_err(|e| TreeError::Config(e.to_string()))
    }

    /// Loads a styler from a JSON stylesheet.
    pub fn from_json(json: &str) -> Result<Self, TreeError> {
        serde_json::from_str(json).map_err(|e| TreeError::Config(e.to_string()))
    }

    fn connector(&self) -> String {
        repeat(&self.style.nodeconn, self.child_indent.saturating_sub(2))
    }
}

impl Default for TreeStyler {
    fn default() -> Self {
        Self::ascii()
    }
}

impl Styler for TreeStyler {
    fn branched_node(&self, line: &str) -> String {
        format!("{}{} {}", self.style.fork, self.connector(), line)
    }

    fn last_node(&self, line: &str) -> String {
        format!("{}{} {}", self.style.lastnode, self.connector(), line)
    }

    fn indent_line(&self, line: &str) -> String {
        format!(
            "{}{} {}",
            self.style.nofork,
            repeat(" ", self.child_indent.saturating_sub(2)),
            line
        )
    }

    fn indent_line_last_node(&self, line: &str) -> String {
        format!("{}{}", repeat(" ", self.child_indent), line)
    }

    fn property_leaf(&self, property: &str) -> String {
        format!(
            "{}{} {}",
            repeat(" ", self.prop_indent),
            self.style.property,
            property
        )
    }

    fn property_children_following(&self, property: &str) -> String {
        format!(
            "{}{}{} {}",
            self.style.nofork,
            repeat(" ", self.prop_indent.saturating_sub(1)),
            self.style.property,
            property
        )
    }
}

/// Named glyph sets accepted by stylesheets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StylePreset {
    Ascii,
    #[serde(alias = "unicode")]
    Line,
}

impl StylePreset {
    /// Returns the glyph set of this preset.
    pub fn style(self) -> TreeStyle {
        match self {
            StylePreset::Ascii => ASCII_STYLE,
            StylePreset::Line => LINE_STYLE,
        }
    }
}

/// A stylesheet's `style` entry: a preset name or an explicit glyph table.
#[derive(Deserialize)]
#[serde(untagged)]
enum StyleEntry {
    Preset(StylePreset),
    Glyphs(TreeStyle),
}

fn deserialize_style<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TreeStyle, D::Error> {
    Ok(match StyleEntry::deserialize(deserializer)? {
        StyleEntry::Preset(preset) => preset.style(),
        StyleEntry::Glyphs(style) => style,
    })
}

fn repeat(glyph: &str, count: usize) -> String {
    glyph.repeat(count)
}
