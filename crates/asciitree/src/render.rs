//! Recursive rendering of trees into text lines.

use log::trace;

use crate::error::TreeError;
use crate::style::{Styler, TreeStyler};
use crate::value::{Reflect, Value};
use crate::visitor::{Visitor, DEFAULT_VISITOR};

/// Renders a tree, or several trees, into a multi-line string.
///
/// `roots` can be a single node (a tagged record or a mapping), a sequence
/// of nodes, or a record or mapping holding the nodes in its `roots` role.
/// Every line, including the last, ends in `\n`; multiple roots follow each
/// other without blank lines.
///
/// Traversal recurses once per tree level. Data reachable from itself (only
/// possible through hand-written [`Record`](crate::Record) implementations)
/// recurses without bound.
///
/// # Errors
///
/// Fails without producing output if `roots` is not a roots value, if any
/// node is neither a record nor a mapping, or if a record shape is badly
/// tagged.
///
/// # Example
///
/// ```rust
/// use asciitree::{render, MapStructVisitor, TreeStyler};
/// use serde_json::json;
///
/// let tree = json!({
///     "label": "root",
///     "children": [{"label": "1"}, {"label": "2", "children": [{"label": "2.1"}]}],
/// });
///
/// let text = render(&tree, &MapStructVisitor::default(), &TreeStyler::ascii()).unwrap();
/// assert_eq!(text, "root\n+- 1\n`- 2\n   `- 2.1\n");
/// ```
pub fn render<R, V, S>(roots: &R, visitor: &V, styler: &S) -> Result<String, TreeError>
where
    R: Reflect + ?Sized,
    V: Visitor + ?Sized,
    S: Styler + ?Sized,
{
    render_value(roots.reflect(), visitor, styler)
}

/// Like [`render`], for an already reflected roots value.
pub fn render_value<V, S>(roots: Value<'_>, visitor: &V, styler: &S) -> Result<String, TreeError>
where
    V: Visitor + ?Sized,
    S: Styler + ?Sized,
{
    let lines = render_value_lines(roots, visitor, styler)?;
    let mut result = String::with_capacity(lines.iter().map(|line| line.len() + 1).sum());
    for line in lines {
        result.push_str(&line);
        result.push('\n');
    }
    Ok(result)
}

/// Renders all roots into their text lines, without line terminators.
pub fn render_lines<R, V, S>(roots: &R, visitor: &V, styler: &S) -> Result<Vec<String>, TreeError>
where
    R: Reflect + ?Sized,
    V: Visitor + ?Sized,
    S: Styler + ?Sized,
{
    render_value_lines(roots.reflect(), visitor, styler)
}

fn render_value_lines<V, S>(
    roots: Value<'_>,
    visitor: &V,
    styler: &S,
) -> Result<Vec<String>, TreeError>
where
    V: Visitor + ?Sized,
    S: Styler + ?Sized,
{
    let mut lines = Vec::new();
    for root in visitor.roots(roots)? {
        trace!("rendering root {}", root.type_name());
        lines.extend(render_subtree(&root, visitor, styler)?);
    }
    Ok(lines)
}

/// Renders the subtree starting at `node`.
///
/// Child subtrees are rendered first and then prefixed, because the first
/// line of a child and its further lines need different connectors, and the
/// last child is drawn differently from its siblings.
fn render_subtree<V, S>(node: &Value<'_>, visitor: &V, styler: &S) -> Result<Vec<String>, TreeError>
where
    V: Visitor + ?Sized,
    S: Styler + ?Sized,
{
    let node = visitor.get(node)?;
    let mut lines = vec![styler.node_label(node.label)];

    let has_children = !node.children.is_empty();
    for property in node.properties {
        let property = styler.property(property);
        lines.push(if has_children {
            styler.property_children_following(&property)
        } else {
            styler.property_leaf(&property)
        });
    }

    let last = node.children.len().saturating_sub(1);
    for (index, child) in node.children.iter().enumerate() {
        let mut child_lines = render_subtree(child, visitor, styler)?.into_iter();
        let is_last = index == last;
        if let Some(first) = child_lines.next() {
            lines.push(if is_last {
                styler.last_node(&first)
            } else {
                styler.branched_node(&first)
            });
        }
        for line in child_lines {
            lines.push(if is_last {
                styler.indent_line_last_node(&line)
            } else {
                styler.indent_line(&line)
            });
        }
    }

    Ok(lines)
}

/// Renders with plain ASCII line art and no sorting.
///
/// ```rust
/// use serde_json::json;
///
/// let tree = json!({"label": "root", "properties": ["pr"], "children": [{"label": "1"}]});
/// assert_eq!(asciitree::render_ascii(&tree).unwrap(), "root\n|  * pr\n`- 1\n");
/// ```
pub fn render_ascii<R: Reflect + ?Sized>(roots: &R) -> Result<String, TreeError> {
    render(roots, &DEFAULT_VISITOR, &TreeStyler::ascii())
}

/// Renders with Unicode box-drawing line art and no sorting.
pub fn render_unicode<R: Reflect + ?Sized>(roots: &R) -> Result<String, TreeError> {
    render(roots, &DEFAULT_VISITOR, &TreeStyler::line())
}
