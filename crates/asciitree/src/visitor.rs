//! Visitors extract labels, properties, and children from caller data.
//!
//! A [`Visitor`] does not traverse; it answers questions about single nodes
//! and about the top-level roots value. Traversal is the renderer's job.
//!
//! [`MapStructVisitor`] handles tagged records (through their cached role
//! locations) and mappings with the well-known keys `label`, `properties`,
//! `children`, and `roots`, optionally sorting nodes and properties.

use log::trace;

use crate::error::TreeError;
use crate::shape::{locate_roles, Role};
use crate::value::{Mapping, Record, Value};

/// The tree-relevant data of a single node.
#[derive(Debug, Clone, Default)]
pub struct NodeData<'a> {
    pub label: &'a str,
    pub properties: Vec<&'a str>,
    pub children: Vec<Value<'a>>,
}

/// Translates caller data into tree nodes.
pub trait Visitor {
    /// Resolves the top-level value into the ordered list of root nodes.
    fn roots<'a>(&self, roots: Value<'a>) -> Result<Vec<Value<'a>>, TreeError>;

    /// Returns the label of a node.
    fn label<'a>(&self, node: &Value<'a>) -> Result<&'a str, TreeError>;

    /// Returns the label, properties, and children of a node.
    fn get<'a>(&self, node: &Value<'a>) -> Result<NodeData<'a>, TreeError>;
}

/// Visitor for tagged records and mappings with well-known keys.
///
/// ```rust
/// use asciitree::{MapStructVisitor, Reflect, Visitor};
/// use serde_json::json;
///
/// let tree = json!({
///     "label": "root",
///     "properties": ["zeta", "alpha"],
///     "children": [{"label": "b"}, {"label": "a"}],
/// });
///
/// let visitor = MapStructVisitor::new(true, true);
/// let node = visitor.get(&tree.reflect()).unwrap();
/// assert_eq!(node.label, "root");
/// assert_eq!(node.properties, ["alpha", "zeta"]);
/// assert_eq!(visitor.label(&node.children[0]).unwrap(), "a");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MapStructVisitor {
    /// Sort children and roots by label.
    pub sort_nodes: bool,
    /// Sort properties.
    pub sort_properties: bool,
}

/// A visitor that keeps nodes and properties in their original order.
pub const DEFAULT_VISITOR: MapStructVisitor = MapStructVisitor {
    sort_nodes: false,
    sort_properties: false,
};

impl MapStructVisitor {
    /// Creates a visitor that optionally sorts nodes and their properties.
    pub fn new(sort_nodes: bool, sort_properties: bool) -> Self {
        Self {
            sort_nodes,
            sort_properties,
        }
    }

    /// Returns `nodes` stably sorted by label, if node sorting is enabled.
    fn sorted<'a>(&self, nodes: Vec<Value<'a>>) -> Result<Vec<Value<'a>>, TreeError> {
        if !self.sort_nodes {
            return Ok(nodes);
        }
        let mut labelled = nodes
            .into_iter()
            .map(|node| Ok((self.label(&node)?, node)))
            .collect::<Result<Vec<_>, TreeError>>()?;
        labelled.sort_by(|a, b| a.0.cmp(b.0));
        Ok(labelled.into_iter().map(|(_, node)| node).collect())
    }
}

impl Visitor for MapStructVisitor {
    fn roots<'a>(&self, roots: Value<'a>) -> Result<Vec<Value<'a>>, TreeError> {
        match roots {
            Value::List(items) => self.sorted(items),
            Value::Record(record) => {
                if locate_roles(record.shape())?.get(Role::Roots).is_none() {
                    return Ok(vec![roots]);
                }
                match member(record, Role::Roots)? {
                    // an empty roots member holds no trees
                    Value::Absent => Ok(Vec::new()),
                    inner => self.roots(inner),
                }
            }
            Value::Mapping(mapping) => match mapping.get(Role::Roots.as_str()) {
                None => Ok(vec![roots]),
                Some(Value::List(items)) => self.roots(Value::List(items)),
                // a null roots value stays a root and faults once rendered
                Some(single) => Ok(vec![single]),
            },
            other => Err(TreeError::UnsupportedRoots {
                type_name: other.type_name(),
            }),
        }
    }

    fn label<'a>(&self, node: &Value<'a>) -> Result<&'a str, TreeError> {
        let label = match node {
            Value::Record(record) => member(*record, Role::Label)?,
            Value::Mapping(mapping) => {
                let mapping: &'a dyn Mapping = *mapping;
                mapping.get(Role::Label.as_str()).unwrap_or(Value::Absent)
            }
            other => {
                return Err(TreeError::UnsupportedNode {
                    type_name: other.type_name(),
                })
            }
        };
        Ok(label.as_text().unwrap_or_default())
    }

    fn get<'a>(&self, node: &Value<'a>) -> Result<NodeData<'a>, TreeError> {
        let (label, properties, children) = match node {
            Value::Record(record) => (
                member(*record, Role::Label)?,
                member(*record, Role::Properties)?,
                member(*record, Role::Children)?,
            ),
            Value::Mapping(mapping) => {
                let mapping: &'a dyn Mapping = *mapping;
                let key = |role: Role| mapping.get(role.as_str()).unwrap_or(Value::Absent);
                (key(Role::Label), key(Role::Properties), key(Role::Children))
            }
            other => {
                return Err(TreeError::UnsupportedNode {
                    type_name: other.type_name(),
                })
            }
        };

        let mut properties: Vec<&'a str> = properties
            .into_list()
            .unwrap_or_default()
            .iter()
            .filter_map(Value::as_text)
            .collect();
        if self.sort_properties {
            properties.sort();
        }

        let children = self.sorted(children.into_list().unwrap_or_default())?;
        trace!(
            "visited {} with {} properties and {} children",
            node.type_name(),
            properties.len(),
            children.len()
        );

        Ok(NodeData {
            label: label.as_text().unwrap_or_default(),
            properties,
            children,
        })
    }
}

/// Reads the member playing `role` in `record`, or [`Value::Absent`].
fn member<'a>(record: &'a dyn Record, role: Role) -> Result<Value<'a>, TreeError> {
    let roles = locate_roles(record.shape())?;
    let Some((last, parents)) = roles.get(role).and_then(<[usize]>::split_last) else {
        return Ok(Value::Absent);
    };
    let mut current = record;
    for index in parents {
        match current.field(*index) {
            Value::Record(inner) => current = inner,
            _ => return Ok(Value::Absent),
        }
    }
    Ok(current.field(*last))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{FieldDef, Shape, Shaped};
    use crate::value::Reflect;
    use proptest::prelude::*;
    use serde_json::json;

    struct S {
        foo: String,
        baz: Vec<S>,
    }

    const S_FIELDS: &[FieldDef] = &[
        FieldDef::new("bar", ""),
        FieldDef::new("foo", "label"),
        FieldDef::new("baz", "children"),
    ];

    impl Shaped for S {
        const SHAPE: &'static Shape = &Shape::new::<S>("S", S_FIELDS);
    }

    impl Record for S {
        fn shape(&self) -> &'static Shape {
            Self::SHAPE
        }

        fn field(&self, index: usize) -> Value<'_> {
            match index {
                1 => self.foo.reflect(),
                2 => self.baz.reflect(),
                _ => Value::Absent,
            }
        }
    }

    impl Reflect for S {
        fn reflect(&self) -> Value<'_> {
            Value::Record(self)
        }
    }

    fn s(label: &str, children: Vec<S>) -> S {
        S {
            foo: label.to_string(),
            baz: children,
        }
    }

    /// A record whose label comes from an embedded record.
    struct Named {
        name: String,
    }

    const NAMED_FIELDS: &[FieldDef] = &[FieldDef::new("name", "label")];

    impl Shaped for Named {
        const SHAPE: &'static Shape = &Shape::new::<Named>("Named", NAMED_FIELDS);
    }

    impl Record for Named {
        fn shape(&self) -> &'static Shape {
            Self::SHAPE
        }

        fn field(&self, index: usize) -> Value<'_> {
            match index {
                0 => self.name.reflect(),
                _ => Value::Absent,
            }
        }
    }

    struct RS {
        base: Named,
        rootz: Vec<S>,
    }

    const RS_FIELDS: &[FieldDef] = &[
        FieldDef::embedded("base", Named::SHAPE),
        FieldDef::new("rootz", "roots"),
    ];

    impl Shaped for RS {
        const SHAPE: &'static Shape = &Shape::new::<RS>("RS", RS_FIELDS);
    }

    impl Record for RS {
        fn shape(&self) -> &'static Shape {
            Self::SHAPE
        }

        fn field(&self, index: usize) -> Value<'_> {
            match index {
                0 => Value::Record(&self.base),
                1 => self.rootz.reflect(),
                _ => Value::Absent,
            }
        }
    }

    struct Untagged;

    impl Shaped for Untagged {
        const SHAPE: &'static Shape = &Shape::new::<Untagged>("Untagged", &[]);
    }

    impl Record for Untagged {
        fn shape(&self) -> &'static Shape {
            Self::SHAPE
        }

        fn field(&self, _index: usize) -> Value<'_> {
            Value::Absent
        }
    }

    struct BadTag;

    const BAD_FIELDS: &[FieldDef] = &[FieldDef::new("fake", "foobar")];

    impl Shaped for BadTag {
        const SHAPE: &'static Shape = &Shape::new::<BadTag>("BadTag", BAD_FIELDS);
    }

    impl Record for BadTag {
        fn shape(&self) -> &'static Shape {
            Self::SHAPE
        }

        fn field(&self, _index: usize) -> Value<'_> {
            Value::Absent
        }
    }

    fn mapp() -> serde_json::Value {
        json!({
            "label": "root",
            "properties": ["someprop: value"],
            "children": [
                {"label": "child 3"},
                {"label": "child 2", "properties": ["foo", "bar"]},
                {"label": "child 1"},
            ],
        })
    }

    #[test]
    fn test_visits_record() {
        let tree = s("root", vec![s("2", vec![]), s("1", vec![])]);
        let node = DEFAULT_VISITOR.get(&tree.reflect()).unwrap();
        assert_eq!(node.label, "root");
        assert!(node.properties.is_empty());
        assert_eq!(node.children.len(), 2);
        assert_eq!(DEFAULT_VISITOR.label(&node.children[0]).unwrap(), "2");
        assert_eq!(DEFAULT_VISITOR.label(&tree.reflect()).unwrap(), "root");
    }

    #[test]
    fn test_visits_mapping() {
        let data = mapp();
        let node = DEFAULT_VISITOR.get(&data.reflect()).unwrap();
        assert_eq!(node.label, "root");
        assert_eq!(node.properties, ["someprop: value"]);
        assert_eq!(node.children.len(), 3);

        let child = DEFAULT_VISITOR.get(&node.children[1]).unwrap();
        assert_eq!(child.label, "child 2");
        assert_eq!(child.properties, ["foo", "bar"]);
    }

    #[test]
    fn test_untagged_record_is_empty_leaf() {
        let node = DEFAULT_VISITOR.get(&Value::Record(&Untagged)).unwrap();
        assert_eq!(node.label, "");
        assert!(node.properties.is_empty());
        assert!(node.children.is_empty());
        assert_eq!(DEFAULT_VISITOR.label(&Value::Record(&Untagged)).unwrap(), "");
    }

    #[test]
    fn test_label_from_embedded_record() {
        let rs = RS {
            base: Named {
                name: "embedded".to_string(),
            },
            rootz: vec![],
        };
        assert_eq!(DEFAULT_VISITOR.label(&Value::Record(&rs)).unwrap(), "embedded");
    }

    #[test]
    fn test_sorts_children_by_label() {
        let data = mapp();
        let visitor = MapStructVisitor::new(true, false);
        let node = visitor.get(&data.reflect()).unwrap();
        let labels: Vec<_> = node
            .children
            .iter()
            .map(|child| visitor.label(child).unwrap())
            .collect();
        assert_eq!(labels, ["child 1", "child 2", "child 3"]);
    }

    #[test]
    fn test_sorts_properties_without_touching_source() {
        let data = json!({"label": "x", "properties": ["foo", "bar"]});
        let node = MapStructVisitor::new(false, true)
            .get(&data.reflect())
            .unwrap();
        assert_eq!(node.properties, ["bar", "foo"]);
        assert_eq!(data["properties"], json!(["foo", "bar"]));
    }

    #[test]
    fn test_non_text_label_and_properties_are_ignored() {
        let data = json!({"label": 42, "properties": ["a", 1, "b"], "children": "nope"});
        let node = DEFAULT_VISITOR.get(&data.reflect()).unwrap();
        assert_eq!(node.label, "");
        assert_eq!(node.properties, ["a", "b"]);
        assert!(node.children.is_empty());
    }

    #[test]
    fn test_unsupported_node() {
        let err = DEFAULT_VISITOR.get(&42i64.reflect()).unwrap_err();
        assert_eq!(err, TreeError::UnsupportedNode { type_name: "i64" });
        let err = DEFAULT_VISITOR.label(&"text".reflect()).unwrap_err();
        assert_eq!(err, TreeError::UnsupportedNode { type_name: "str" });
    }

    #[test]
    fn test_invalid_tag_surfaces_from_get() {
        let err = DEFAULT_VISITOR.get(&Value::Record(&BadTag)).unwrap_err();
        assert!(matches!(err, TreeError::InvalidTag { .. }));
    }

    #[test]
    fn test_roots_unsupported() {
        let err = DEFAULT_VISITOR.roots(42i32.reflect()).unwrap_err();
        assert_eq!(err, TreeError::UnsupportedRoots { type_name: "i32" });
        assert!(DEFAULT_VISITOR.roots("text".reflect()).is_err());
    }

    #[test]
    fn test_roots_invalid_record_tag() {
        assert!(DEFAULT_VISITOR.roots(Value::Record(&BadTag)).is_err());
    }

    #[test]
    fn test_roots_of_single_mapping() {
        let data = mapp();
        let roots = DEFAULT_VISITOR.roots(data.reflect()).unwrap();
        assert_eq!(roots.len(), 1);
        assert_eq!(DEFAULT_VISITOR.label(&roots[0]).unwrap(), "root");
    }

    #[test]
    fn test_roots_of_mapping_list() {
        let data = json!([mapp()]);
        let roots = DEFAULT_VISITOR.roots(data.reflect()).unwrap();
        assert_eq!(roots.len(), 1);
    }

    #[test]
    fn test_roots_key_with_single_mapping() {
        let data = json!({"roots": mapp()});
        let roots = DEFAULT_VISITOR.roots(data.reflect()).unwrap();
        assert_eq!(roots.len(), 1);
        assert_eq!(DEFAULT_VISITOR.label(&roots[0]).unwrap(), "root");
    }

    #[test]
    fn test_roots_key_with_list() {
        let data = json!({"roots": [mapp(), {"label": "child 3"}]});
        let roots = DEFAULT_VISITOR.roots(data.reflect()).unwrap();
        let labels: Vec<_> = roots
            .iter()
            .map(|root| DEFAULT_VISITOR.label(root).unwrap())
            .collect();
        assert_eq!(labels, ["root", "child 3"]);
    }

    #[test]
    fn test_roots_key_list_is_sorted_when_enabled() {
        let data = json!({"roots": [{"label": "b"}, {"label": "a"}]});
        let visitor = MapStructVisitor::new(true, false);
        let roots = visitor.roots(data.reflect()).unwrap();
        assert_eq!(visitor.label(&roots[0]).unwrap(), "a");
    }

    #[test]
    fn test_roots_of_record_with_roots_member() {
        let tree = s("root", vec![s("2", vec![]), s("1", vec![])]);
        let rs = RS {
            base: Named {
                name: String::new(),
            },
            rootz: vec![tree, s("2", vec![])],
        };
        let roots = DEFAULT_VISITOR.roots(Value::Record(&rs)).unwrap();
        assert_eq!(roots.len(), 2);
        assert_eq!(DEFAULT_VISITOR.label(&roots[0]).unwrap(), "root");
        assert_eq!(DEFAULT_VISITOR.label(&roots[1]).unwrap(), "2");
    }

    #[test]
    fn test_roots_of_single_record() {
        let tree = s("root", vec![]);
        let roots = DEFAULT_VISITOR.roots(tree.reflect()).unwrap();
        assert_eq!(roots.len(), 1);
    }

    #[test]
    fn test_roots_of_absent_value() {
        let none: Option<S> = None;
        let err = DEFAULT_VISITOR.roots(none.reflect()).unwrap_err();
        assert_eq!(err, TreeError::UnsupportedRoots { type_name: "None" });
        assert!(DEFAULT_VISITOR.roots(json!(null).reflect()).is_err());
    }

    #[test]
    fn test_null_roots_key_is_not_the_container() {
        let data = json!({"label": "x", "roots": null});
        let roots = DEFAULT_VISITOR.roots(data.reflect()).unwrap();
        assert_eq!(roots.len(), 1);
        assert!(roots[0].is_absent());
        assert!(DEFAULT_VISITOR.get(&roots[0]).is_err());
    }

    struct MaybeRoots {
        rootz: Option<Vec<S>>,
    }

    const MAYBE_FIELDS: &[FieldDef] = &[FieldDef::new("rootz", "roots")];

    impl Shaped for MaybeRoots {
        const SHAPE: &'static Shape = &Shape::new::<MaybeRoots>("MaybeRoots", MAYBE_FIELDS);
    }

    impl Record for MaybeRoots {
        fn shape(&self) -> &'static Shape {
            Self::SHAPE
        }

        fn field(&self, index: usize) -> Value<'_> {
            match index {
                0 => self.rootz.reflect(),
                _ => Value::Absent,
            }
        }
    }

    #[test]
    fn test_absent_roots_member_holds_no_roots() {
        let empty = MaybeRoots { rootz: None };
        assert!(DEFAULT_VISITOR.roots(Value::Record(&empty)).unwrap().is_empty());

        let filled = MaybeRoots {
            rootz: Some(vec![s("a", vec![])]),
        };
        let roots = DEFAULT_VISITOR.roots(Value::Record(&filled)).unwrap();
        assert_eq!(DEFAULT_VISITOR.label(&roots[0]).unwrap(), "a");
    }

    proptest! {
        #[test]
        fn prop_node_sorting_is_stable(labels in prop::collection::vec("[ab]{0,2}", 0..12)) {
            let nodes: Vec<_> = labels
                .iter()
                .enumerate()
                .map(|(index, label)| json!({"label": label, "properties": [index.to_string()]}))
                .collect();
            let data = json!(nodes);
            let visitor = MapStructVisitor::new(true, false);
            let sorted = visitor.roots(data.reflect()).unwrap();

            let mut expected: Vec<(String, usize)> = labels.iter().cloned().zip(0..).collect();
            expected.sort_by(|a, b| a.0.cmp(&b.0));

            let actual: Vec<(String, usize)> = sorted
                .iter()
                .map(|node| {
                    let data = visitor.get(node).unwrap();
                    (data.label.to_string(), data.properties[0].parse().unwrap())
                })
                .collect();
            prop_assert_eq!(actual, expected);
        }
    }
}
