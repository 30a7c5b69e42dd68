use std::collections::BTreeMap;

use asciitree::{render, StylePreset, TreeError, TreeStyle, TreeStyler, DEFAULT_VISITOR};
use serde_json::json;

fn sample() -> serde_json::Value {
    json!({
        "label": "root",
        "properties": ["pr"],
        "children": [{"label": "1", "properties": ["p1", "p2"]}],
    })
}

#[test]
fn test_plain_rendering_of_mapping() {
    let text = render(&sample(), &DEFAULT_VISITOR, &TreeStyler::default()).unwrap();
    assert_eq!(text, "root\n|  * pr\n`- 1\n      * p1\n      * p2\n");
}

#[test]
fn test_yaml_stylesheet_with_custom_glyphs() {
    let styler = TreeStyler::from_yaml(
        r#"
style:
  fork: "├"
  nodeconn: "╌"
  nofork: "│"
  lastnode: "╰"
  property: "◦"
child_indent: 4
prop_indent: 2
"#,
    )
    .unwrap();
    let text = render(&sample(), &DEFAULT_VISITOR, &styler).unwrap();
    assert_eq!(text, "root\n│ ◦ pr\n╰╌╌ 1\n      ◦ p1\n      ◦ p2\n");
}

#[test]
fn test_stylesheet_serialization() {
    let styler = TreeStyler::with_indents(StylePreset::Line.style(), 4, 2);
    insta::assert_json_snapshot!(styler, @r#"
    {
      "style": {
        "fork": "├",
        "nodeconn": "─",
        "nofork": "│",
        "lastnode": "└",
        "property": "•"
      },
      "child_indent": 4,
      "prop_indent": 2
    }
    "#);
}

#[test]
fn test_serialized_stylesheet_loads_back() {
    let styler = TreeStyler::with_indents(TreeStyle::default(), 5, 1);
    let json = serde_json::to_string(&styler).unwrap();
    assert_eq!(TreeStyler::from_json(&json).unwrap(), styler);
}

#[test]
fn test_broken_stylesheet() {
    let err = TreeStyler::from_yaml("child_indent: wide\n").unwrap_err();
    assert!(matches!(err, TreeError::Config(_)));
    assert!(err.to_string().starts_with("invalid tree styler configuration"));
}

#[test]
fn test_btreemap_nodes() {
    type Node = BTreeMap<String, serde_json::Value>;

    let mut child = Node::new();
    child.insert("label".into(), json!("leaf"));
    let mut root = Node::new();
    root.insert("label".into(), json!("tree"));
    root.insert("children".into(), json!([child]));

    let text = render(&root, &DEFAULT_VISITOR, &TreeStyler::line()).unwrap();
    assert_eq!(text, "tree\n└─ leaf\n");
}
