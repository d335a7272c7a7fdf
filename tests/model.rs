use netlistview::model::{LayoutNode, LayoutOptions};
use serde_json::json;

#[test]
fn options_read_strings_and_numbers() {
    let node = LayoutNode::from_json_str(
        &json!({
            "id": 7,
            "layoutOptions": {
                "celltype": "$and", "cellname": "u_and", "index-in-signal": 4,
                "location-path": 12, "font-size": "8.5"
            }
        })
        .to_string(),
    )
    .expect("parse");
    assert_eq!(node.id.as_deref(), Some("7"));
    let o = &node.layout_options;
    assert_eq!(o.cell_type(), "$and");
    assert_eq!(o.cell_name(), "u_and");
    assert_eq!(o.location_path(), "12");
    assert_eq!(o.integer("index-in-signal"), 4);
    assert_eq!(o.number("font-size"), Some(8.5));
    assert_eq!(o.src_location(), "");
    assert_eq!(o.integer("missing"), 0);
}

#[test]
fn integer_accepts_signed_strings() {
    let mut o = LayoutOptions::default();
    o.insert("a", "-12");
    o.insert("b", " 3 ");
    o.insert("c", "x");
    o.insert("d", 2.9);
    assert_eq!(o.integer("a"), -12);
    assert_eq!(o.integer("b"), 3);
    assert_eq!(o.integer("c"), 0);
    assert_eq!(o.integer("d"), 2);
}

#[test]
fn invalid_document_is_an_error() {
    assert!(LayoutNode::from_json_str("[1, 2").is_err());
    assert!(LayoutNode::from_json_str("42").is_err());
}

#[test]
fn null_and_missing_fields_default() {
    let node = LayoutNode::from_json_str(
        r#"{ "id": "root", "x": null, "children": null, "edges": [{ "sections": [{}] }] }"#,
    )
    .expect("parse");
    assert!(node.is_root());
    assert_eq!(node.x, 0.0);
    assert!(node.children.is_empty());
    assert_eq!(node.edges[0].sections.len(), 1);
    assert_eq!(node.edges[0].sections[0].end_point.x, 0.0);
}
