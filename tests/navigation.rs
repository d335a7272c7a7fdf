use netlistview::model::{ElementKind, RenderElement};
use netlistview::navigation::{
    collect_hierarchy_paths, find_node_by_path, parent_path, path_segments, search_paths,
    strip_marker,
};

fn node(path: &str) -> RenderElement {
    RenderElement {
        kind: ElementKind::Node,
        hierarchy_path: path.to_string(),
        ..Default::default()
    }
}

#[test]
fn parent_and_segments() {
    assert_eq!(parent_path("top cpu alu"), "top cpu");
    assert_eq!(parent_path("top"), "");
    assert_eq!(parent_path(""), "");
    assert_eq!(path_segments("top  cpu").collect::<Vec<_>>(), vec!["top", "cpu"]);
}

#[test]
fn marker_is_stripped() {
    assert_eq!(strip_marker("top cpu~", '~'), "top cpu");
    assert_eq!(strip_marker("top cpu", '~'), "top cpu");
    assert_eq!(strip_marker("top tmp~~", '~'), "top tmp~");
}

#[test]
fn collect_and_find_paths() {
    let els = vec![
        node("top"),
        RenderElement {
            kind: ElementKind::Edge,
            hierarchy_path: "top net".to_string(),
            ..Default::default()
        },
        node("top cpu"),
        node(""),
        node("top cpu"),
    ];
    assert_eq!(collect_hierarchy_paths(&els), vec!["top", "top cpu"]);
    assert_eq!(find_node_by_path(&els, "top cpu"), Some(2));
    assert_eq!(find_node_by_path(&els, "top net"), None);
}

#[test]
fn search_on_last_segment() {
    let paths: Vec<String> = ["top", "top cpu", "top cpu alu", "top mem", "top cpu alu_ctl"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(search_paths(&paths, "ALU"), vec!["top cpu alu", "top cpu alu_ctl"]);
    // "top" only matches itself, not paths that merely start with it.
    assert_eq!(search_paths(&paths, "top"), vec!["top"]);
    assert!(search_paths(&paths, "  ").is_empty());
}

#[test]
fn search_results_are_capped() {
    let paths: Vec<String> = (0..50).map(|i| format!("top u{:02}", i)).collect();
    let found = search_paths(&paths, "u");
    assert_eq!(found.len(), 30);
    assert_eq!(found[0], "top u00");
}
