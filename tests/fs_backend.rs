use std::fs;

use camino::Utf8PathBuf;
use netlistview::backend::{FsSubgraphSource, SubgraphBackend};
use netlistview::identity::DiagramId;
use tempfile::tempdir;

#[test]
fn file_names_follow_hierarchy_path() {
    let src = FsSubgraphSource::new("/data");
    assert_eq!(src.file_for(""), Utf8PathBuf::from("/data/top.json"));
    assert_eq!(src.file_for("top cpu alu"), Utf8PathBuf::from("/data/top.cpu.alu.json"));
}

#[test]
fn reads_subgraph_documents() {
    let dir = tempdir().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 path");
    fs::write(root.join("top.cpu.json"), r#"{ "id": "root" }"#).expect("write subgraph");

    let src = FsSubgraphSource::new(&root);
    let id = DiagramId::new("top.json", "{}");
    assert_eq!(src.fetch_subgraph(id, "top cpu").unwrap(), r#"{ "id": "root" }"#);

    let err = src.fetch_subgraph(id, "top mem").unwrap_err();
    assert!(format!("{}", err).contains("top.mem.json"));
}
