use netlistview::identity::{DiagramId, one_at_a_time};

#[test]
fn one_at_a_time_known_values() {
    assert_eq!(one_at_a_time(b""), 0);
    assert_eq!(one_at_a_time(b"a"), 0xca2e_9442);
    assert_eq!(
        one_at_a_time(b"The quick brown fox jumps over the lazy dog"),
        0x519e_91f5
    );
}

#[test]
fn identity_packs_path_and_content_hashes() {
    let id = DiagramId::new("/a/b.json", "{}");
    assert_eq!(id.path_hash(), 0x0a22_6b97);
    assert_eq!(id.content_hash(), 0xe788_44ea);
    assert_eq!(id, DiagramId(0x0a22_6b97_e788_44ea));
    assert_eq!(id.to_string(), "0a226b97e78844ea");
}

#[test]
fn identity_changes_with_content() {
    let a = DiagramId::new("/a/b.json", "{}");
    let b = DiagramId::new("/a/b.json", "{ }");
    assert_eq!(a.path_hash(), b.path_hash());
    assert_ne!(a, b);
    assert_eq!(b.content_hash(), 0x83b8_9a13);
}

#[test]
fn identity_changes_with_path() {
    let a = DiagramId::new("/a/b.json", "{}");
    let b = DiagramId::new("/a/c.json", "{}");
    assert_ne!(a.path_hash(), b.path_hash());
    assert_eq!(a.content_hash(), b.content_hash());
    assert_eq!(a.path_hash(), 0x0a22_6b97);
}

#[test]
fn identity_from_parts_round_trips() {
    let id = DiagramId::from_parts(0xdead_beef, 0x0123_4567);
    assert_eq!(id.path_hash(), 0xdead_beef);
    assert_eq!(id.content_hash(), 0x0123_4567);
}
