use std::sync::Arc;
use std::thread;

use netlistview::geometry::Rect;
use netlistview::identity::DiagramId;
use netlistview::store::{ViewportState, ViewportStore, global_store};

#[test]
fn first_access_creates_default_entry() {
    let store = ViewportStore::new();
    let id = DiagramId::new("a.json", "{}");
    assert!(!store.contains(id));
    assert_eq!(store.get(id), None);

    assert_eq!(store.clicked_path(id), "");
    assert!(store.contains(id));
    assert_eq!(store.get_or_create(id), ViewportState::default());
    assert_eq!(store.len(), 1);
}

#[test]
fn setters_are_per_identity() {
    let store = ViewportStore::new();
    let a = DiagramId::new("a.json", "{}");
    let b = DiagramId::new("b.json", "{}");

    store.set_clicked_path(a, "top cpu");
    store.set_clicked_rect(a, Some(Rect::from_xywh(1.0, 2.0, 3.0, 4.0)));
    store.set_element_count(a, 12);
    store.set_extents(a, 640.0, 480.0);

    assert_eq!(store.clicked_path(a), "top cpu");
    assert_eq!(store.clicked_rect(a), Some(Rect::from_xywh(1.0, 2.0, 3.0, 4.0)));
    assert_eq!(store.element_count(a), 12);
    assert_eq!(store.extents(a), (640.0, 480.0));

    assert_eq!(store.clicked_path(b), "");
    assert_eq!(store.clicked_rect(b), None);
    assert_eq!(store.element_count(b), 0);
    assert_eq!(store.len(), 2);
}

#[test]
fn update_is_atomic_read_modify_write() {
    let store = ViewportStore::new();
    let id = DiagramId::new("a.json", "x");
    let prev = store.update(id, |s| {
        let prev = s.element_count;
        s.element_count = 5;
        s.zoom_target = Some(Rect::from_xywh(0.0, 0.0, 1.0, 1.0));
        prev
    });
    assert_eq!(prev, 0);
    assert_eq!(store.element_count(id), 5);
    assert!(store.zoom_target(id).is_some());
    store.set_zoom_target(id, None);
    assert_eq!(store.zoom_target(id), None);
}

#[test]
fn concurrent_updates_from_many_threads() {
    let store = Arc::new(ViewportStore::new());
    let ids: Vec<DiagramId> = (0..8)
        .map(|i| DiagramId::new(&format!("d{}.json", i), "{}"))
        .collect();

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let store = Arc::clone(&store);
            let ids = ids.clone();
            thread::spawn(move || {
                for _ in 0..500 {
                    for id in &ids {
                        store.update(*id, |s| s.element_count += 1);
                    }
                }
                store.set_clicked_path(ids[t], format!("thread {}", t));
            })
        })
        .collect();
    for h in handles {
        h.join().expect("worker panicked");
    }

    assert_eq!(store.len(), ids.len());
    for (t, id) in ids.iter().enumerate() {
        assert_eq!(store.element_count(*id), 8 * 500);
        assert_eq!(store.clicked_path(*id), format!("thread {}", t));
    }
}

#[test]
fn global_store_is_shared() {
    let id = DiagramId::new("global-store-test.json", "{}");
    global_store().set_element_count(id, 3);
    assert_eq!(global_store().element_count(id), 3);
    assert!(Arc::ptr_eq(&global_store(), &global_store()));
}
