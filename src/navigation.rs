use crate::model::{ElementKind, RenderElement};

/// Separator between cell names in a hierarchy path.
pub const PATH_DELIMITER: char = ' ';

/// Parent of a hierarchy path: the path with its last segment removed, or an
/// empty string for a top-level path.
pub fn parent_path(path: &str) -> &str {
    match path.rsplit_once(PATH_DELIMITER) {
        Some((parent, _)) => parent,
        None => "",
    }
}

/// Segments of a hierarchy path, skipping empty ones.
pub fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(PATH_DELIMITER).filter(|s| !s.is_empty())
}

/// Remove the trailing repeat-click marker, if any, from a stored clicked path.
pub fn strip_marker(path: &str, marker: char) -> &str {
    path.strip_suffix(marker).unwrap_or(path)
}

/// Index of the node whose hierarchy path equals `path`.
pub fn find_node_by_path(elements: &[RenderElement], path: &str) -> Option<usize> {
    elements
        .iter()
        .position(|e| e.kind == ElementKind::Node && e.hierarchy_path == path)
}

/// All distinct node hierarchy paths in traversal order.
pub fn collect_hierarchy_paths(elements: &[RenderElement]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    elements
        .iter()
        .filter(|e| e.kind == ElementKind::Node && !e.hierarchy_path.is_empty())
        .filter(|e| seen.insert(e.hierarchy_path.as_str()))
        .map(|e| e.hierarchy_path.clone())
        .collect()
}

/// Case-insensitive search on the last path segment. Shorter paths first,
/// then lexicographic; at most 30 results.
pub fn search_paths(paths: &[String], query: &str) -> Vec<String> {
    let q = query.trim();
    if q.is_empty() {
        return Vec::new();
    }
    let ql = q.to_lowercase();
    let mut m: Vec<String> = paths
        .iter()
        .filter(|p| {
            path_segments(p)
                .last()
                .map(|n| n.to_lowercase().contains(&ql))
                .unwrap_or(false)
        })
        .cloned()
        .collect();
    m.sort_by(|a, b| {
        path_segments(a)
            .count()
            .cmp(&path_segments(b).count())
            .then_with(|| a.cmp(b))
    });
    m.truncate(30);
    m
}
