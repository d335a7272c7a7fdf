use crate::model::ElementKind;

/// A flat element list that is not in depth-first pre-order.
///
/// The renderer's culling relies on ancestors preceding descendants, so a list
/// that fails this check would silently hide or reveal the wrong subtrees.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("element #{index} ({kind:?}) has depth {depth}, but at most {allowed} is allowed at that position")]
pub struct OrderViolation {
    pub index: usize,
    pub kind: ElementKind,
    pub depth: u32,
    pub allowed: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceLocationError {
    #[error("empty source location")]
    Empty,
    #[error("source location '{0}' has no ':line' part")]
    MissingLine(String),
    #[error("source location '{0}' has an invalid line number")]
    InvalidLine(String),
}
