//! External collaborators: the subgraph backend and the source editor.

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};

use crate::identity::DiagramId;
use crate::navigation::path_segments;
use crate::source::SourceLocation;

/// Produces the layout document for the subgraph rooted at a hierarchy path
/// (the top level for an empty path). Called from a worker thread.
pub trait SubgraphBackend: Send + Sync {
    fn fetch_subgraph(&self, id: DiagramId, path: &str) -> Result<String>;
}

impl<F> SubgraphBackend for F
where
    F: Fn(DiagramId, &str) -> Result<String> + Send + Sync,
{
    fn fetch_subgraph(&self, id: DiagramId, path: &str) -> Result<String> {
        self(id, path)
    }
}

/// Opens a file at a line in the host editor.
pub trait SourceEditor {
    fn open(&self, location: &SourceLocation) -> Result<()>;
}

/// Serves pre-rendered subgraph documents from a directory.
///
/// The document for path `"top cpu alu"` is `<dir>/top.cpu.alu.json`; the empty
/// path maps to `<dir>/top.json`.
pub struct FsSubgraphSource {
    dir: Utf8PathBuf,
}

impl FsSubgraphSource {
    pub fn new(dir: impl AsRef<Utf8Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn file_for(&self, path: &str) -> Utf8PathBuf {
        let stem = path_segments(path).collect::<Vec<_>>().join(".");
        let stem = if stem.is_empty() { "top".to_string() } else { stem };
        self.dir.join(format!("{}.json", stem))
    }
}

impl SubgraphBackend for FsSubgraphSource {
    fn fetch_subgraph(&self, id: DiagramId, path: &str) -> Result<String> {
        let file = self.file_for(path);
        log::debug!("diagram {}: reading subgraph '{}' from {}", id, path, file);
        std::fs::read_to_string(file.as_std_path())
            .with_context(|| format!("Failed to read subgraph {}", file))
    }
}
