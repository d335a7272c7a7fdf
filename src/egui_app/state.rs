#![cfg(feature = "egui")]

use eframe::egui;

use crate::controller::{DiagramSession, TapAction};
use crate::model::{ElementKind, RenderElement};
use crate::navigation::{collect_hierarchy_paths, path_segments, search_paths};
use crate::render::{DefaultStyle, StyleLookup};

/// Snapshot of a tapped element shown in the info window.
#[derive(Clone, Debug)]
pub struct ElementInfo {
    pub title: String,
    pub element: RenderElement,
    pub open: bool,
}

impl ElementInfo {
    fn from_element(e: &RenderElement) -> Self {
        let title = match e.kind {
            ElementKind::Node if !e.cell_name.is_empty() => e.cell_name.clone(),
            ElementKind::Edge if !e.signal_name.is_empty() => e.signal_name.clone(),
            ElementKind::Label => e.text.clone(),
            kind => format!("{:?}", kind),
        };
        Self {
            title,
            element: e.clone(),
            open: true,
        }
    }
}

/// Interactive egui application around one [`DiagramSession`].
pub struct NetlistApp {
    pub session: DiagramSession,
    pub all_paths: Vec<String>,
    pub search_query: String,
    pub search_matches: Vec<String>,
    pub info: Option<ElementInfo>,
    /// Last navigation message (source location opened, fetch running).
    pub status: Option<String>,
    pub styles: Box<dyn StyleLookup>,
}

impl NetlistApp {
    pub fn new(session: DiagramSession) -> Self {
        let all_paths = collect_hierarchy_paths(session.elements());
        Self {
            session,
            all_paths,
            search_query: String::new(),
            search_matches: Vec::new(),
            info: None,
            status: None,
            styles: Box::new(DefaultStyle),
        }
    }

    pub fn with_styles(mut self, styles: Box<dyn StyleLookup>) -> Self {
        self.styles = styles;
        self
    }

    /// Breadcrumb segments of the current clicked path.
    pub fn breadcrumb(&self) -> Vec<String> {
        path_segments(&self.session.clicked_path())
            .map(str::to_string)
            .collect()
    }

    /// Collapse to the parent of the clicked node.
    pub fn go_up(&mut self) {
        if self.session.request_parent() {
            self.status = Some("Loading parent…".to_string());
        }
    }

    /// Expand the node at `path` as if it had been tapped.
    pub fn navigate_to_path(&mut self, path: &str) {
        if self.session.expand(path) {
            self.status = Some(format!("Loading {}…", path));
        }
    }

    pub fn update_search_matches(&mut self) {
        self.search_matches = search_paths(&self.all_paths, &self.search_query);
    }

    /// Apply finished backend work; refresh the searchable paths when the
    /// element list changed.
    pub fn poll(&mut self) -> bool {
        if self.session.poll().is_some() {
            self.all_paths = collect_hierarchy_paths(self.session.elements());
            self.update_search_matches();
            self.status = None;
            true
        } else {
            let loading = self.status.as_deref().is_some_and(|s| s.starts_with("Loading"));
            if loading && !self.session.has_pending() {
                // Request failed; the session already restored its state.
                self.status = Some("Could not load subgraph".to_string());
            }
            false
        }
    }

    pub fn handle_tap(&mut self, action: TapAction) {
        match action {
            TapAction::None => self.info = None,
            TapAction::EdgeHighlight { index, highlighted } => {
                self.info = highlighted
                    .then(|| self.session.elements().get(index).map(ElementInfo::from_element))
                    .flatten();
            }
            TapAction::Selected(_) => {
                self.info = self.session.current_element().map(ElementInfo::from_element);
            }
            TapAction::ExpandRequested { path } => {
                self.status = Some(format!("Loading {}…", path));
            }
            TapAction::OpenSource(loc) => {
                self.status = Some(format!("Opened {}:{}", loc.file, loc.line));
            }
        }
    }
}

impl eframe::App for NetlistApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        super::ui::update(self, ctx);
    }
}
