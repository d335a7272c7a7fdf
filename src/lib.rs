//! Interactive diagram engine for large hierarchical netlists.
//!
//! A pre-laid-out nested layout document ([`model::LayoutNode`]) is flattened
//! by the [`builder::GraphBuilder`] into a pre-ordered list of render
//! elements. The [`render::DiagramRenderer`] draws that list through a
//! [`render::Canvas`] with hierarchical culling and records what it drew for
//! [`hit`]-testing. A [`controller::DiagramSession`] ties everything to the
//! shared [`store::ViewportStore`] and expands or collapses subgraphs on tap.
//!
//! The binary `netlistview` inspects layout documents from the command line.

pub mod backend;
pub mod builder;
pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod hit;
pub mod identity;
pub mod model;
pub mod navigation;
pub mod render;
pub mod source;
pub mod store;
pub mod viewport;

// Optional GUI/egui functionality lives behind the `egui` feature flag.
// It is used by the demo in demos/egui_viewer.rs.
#[cfg(feature = "egui")]
pub mod egui_app;

pub use builder::{BuildOptions, BuildOutput, GraphBuilder};
pub use config::ViewerConfig;
pub use controller::{DiagramSession, TapAction, Transition};
pub use identity::DiagramId;
pub use model::{ElementKind, LayoutNode, RenderElement};
pub use store::{ViewportStore, global_store};
