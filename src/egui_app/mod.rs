//! Egui-based interactive viewer for netlist diagrams (feature = "egui").

#![cfg(feature = "egui")]

mod canvas;
mod state;
mod text;
mod ui;

pub use canvas::{EguiCanvas, to_color32, to_egui_rect, to_pos2};
pub use state::{ElementInfo, NetlistApp};
pub use text::highlight_query_job;
pub use ui::{show_info_window, update};
