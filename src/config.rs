//! Viewer configuration.
//!
//! Every field has a default, so a configuration file only needs to list the
//! values it changes:
//!
//! ```json
//! { "render": { "min_node_size": 4.0 }, "interaction": { "composite_cell_type": "hier" } }
//! ```

use anyhow::{Context, Result};
use camino::Utf8Path;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub render: RenderConfig,
    pub build: BuildConfig,
    pub interaction: InteractionConfig,
}

impl ViewerConfig {
    pub fn load(path: impl AsRef<Utf8Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path.as_std_path())
            .with_context(|| format!("Failed to read config {}", path))?;
        let cfg = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config {}", path))?;
        log::debug!("loaded viewer config from {}", path);
        Ok(cfg)
    }
}

/// Draw-pass thresholds and zoom behaviour. Sizes are in screen pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Nodes narrower or shorter than this on screen are culled with their subtree.
    pub min_node_size: f32,
    pub min_label_size: f32,
    pub min_port_size: f32,
    pub min_junction_size: f32,
    /// Edge segments shorter than `sqrt(min_segment_len_sq)` are not drawn.
    pub min_segment_len_sq: f32,
    /// Zoom factor applied per wheel notch.
    pub zoom_step: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    /// Share of the viewport a zoom-to-fit target is scaled to occupy.
    pub fit_margin: f32,
    /// Pointer distance within which a tap hits an edge segment.
    pub edge_hit_tolerance: f32,
    /// Horizontal inset of label text inside its box, in world units.
    pub label_margin: f32,
    pub highlight_width: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            min_node_size: 2.0,
            min_label_size: 3.0,
            min_port_size: 1.0,
            min_junction_size: 1.0,
            min_segment_len_sq: 1.0,
            zoom_step: 1.1,
            min_scale: 1e-4,
            max_scale: 1e4,
            fit_margin: 0.9,
            edge_hit_tolerance: 3.0,
            label_margin: 1.0,
            highlight_width: 3.0,
        }
    }
}

/// Geometry synthesized by the graph builder, in document units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub arrow_length: f32,
    pub arrow_angle_deg: f32,
    pub default_font_size: f32,
    pub junction_size: f32,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            arrow_length: 8.0,
            arrow_angle_deg: 30.0,
            default_font_size: 10.0,
            junction_size: 4.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Cell type of hierarchical instances that expand in place when tapped.
    /// Nodes with an empty cell type are treated the same way.
    pub composite_cell_type: String,
    /// Appended to a clicked path when the same node is tapped twice in a row.
    pub repeat_click_marker: char,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            composite_cell_type: "composite".to_string(),
            repeat_click_marker: '~',
        }
    }
}
