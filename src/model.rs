use anyhow::{Context, Result};
use camino::Utf8Path;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::geometry::{Point, Rect};

/// Identifier of the synthetic wrapper node at the top of every document.
pub const ROOT_ID: &str = "root";

// ────────────────────────────────────────────────────────────────────────────
// Layout document
// ────────────────────────────────────────────────────────────────────────────

/// A node of the nested layout document.
///
/// Every field is optional in the input. Malformed numbers read as `0`, and a
/// malformed entry in a child array is dropped (with a warning) instead of
/// failing the whole document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutNode {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::f32")]
    pub x: f32,
    #[serde(default, deserialize_with = "lenient::f32")]
    pub y: f32,
    #[serde(default, deserialize_with = "lenient::f32")]
    pub width: f32,
    #[serde(default, deserialize_with = "lenient::f32")]
    pub height: f32,
    #[serde(default, deserialize_with = "lenient::options")]
    pub layout_options: LayoutOptions,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub children: Vec<LayoutNode>,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub labels: Vec<LayoutLabel>,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub ports: Vec<LayoutPort>,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub edges: Vec<LayoutEdge>,
}

impl LayoutNode {
    /// Parse a layout document from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Failed to parse layout document")
    }

    /// Read and parse a layout document, returning the raw text alongside it
    /// (the text is needed to compute the diagram identity).
    pub fn load(path: impl AsRef<Utf8Path>) -> Result<(Self, String)> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path.as_std_path())
            .with_context(|| format!("Failed to read {}", path))?;
        let doc = Self::from_json_str(&text).with_context(|| format!("In {}", path))?;
        log::info!("loaded layout document {} ({} bytes)", path, text.len());
        Ok((doc, text))
    }

    pub fn is_root(&self) -> bool {
        self.id.as_deref() == Some(ROOT_ID)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutLabel {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub text: String,
    #[serde(default, deserialize_with = "lenient::f32")]
    pub x: f32,
    #[serde(default, deserialize_with = "lenient::f32")]
    pub y: f32,
    #[serde(default, deserialize_with = "lenient::f32")]
    pub width: f32,
    #[serde(default, deserialize_with = "lenient::f32")]
    pub height: f32,
    #[serde(default, deserialize_with = "lenient::options")]
    pub layout_options: LayoutOptions,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutPort {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::f32")]
    pub x: f32,
    #[serde(default, deserialize_with = "lenient::f32")]
    pub y: f32,
    #[serde(default, deserialize_with = "lenient::f32")]
    pub width: f32,
    #[serde(default, deserialize_with = "lenient::f32")]
    pub height: f32,
    #[serde(default, deserialize_with = "lenient::options")]
    pub layout_options: LayoutOptions,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub labels: Vec<LayoutLabel>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutEdge {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::options")]
    pub layout_options: LayoutOptions,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub sections: Vec<EdgeSection>,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub labels: Vec<LayoutLabel>,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub junction_points: Vec<LayoutPoint>,
}

/// One routed piece of an edge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeSection {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::point")]
    pub start_point: LayoutPoint,
    #[serde(default, deserialize_with = "lenient::point")]
    pub end_point: LayoutPoint,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub bend_points: Vec<LayoutPoint>,
    #[serde(default, deserialize_with = "lenient::options")]
    pub layout_options: LayoutOptions,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LayoutPoint {
    #[serde(default, deserialize_with = "lenient::f32")]
    pub x: f32,
    #[serde(default, deserialize_with = "lenient::f32")]
    pub y: f32,
}

// ────────────────────────────────────────────────────────────────────────────
// Layout options
// ────────────────────────────────────────────────────────────────────────────

pub const OPT_CELL_TYPE: &str = "celltype";
pub const OPT_CELL_NAME: &str = "cellname";
pub const OPT_LOCATION_PATH: &str = "location-path";
pub const OPT_SRC_LOCATION: &str = "src-location";
pub const OPT_SIGNAL_NAME: &str = "signalname";
pub const OPT_SIGNAL_TYPE: &str = "signaltype";
pub const OPT_INDEX_IN_SIGNAL: &str = "index-in-signal";
pub const OPT_FONT_SIZE: &str = "font-size";

/// The `layoutOptions` bag, kept in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayoutOptions(pub IndexMap<String, Value>);

impl LayoutOptions {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// String value for `key`; numbers and booleans are rendered as text,
    /// anything else reads as empty.
    pub fn string(&self, key: &str) -> String {
        match self.0.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => String::new(),
        }
    }

    pub fn cell_type(&self) -> String {
        self.string(OPT_CELL_TYPE)
    }
    pub fn cell_name(&self) -> String {
        self.string(OPT_CELL_NAME)
    }
    pub fn location_path(&self) -> String {
        self.string(OPT_LOCATION_PATH)
    }
    pub fn src_location(&self) -> String {
        self.string(OPT_SRC_LOCATION)
    }

    /// Integer value for `key`. Accepts JSON numbers and numeric strings
    /// (including signed ones); anything else reads as `0`.
    pub fn integer(&self, key: &str) -> i64 {
        self.0.get(key).map(value_to_i64).unwrap_or(0)
    }

    pub fn number(&self, key: &str) -> Option<f32> {
        self.0.get(key).and_then(value_to_f32)
    }
}

/// Lookup that prefers `primary` and falls back to `fallback`.
pub(crate) fn option_string(primary: &LayoutOptions, fallback: &LayoutOptions, key: &str) -> String {
    if primary.get(key).is_some() {
        primary.string(key)
    } else {
        fallback.string(key)
    }
}

pub(crate) fn option_integer(primary: &LayoutOptions, fallback: &LayoutOptions, key: &str) -> i64 {
    if primary.get(key).is_some() {
        primary.integer(key)
    } else {
        fallback.integer(key)
    }
}

fn value_to_f32(v: &Value) -> Option<f32> {
    let n = match v {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    let n = n as f32;
    n.is_finite().then_some(n)
}

fn value_to_i64(v: &Value) -> i64 {
    match v {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f as i64))
                .unwrap_or(0)
        }
        _ => 0,
    }
}

mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use super::{LayoutOptions, LayoutPoint};

    pub fn f32<'de, D: Deserializer<'de>>(d: D) -> Result<f32, D::Error> {
        let v = Option::<Value>::deserialize(d)?;
        Ok(v.as_ref().and_then(super::value_to_f32).unwrap_or(0.0))
    }

    pub fn id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Option::<Value>::deserialize(d)? {
            Some(Value::String(s)) => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
    }

    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(match Option::<Value>::deserialize(d)? {
            Some(Value::String(s)) => s,
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        })
    }

    pub fn options<'de, D: Deserializer<'de>>(d: D) -> Result<LayoutOptions, D::Error> {
        Ok(match Option::<Value>::deserialize(d)? {
            Some(Value::Object(map)) => LayoutOptions(map.into_iter().collect()),
            _ => LayoutOptions::default(),
        })
    }

    pub fn point<'de, D: Deserializer<'de>>(d: D) -> Result<LayoutPoint, D::Error> {
        let v = Option::<Value>::deserialize(d)?;
        Ok(v.and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default())
    }

    /// Array whose malformed entries are skipped.
    pub fn vec<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        match Option::<Value>::deserialize(d)? {
            Some(Value::Array(items)) => Ok(items
                .into_iter()
                .enumerate()
                .filter_map(|(i, item)| match serde_json::from_value::<T>(item) {
                    Ok(x) => Some(x),
                    Err(err) => {
                        log::warn!("skipping malformed entry #{}: {}", i, err);
                        None
                    }
                })
                .collect()),
            Some(Value::Null) | None => Ok(Vec::new()),
            Some(other) => {
                log::warn!("expected an array, found {}; ignoring", type_name(&other));
                Ok(Vec::new())
            }
        }
    }

    fn type_name(v: &Value) -> &'static str {
        match v {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Render elements
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    #[default]
    Node,
    Edge,
    Label,
    Junction,
    Port,
}

/// Number of synthesized arrowhead points appended to every edge point list:
/// wing, end point again, wing.
pub const ARROWHEAD_POINTS: usize = 3;

/// One flat, render-ready primitive produced by the graph builder.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderElement {
    pub kind: ElementKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Hierarchy level counted from the synthetic root (depth 0).
    pub depth: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub points: Vec<Point>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
    pub font_size: f32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub source_location: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub hierarchy_path: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cell_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cell_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub signal_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub signal_type: String,
    pub index_in_signal: i64,
    pub highlighted: bool,
}

impl RenderElement {
    pub fn rect(&self) -> Rect {
        Rect::from_xywh(self.x, self.y, self.width, self.height)
    }

    /// Whether the segment `points[i] → points[i + 1]` belongs to the
    /// synthesized arrowhead of an edge.
    pub fn is_arrow_segment(&self, i: usize) -> bool {
        self.kind == ElementKind::Edge
            && self.points.len() > ARROWHEAD_POINTS
            && i + 1 > self.points.len() - 1 - ARROWHEAD_POINTS
    }
}
