use serde::Serialize;
use serde_json::{json, Value};

use crate::geo::Columns;
use crate::mesh::Mesh;

/// Opaque land surface.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MeshTrace {
    #[serde(flatten)]
    pub mesh: Mesh,
    pub color: String,
    pub opacity: f64,
    pub flatshading: bool,
    pub name: &'static str,
    pub showlegend: bool,
}

/// Background sphere sampled on a lat/lon grid; rows run south to north.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SurfaceTrace {
    pub x: Vec<Vec<f64>>,
    pub y: Vec<Vec<f64>>,
    pub z: Vec<Vec<f64>>,
    pub surfacecolor: Vec<Vec<f64>>,
    pub colorscale: [(f64, String); 2],
    pub showscale: bool,
    pub opacity: f64,
    pub name: &'static str,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MarkerStyle {
    pub size: f64,
    pub color: String,
    pub opacity: f64,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            size: 5.0,
            color: "rgb(69, 82, 75)".to_string(),
            opacity: 0.9,
        }
    }
}

impl MarkerStyle {
    /// Style of the single placeholder point a fresh scene starts with.
    pub fn placeholder() -> Self {
        Self {
            size: 5.0,
            color: "red".to_string(),
            opacity: 0.9,
        }
    }
}

/// Mutable point overlay.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MarkerTrace {
    #[serde(flatten)]
    pub points: Columns,
    pub mode: &'static str,
    pub marker: MarkerStyle,
    pub name: &'static str,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Mesh3d(MeshTrace),
    Surface(SurfaceTrace),
    Scatter3d(MarkerTrace),
}

/// Minimal dark layout with hidden axes.
pub(crate) fn default_layout() -> Value {
    let hidden = json!({ "showgrid": false, "zeroline": false, "visible": false });
    json!({
        "scene": {
            "xaxis": hidden,
            "yaxis": hidden,
            "zaxis": hidden,
            "aspectmode": "cube",
            "camera": { "eye": { "x": 1.5, "y": 1.5, "z": 1.5 } }
        },
        "margin": { "l": 0, "r": 0, "b": 0, "t": 30 },
        "plot_bgcolor": "rgb(28, 32, 40)",
        "paper_bgcolor": "rgb(28, 32, 40)"
    })
}

/// Parse `rgb(r, g, b)` or `#rrggbb`, plus a few named colors.
pub fn parse_rgb(color: &str) -> Option<(u8, u8, u8)> {
    let color = color.trim();
    if let Some(inner) = color.strip_prefix("rgb(").and_then(|s| s.strip_suffix(')')) {
        let mut parts = inner.split(',').map(|p| p.trim().parse::<u8>());
        let r = parts.next()?.ok()?;
        let g = parts.next()?.ok()?;
        let b = parts.next()?.ok()?;
        return parts.next().is_none().then_some((r, g, b));
    }
    if let Some(hex) = color.strip_prefix('#') {
        if hex.len() == 6 {
            let v = u32::from_str_radix(hex, 16).ok()?;
            return Some(((v >> 16) as u8, (v >> 8) as u8, v as u8));
        }
        return None;
    }
    match color {
        "red" => Some((255, 0, 0)),
        "green" => Some((0, 128, 0)),
        "blue" => Some((0, 0, 255)),
        "white" => Some((255, 255, 255)),
        "black" => Some((0, 0, 0)),
        "yellow" => Some((255, 255, 0)),
        _ => None,
    }
}
