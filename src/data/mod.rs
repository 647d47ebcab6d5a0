use geojson::{GeoJson, Geometry, Value};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// A geographic ring (sequence of lon/lat coordinates)
pub type Ring = Vec<(f64, f64)>;

/// One landmass boundary ring, in degrees.
#[derive(Clone, Debug, PartialEq)]
pub struct LandPolygon {
    pub ring: Ring,
}

impl LandPolygon {
    pub fn new(ring: Ring) -> Self {
        Self { ring }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: simd_json::Error,
    },
    #[error("invalid GeoJSON in {path}: {source}")]
    GeoJson {
        path: String,
        #[source]
        source: Box<geojson::Error>,
    },
}

/// Load land polygons from a GeoJSON file (FeatureCollection, Feature or bare Geometry).
pub fn load_land(path: &Path) -> Result<Vec<LandPolygon>, LoadError> {
    let shown = path.display().to_string();
    let mut bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: shown.clone(),
        source,
    })?;
    let value: serde_json::Value =
        simd_json::serde::from_slice(&mut bytes).map_err(|source| LoadError::Json {
            path: shown.clone(),
            source,
        })?;
    let geojson = GeoJson::from_json_value(value).map_err(|source| LoadError::GeoJson {
        path: shown.clone(),
        source: Box::new(source),
    })?;

    let polygons = extract_polygons(&geojson);
    tracing::info!(path = %shown, polygons = polygons.len(), "loaded land dataset");
    Ok(polygons)
}

/// Collect one exterior ring per Polygon / MultiPolygon geometry, in document order.
pub fn extract_polygons(geojson: &GeoJson) -> Vec<LandPolygon> {
    let mut out = Vec::new();
    match geojson {
        GeoJson::FeatureCollection(fc) => {
            for feature in &fc.features {
                if let Some(ref geometry) = feature.geometry {
                    push_polygon(geometry, &mut out);
                }
            }
        }
        GeoJson::Feature(f) => {
            if let Some(ref geometry) = f.geometry {
                push_polygon(geometry, &mut out);
            }
        }
        GeoJson::Geometry(geometry) => push_polygon(geometry, &mut out),
    }
    out
}

/// Multi-part geometries contribute only the exterior of their first part; holes are ignored.
fn push_polygon(geometry: &Geometry, out: &mut Vec<LandPolygon>) {
    let exterior = match &geometry.value {
        Value::Polygon(rings) => rings.first(),
        Value::MultiPolygon(polygons) => polygons.first().and_then(|rings| rings.first()),
        _ => None,
    };
    if let Some(exterior) = exterior {
        let ring: Ring = exterior
            .iter()
            .filter(|c| c.len() >= 2)
            .map(|c| (c[0], c[1]))
            .collect();
        out.push(LandPolygon::new(ring));
    }
}
