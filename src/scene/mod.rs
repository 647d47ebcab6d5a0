//! Land globe scene: a static continent mesh and ocean sphere plus one mutable
//! marker overlay, addressed through the [`MarkerHandle`] returned by [`Globe::build`].

mod trace;

pub use trace::{parse_rgb, MarkerStyle, MarkerTrace, MeshTrace, SurfaceTrace, Trace};

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use thiserror::Error;

use crate::data::{self, LandPolygon, LoadError};
use crate::geo::{self, linspace, lonlat_to_xyz};
use crate::mesh::Mesh;

/// Land sits slightly above the ocean sphere so it never z-fights with it.
const LAND_LIFT: f64 = 1.001;

static NEXT_SCENE_ID: AtomicU64 = AtomicU64::new(1);

// Trace slots laid out by `Globe::build`.
const LAND_TRACE: usize = 0;
const SPHERE_TRACE: usize = 1;
const MARKER_TRACE: usize = 2;

#[derive(Debug, Error)]
pub enum GlobeError {
    #[error("failed to load land dataset: {0}")]
    Load(#[from] LoadError),
    #[error("marker handle belongs to scene {handle} but was used on scene {scene}")]
    ForeignHandle { handle: u64, scene: u64 },
    #[error("invalid marker coordinates: {0}")]
    LengthMismatch(#[from] geo::LengthMismatch),
}

#[derive(Clone, Debug)]
pub struct GlobeConfig {
    pub land_path: PathBuf,
    pub radius: f64,
    pub land_color: String,
    /// Grid samples per axis for the ocean sphere.
    pub sphere_resolution: usize,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            land_path: PathBuf::from("data/ne_50m_land.json"),
            radius: 1.0,
            land_color: "rgb(100, 180, 100)".to_string(),
            sphere_resolution: 50,
        }
    }
}

/// Typed reference to the marker overlay of one particular scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarkerHandle {
    scene: u64,
    index: usize,
}

/// A renderable collection of traces plus layout.
#[derive(Clone, Debug, Serialize)]
pub struct Scene {
    #[serde(skip)]
    id: u64,
    #[serde(rename = "data")]
    traces: Vec<Trace>,
    layout: serde_json::Value,
}

impl Scene {
    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }

    pub fn land(&self) -> Option<&MeshTrace> {
        match self.traces.get(LAND_TRACE) {
            Some(Trace::Mesh3d(m)) => Some(m),
            _ => None,
        }
    }

    pub fn sphere(&self) -> Option<&SurfaceTrace> {
        match self.traces.get(SPHERE_TRACE) {
            Some(Trace::Surface(s)) => Some(s),
            _ => None,
        }
    }

    /// Marker overlay behind `handle`, if this scene owns it.
    pub fn markers(&self, handle: MarkerHandle) -> Option<&MarkerTrace> {
        if handle.scene != self.id {
            return None;
        }
        match self.traces.get(handle.index) {
            Some(Trace::Scatter3d(m)) => Some(m),
            _ => None,
        }
    }

    /// Plotly figure JSON (`{"data": [...], "layout": {...}}`).
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Land geometry loaded once, from which any number of scenes can be built.
pub struct Globe {
    config: GlobeConfig,
    land: Vec<LandPolygon>,
}

impl Globe {
    /// Load the land dataset named in `config`. A dataset that cannot be read is fatal.
    pub fn load(config: GlobeConfig) -> Result<Self, GlobeError> {
        let land = data::load_land(&config.land_path)?;
        Ok(Self { config, land })
    }

    /// Build from polygons already in memory.
    pub fn from_polygons(config: GlobeConfig, land: Vec<LandPolygon>) -> Self {
        Self { config, land }
    }

    pub fn land_path(&self) -> &Path {
        &self.config.land_path
    }

    pub fn polygon_count(&self) -> usize {
        self.land.len()
    }

    pub fn radius(&self) -> f64 {
        self.config.radius
    }

    /// Radius continents and markers are drawn at.
    pub fn land_radius(&self) -> f64 {
        self.config.radius * LAND_LIFT
    }

    /// Assemble the continent mesh.
    pub fn land_mesh(&self) -> Mesh {
        Mesh::assemble(&self.land, self.land_radius())
    }

    fn ocean_surface(&self) -> SurfaceTrace {
        let n = self.config.sphere_resolution;
        let lats = linspace(-90.0, 90.0, n);
        let lons = linspace(-180.0, 180.0, n);
        let r = self.config.radius;

        let mut x = Vec::with_capacity(n);
        let mut y = Vec::with_capacity(n);
        let mut z = Vec::with_capacity(n);
        for &lat in &lats {
            let row: Vec<_> = lons.iter().map(|&lon| lonlat_to_xyz(lon, lat, r)).collect();
            x.push(row.iter().map(|p| p.x).collect());
            y.push(row.iter().map(|p| p.y).collect());
            z.push(row.iter().map(|p| p.z).collect());
        }

        let ocean = "rgb(220, 220, 255)".to_string();
        SurfaceTrace {
            x,
            y,
            z,
            surfacecolor: vec![vec![0.0; n]; n],
            colorscale: [(0.0, ocean.clone()), (1.0, ocean)],
            showscale: false,
            opacity: 0.1,
            name: "Ocean Background",
        }
    }

    /// Create a new scene: land mesh, ocean sphere, and a one-point marker placeholder.
    pub fn build(&self) -> (Scene, MarkerHandle) {
        let id = NEXT_SCENE_ID.fetch_add(1, Ordering::Relaxed);
        let land = MeshTrace {
            mesh: self.land_mesh(),
            color: self.config.land_color.clone(),
            opacity: 1.0,
            flatshading: true,
            name: "Continents",
            showlegend: false,
        };
        let mut placeholder = geo::Columns::default();
        placeholder.push(glam::DVec3::ZERO);
        let markers = MarkerTrace {
            points: placeholder,
            mode: "markers",
            marker: MarkerStyle::placeholder(),
            name: "Data Points",
        };

        // order matches LAND_TRACE, SPHERE_TRACE, MARKER_TRACE
        let traces = vec![
            Trace::Mesh3d(land),
            Trace::Surface(self.ocean_surface()),
            Trace::Scatter3d(markers),
        ];
        let handle = MarkerHandle {
            scene: id,
            index: MARKER_TRACE,
        };
        tracing::info!(scene = id, polygons = self.land.len(), "built globe scene");

        (
            Scene {
                id,
                traces,
                layout: trace::default_layout(),
            },
            handle,
        )
    }

    /// Replace the marker overlay's points and style in place.
    ///
    /// A handle from another scene is rejected. If the overlay can no longer be
    /// found the call is logged and the scene is left untouched.
    pub fn update_markers(
        &self,
        scene: &mut Scene,
        handle: MarkerHandle,
        lons: &[f64],
        lats: &[f64],
        style: &MarkerStyle,
    ) -> Result<(), GlobeError> {
        if handle.scene != scene.id {
            return Err(GlobeError::ForeignHandle {
                handle: handle.scene,
                scene: scene.id,
            });
        }
        let points = geo::project(lons, lats, self.land_radius())?;

        let Some(Trace::Scatter3d(trace)) = scene.traces.get_mut(handle.index) else {
            tracing::warn!(scene = scene.id, index = handle.index, "marker trace not found");
            return Ok(());
        };
        trace.points = points;
        trace.marker = style.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_globe() -> Globe {
        let square = LandPolygon::new(vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]);
        let sliver = LandPolygon::new(vec![(0.0, 0.0), (1.0, 1.0)]);
        Globe::from_polygons(GlobeConfig::default(), vec![square, sliver])
    }

    #[test]
    fn test_build_has_three_traces() {
        let globe = test_globe();
        let (scene, handle) = globe.build();
        assert_eq!(scene.traces().len(), 3);
        assert!(matches!(scene.traces()[0], Trace::Mesh3d(_)));
        assert!(matches!(scene.traces()[1], Trace::Surface(_)));
        let markers = scene.markers(handle).unwrap();
        assert_eq!(markers.points.len(), 1);
        assert_eq!(markers.points.get(0), Some(glam::DVec3::ZERO));
        assert_eq!(markers.marker, MarkerStyle::placeholder());
    }

    #[test]
    fn test_sphere_grid_resolution() {
        let globe = Globe::from_polygons(
            GlobeConfig {
                sphere_resolution: 12,
                ..GlobeConfig::default()
            },
            Vec::new(),
        );
        let (scene, _) = globe.build();
        let sphere = scene.sphere().unwrap();
        assert_eq!(sphere.x.len(), 12);
        assert!(sphere.x.iter().all(|row| row.len() == 12));
        // first row is the south pole, last row the north pole
        assert!((sphere.z[0][0] + 1.0).abs() < 1e-12);
        assert!((sphere.z[11][5] - 1.0).abs() < 1e-12);
        assert_eq!(sphere.opacity, 0.1);
    }

    #[test]
    fn test_update_single_marker_at_origin() {
        let globe = test_globe();
        let (mut scene, handle) = globe.build();
        globe
            .update_markers(&mut scene, handle, &[0.0], &[0.0], &MarkerStyle::default())
            .unwrap();
        let markers = scene.markers(handle).unwrap();
        assert_eq!(markers.points.len(), 1);
        let p = markers.points.get(0).unwrap();
        assert!((p.x - globe.land_radius()).abs() < 1e-12);
        assert!(p.y.abs() < 1e-12 && p.z.abs() < 1e-12);
        assert_eq!(markers.marker, MarkerStyle::default());
    }

    #[test]
    fn test_update_restyles_and_repositions() {
        let globe = test_globe();
        let (mut scene, handle) = globe.build();
        let style = MarkerStyle {
            size: 9.0,
            color: "blue".to_string(),
            opacity: 0.5,
        };
        globe
            .update_markers(&mut scene, handle, &[0.0, 90.0, 12.5], &[0.0, 0.0, 41.9], &style)
            .unwrap();
        let markers = scene.markers(handle).unwrap();
        assert_eq!(markers.points.len(), 3);
        assert_eq!(markers.marker, style);
        // static traces untouched
        assert_eq!(scene.land(), globe.build().0.land());
    }

    #[test]
    fn test_foreign_handle_rejected() {
        let globe = test_globe();
        let (mut first, _) = globe.build();
        let (_, other) = globe.build();
        let err = globe
            .update_markers(&mut first, other, &[0.0], &[0.0], &MarkerStyle::default())
            .unwrap_err();
        assert!(matches!(err, GlobeError::ForeignHandle { .. }));
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let globe = test_globe();
        let (mut scene, handle) = globe.build();
        let err = globe
            .update_markers(&mut scene, handle, &[0.0, 1.0], &[0.0], &MarkerStyle::default())
            .unwrap_err();
        assert!(matches!(
            err,
            GlobeError::LengthMismatch(geo::LengthMismatch { lons: 2, lats: 1 })
        ));
        // nothing was written
        assert_eq!(scene.markers(handle).unwrap().points.len(), 1);
    }

    #[test]
    fn test_missing_trace_leaves_scene_unchanged() {
        let globe = test_globe();
        let (mut scene, handle) = globe.build();
        let before = scene.traces().to_vec();
        let stale = MarkerHandle {
            scene: handle.scene,
            index: 7,
        };
        globe
            .update_markers(&mut scene, stale, &[5.0], &[5.0], &MarkerStyle::default())
            .unwrap();
        assert_eq!(scene.traces(), &before[..]);
    }

    #[test]
    fn test_builds_are_independent() {
        let globe = test_globe();
        let (mut a, ha) = globe.build();
        let (b, hb) = globe.build();
        assert_ne!(ha, hb);
        assert_eq!(a.land(), b.land());
        assert_eq!(a.sphere(), b.sphere());

        globe
            .update_markers(&mut a, ha, &[10.0, 20.0], &[5.0, 5.0], &MarkerStyle::default())
            .unwrap();
        assert_eq!(a.markers(ha).unwrap().points.len(), 2);
        assert_eq!(b.markers(hb).unwrap().points.len(), 1);
        assert!(a.markers(hb).is_none());
    }

    #[test]
    fn test_static_traces_are_read_from_their_slots() {
        let globe = test_globe();
        let (mut scene, handle) = globe.build();
        assert!(scene.land().is_some());
        assert!(scene.sphere().is_some());

        scene.traces.swap(LAND_TRACE, SPHERE_TRACE);
        assert!(scene.land().is_none());
        assert!(scene.sphere().is_none());
        assert!(scene.markers(handle).is_some());
    }

    #[test]
    fn test_degenerate_polygon_skipped_in_scene() {
        let globe = test_globe();
        let (scene, _) = globe.build();
        let land = scene.land().unwrap();
        assert_eq!(land.mesh.vertex_count(), 5);
        assert_eq!(land.mesh.triangle_count(), 2);
        assert!(land.flatshading);
        assert_eq!(land.color, "rgb(100, 180, 100)");
    }

    #[test]
    fn test_figure_json_shape() {
        let globe = test_globe();
        let (scene, _) = globe.build();
        let v: serde_json::Value = serde_json::from_str(&scene.to_json().unwrap()).unwrap();
        let data = v["data"].as_array().unwrap();
        let kinds: Vec<_> = data.iter().map(|t| t["type"].as_str().unwrap()).collect();
        assert_eq!(kinds, ["mesh3d", "surface", "scatter3d"]);
        assert_eq!(data[0]["i"].as_array().unwrap().len(), 2);
        assert_eq!(v["layout"]["scene"]["aspectmode"], "cube");
    }

    #[test]
    fn test_missing_dataset_fails_construction() {
        let config = GlobeConfig {
            land_path: PathBuf::from("no/such/land.json"),
            ..GlobeConfig::default()
        };
        assert!(matches!(Globe::load(config), Err(GlobeError::Load(_))));
    }
}
