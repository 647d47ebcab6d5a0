use crate::braille::BrailleCanvas;
use crate::map::geometry::{draw_circle, draw_circle_outline, fill_triangle};
use crate::map::globe::GlobeViewport;
use crate::scene::{MarkerHandle, Scene};

/// Rendered layers, drawn back to front by the UI.
pub struct GlobeLayers {
    pub sphere: BrailleCanvas,
    pub land: BrailleCanvas,
    pub markers: BrailleCanvas,
    pub land_color: (u8, u8, u8),
    pub marker_color: (u8, u8, u8),
}

const FALLBACK_LAND: (u8, u8, u8) = (100, 180, 100);
const FALLBACK_MARKER: (u8, u8, u8) = (255, 0, 0);

/// Rasterize a scene onto braille layers of `cols` x `rows` characters.
///
/// Land triangles are drawn only when their winding faces the camera;
/// markers on the far hemisphere are hidden.
pub fn render_globe(
    scene: &Scene,
    markers: MarkerHandle,
    radius: f64,
    viewport: &GlobeViewport,
    cols: usize,
    rows: usize,
) -> GlobeLayers {
    let mut sphere = BrailleCanvas::new(cols, rows);
    let mut land = BrailleCanvas::new(cols, rows);
    let mut dots = BrailleCanvas::new(cols, rows);
    let inv_r = if radius > 0.0 { 1.0 / radius } else { 1.0 };

    let (cx, cy) = viewport.screen_center();
    draw_circle_outline(&mut sphere, cx, cy, viewport.radius);

    let mut land_color = FALLBACK_LAND;
    if let Some(trace) = scene.land() {
        land_color = crate::scene::parse_rgb(&trace.color).unwrap_or(FALLBACK_LAND);
        let mesh = &trace.mesh;
        for [a, b, c] in mesh.triangles() {
            let (pa, pb, pc) = (
                mesh.vertex(a) * inv_r,
                mesh.vertex(b) * inv_r,
                mesh.vertex(c) * inv_r,
            );
            let normal = (pb - pa).cross(pc - pa);
            if !viewport.faces_viewer(normal) {
                continue;
            }
            if viewport.depth(pa) < 0.0 && viewport.depth(pb) < 0.0 && viewport.depth(pc) < 0.0 {
                continue;
            }
            fill_triangle(
                &mut land,
                viewport.project_unit(pa),
                viewport.project_unit(pb),
                viewport.project_unit(pc),
            );
        }
    }

    let mut marker_color = FALLBACK_MARKER;
    if let Some(trace) = scene.markers(markers) {
        marker_color = crate::scene::parse_rgb(&trace.marker.color).unwrap_or(FALLBACK_MARKER);
        let dot_radius = (trace.marker.size / 4.0).round().clamp(0.0, 4.0) as i32;
        for p in trace.points.iter() {
            // placeholder at the origin has no direction
            if p.length_squared() < 1e-12 {
                continue;
            }
            if let Some((px, py)) = viewport.project(p * inv_r) {
                draw_circle(&mut dots, px, py, dot_radius);
            }
        }
    }

    GlobeLayers {
        sphere,
        land,
        markers: dots,
        land_color,
        marker_color,
    }
}
