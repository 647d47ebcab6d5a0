mod triangulate;

pub use triangulate::{center_ring, point_in_ring, triangulate_ring, Faces};

use crate::data::LandPolygon;
use crate::geo::{project_ring, Columns};
use glam::DVec3;
use rayon::prelude::*;
use serde::Serialize;

/// Indexed triangle mesh as six parallel columns (`x, y, z` vertices, `i, j, k` faces).
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Mesh {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    pub i: Vec<u32>,
    pub j: Vec<u32>,
    pub k: Vec<u32>,
}

/// Vertices and local faces produced from one polygon.
struct Patch {
    vertices: Columns,
    faces: Faces,
}

impl Mesh {
    pub fn vertex_count(&self) -> usize {
        self.x.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.i.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    #[inline]
    pub fn vertex(&self, idx: usize) -> DVec3 {
        DVec3::new(self.x[idx], self.y[idx], self.z[idx])
    }

    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.i
            .iter()
            .zip(&self.j)
            .zip(&self.k)
            .map(|((&a, &b), &c)| [a as usize, b as usize, c as usize])
    }

    /// Largest face index, if any faces exist.
    pub fn max_index(&self) -> Option<u32> {
        self.i.iter().chain(&self.j).chain(&self.k).copied().max()
    }

    /// Append a patch, shifting its faces past the vertices already present.
    fn append(&mut self, patch: Patch) {
        let offset = self.vertex_count() as u32;
        self.x.extend(patch.vertices.x);
        self.y.extend(patch.vertices.y);
        self.z.extend(patch.vertices.z);
        for [a, b, c] in patch.faces {
            self.i.push(a + offset);
            self.j.push(b + offset);
            self.k.push(c + offset);
        }
    }

    /// Project, triangulate and concatenate every polygon at radius `r`.
    ///
    /// Polygons that fail triangulation are skipped and contribute no vertices.
    /// Per-polygon work runs on the rayon pool; assembly keeps input order.
    pub fn assemble(polygons: &[LandPolygon], r: f64) -> Self {
        let patches: Vec<Option<Patch>> = polygons
            .par_iter()
            .map(|polygon| {
                let faces = triangulate_ring(&polygon.ring)?;
                Some(Patch {
                    vertices: project_ring(&polygon.ring, r),
                    faces,
                })
            })
            .collect();

        let mut mesh = Mesh::default();
        let mut skipped = 0usize;
        for patch in patches {
            match patch {
                Some(p) => mesh.append(p),
                None => skipped += 1,
            }
        }
        if skipped > 0 {
            tracing::debug!(skipped, "polygons skipped during triangulation");
        }
        tracing::info!(
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "assembled land mesh"
        );
        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(lon: f64, lat: f64, size: f64) -> LandPolygon {
        LandPolygon::new(vec![
            (lon, lat),
            (lon + size, lat),
            (lon + size, lat + size),
            (lon, lat + size),
            (lon, lat),
        ])
    }

    #[test]
    fn test_offsets_chain_across_polygons() {
        let mesh = Mesh::assemble(&[square(0.0, 0.0, 1.0), square(10.0, 10.0, 2.0)], 1.0);
        assert_eq!(mesh.vertex_count(), 10);
        assert_eq!(mesh.triangle_count(), 4);
        // second polygon's faces only reference its own vertices
        for [a, b, c] in mesh.triangles().skip(2) {
            assert!(a >= 5 && b >= 5 && c >= 5);
        }
        assert!((mesh.max_index().unwrap() as usize) < mesh.vertex_count());
    }

    #[test]
    fn test_failed_polygon_does_not_advance_offset() {
        let collinear = LandPolygon::new(vec![(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]);
        let two_points = LandPolygon::new(vec![(5.0, 5.0), (6.0, 6.0)]);
        let mesh = Mesh::assemble(
            &[collinear, square(0.0, 0.0, 1.0), two_points, square(20.0, 0.0, 1.0)],
            1.0,
        );
        assert_eq!(mesh.vertex_count(), 10);
        assert_eq!(mesh.triangle_count(), 4);
        let min_second = mesh.triangles().skip(2).flatten().min().unwrap();
        assert_eq!(min_second, 5);
    }

    #[test]
    fn test_vertices_use_uncentered_coordinates() {
        let r = 1.001;
        let mesh = Mesh::assemble(&[square(30.0, 40.0, 1.0)], r);
        let expected = crate::geo::lonlat_to_xyz(30.0, 40.0, r);
        assert!((mesh.vertex(0) - expected).length() < 1e-12);
        for idx in 0..mesh.vertex_count() {
            assert!((mesh.vertex(idx).length() - r).abs() < 1e-9);
        }
    }

    #[test]
    fn test_empty_input() {
        let mesh = Mesh::assemble(&[], 1.0);
        assert!(mesh.is_empty());
        assert_eq!(mesh.max_index(), None);
    }

    #[test]
    fn test_deterministic_across_runs() {
        let polygons: Vec<_> = (0..40)
            .map(|n| square(n as f64 * 3.0 - 60.0, (n % 7) as f64 * 5.0, 1.5))
            .collect();
        assert_eq!(Mesh::assemble(&polygons, 1.0), Mesh::assemble(&polygons, 1.0));
    }
}
