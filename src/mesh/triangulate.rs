use spade::{DelaunayTriangulation, Point2, Triangulation};

/// Triangles over a single ring, as indices into that ring.
pub type Faces = Vec<[u32; 3]>;

/// Median of a slice (mean of the two middle values for even lengths).
fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Re-center a ring on its median lon/lat so triangulation works near the origin.
pub fn center_ring(ring: &[(f64, f64)]) -> Vec<(f64, f64)> {
    let lons: Vec<f64> = ring.iter().map(|p| p.0).collect();
    let lats: Vec<f64> = ring.iter().map(|p| p.1).collect();
    let lon_c = median(&lons);
    let lat_c = median(&lats);
    ring.iter().map(|&(lon, lat)| (lon - lon_c, lat - lat_c)).collect()
}

/// Even-odd ray casting test of `p` against a closed or open ring.
pub fn point_in_ring(p: (f64, f64), ring: &[(f64, f64)]) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let (px, py) = p;
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = ring[i];
        let (xj, yj) = ring[j];
        if (yi > py) != (yj > py) {
            let x_cross = xj + (py - yj) * (xi - xj) / (yi - yj);
            if px < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Fill a ring with triangles: Delaunay over the median-centered points, then drop
/// triangles whose centroid is outside the ring (concave bays, holes in the hull).
///
/// Indices refer to positions in `ring`. Repeated positions (such as the closing
/// point) resolve to their first occurrence. Returns `None` when the ring is
/// degenerate or nothing survives the centroid filter.
pub fn triangulate_ring(ring: &[(f64, f64)]) -> Option<Faces> {
    if ring.len() < 3 {
        return None;
    }
    let local = center_ring(ring);

    let mut delaunay: DelaunayTriangulation<Point2<f64>> = DelaunayTriangulation::new();
    // spade vertex index -> first ring index at that position
    let mut ring_index: Vec<usize> = Vec::with_capacity(local.len());
    for (i, &(x, y)) in local.iter().enumerate() {
        let handle = match delaunay.insert(Point2::new(x, y)) {
            Ok(h) => h,
            Err(e) => {
                tracing::debug!(error = ?e, "point rejected by triangulation");
                return None;
            }
        };
        let vi = handle.index();
        if vi == ring_index.len() {
            ring_index.push(i);
        }
    }

    let mut faces = Faces::new();
    for face in delaunay.inner_faces() {
        let [a, b, c] = face.vertices().map(|v| ring_index[v.fix().index()]);
        let cx = (local[a].0 + local[b].0 + local[c].0) / 3.0;
        let cy = (local[a].1 + local[b].1 + local[c].1) / 3.0;
        if point_in_ring((cx, cy), &local) {
            faces.push([a as u32, b as u32, c as u32]);
        }
    }

    if faces.is_empty() {
        None
    } else {
        Some(faces)
    }
}
