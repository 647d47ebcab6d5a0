use glam::DVec3;
use serde::Serialize;
use thiserror::Error;

/// Convert lon/lat (degrees) to a point on a sphere of radius `r`.
#[inline(always)]
pub fn lonlat_to_xyz(lon: f64, lat: f64, r: f64) -> DVec3 {
    let lon_rad = lon.to_radians();
    let lat_rad = lat.to_radians();
    DVec3::new(
        r * lat_rad.cos() * lon_rad.cos(),
        r * lat_rad.cos() * lon_rad.sin(),
        r * lat_rad.sin(),
    )
}

/// Parallel x/y/z coordinate columns, the layout indexed-mesh renderers expect.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Columns {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

impl Columns {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            x: Vec::with_capacity(n),
            y: Vec::with_capacity(n),
            z: Vec::with_capacity(n),
        }
    }

    #[inline]
    pub fn push(&mut self, p: DVec3) {
        self.x.push(p.x);
        self.y.push(p.y);
        self.z.push(p.z);
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Point at index `i`, if present.
    pub fn get(&self, i: usize) -> Option<DVec3> {
        Some(DVec3::new(*self.x.get(i)?, *self.y.get(i)?, *self.z.get(i)?))
    }

    pub fn iter(&self) -> impl Iterator<Item = DVec3> + '_ {
        self.x
            .iter()
            .zip(&self.y)
            .zip(&self.z)
            .map(|((&x, &y), &z)| DVec3::new(x, y, z))
    }
}

/// Longitude and latitude columns of different lengths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("coordinate columns differ in length ({lons} longitudes, {lats} latitudes)")]
pub struct LengthMismatch {
    pub lons: usize,
    pub lats: usize,
}

/// Project paired longitude/latitude slices (degrees) onto a sphere of radius `r`.
pub fn project(lons: &[f64], lats: &[f64], r: f64) -> Result<Columns, LengthMismatch> {
    if lons.len() != lats.len() {
        return Err(LengthMismatch {
            lons: lons.len(),
            lats: lats.len(),
        });
    }
    let mut out = Columns::with_capacity(lons.len());
    for (&lon, &lat) in lons.iter().zip(lats) {
        out.push(lonlat_to_xyz(lon, lat, r));
    }
    Ok(out)
}

/// Same as [`project`] for a ring of (lon, lat) tuples.
pub fn project_ring(ring: &[(f64, f64)], r: f64) -> Columns {
    let mut out = Columns::with_capacity(ring.len());
    for &(lon, lat) in ring {
        out.push(lonlat_to_xyz(lon, lat, r));
    }
    out
}

/// `n` evenly spaced values from `start` to `end`, both inclusive.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}
