use glam::DVec3;

use crate::geo::lonlat_to_xyz;

/// Orthographic camera looking at a unit sphere.
/// Orientation is kept as three orthonormal vectors rather than a quaternion.
#[derive(Clone, Debug)]
pub struct GlobeViewport {
    /// Direction from the origin toward the camera
    forward: DVec3,
    /// Screen right (east at the view center)
    right: DVec3,
    /// Screen up (north at the view center)
    up: DVec3,
    /// Sphere radius in braille pixels (controls zoom)
    pub radius: f64,
    /// Canvas pixel width
    pub width: usize,
    /// Canvas pixel height
    pub height: usize,
}

impl GlobeViewport {
    /// Build a viewport centered on (lon, lat) with the given on-screen radius.
    pub fn new(center_lon: f64, center_lat: f64, radius: f64, width: usize, height: usize) -> Self {
        let lon_rad = center_lon.to_radians();
        let lat_rad = center_lat.to_radians();

        let forward = lonlat_to_xyz(center_lon, center_lat, 1.0);

        // Derivative of forward w.r.t. latitude (points north)
        let raw_up = DVec3::new(
            -lat_rad.sin() * lon_rad.cos(),
            -lat_rad.sin() * lon_rad.sin(),
            lat_rad.cos(),
        );

        let right = raw_up.cross(forward).normalize();
        let up = forward.cross(right).normalize();

        Self { forward, right, up, radius, width, height }
    }

    /// Whole-globe view that fits the canvas with a small margin.
    pub fn fit(center_lon: f64, center_lat: f64, width: usize, height: usize) -> Self {
        let radius = (width.min(height) as f64 / 2.0 * 0.9).max(1.0);
        Self::new(center_lon, center_lat, radius, width, height)
    }

    /// Lon/lat the camera is looking at.
    pub fn center_lonlat(&self) -> (f64, f64) {
        let lat = self.forward.z.clamp(-1.0, 1.0).asin().to_degrees();
        let lon = self.forward.y.atan2(self.forward.x).to_degrees();
        (lon, lat)
    }

    pub fn center_lon(&self) -> f64 {
        self.center_lonlat().0
    }

    pub fn center_lat(&self) -> f64 {
        self.center_lonlat().1
    }

    pub fn screen_center(&self) -> (f64, f64) {
        (self.width as f64 / 2.0, self.height as f64 / 2.0)
    }

    /// Depth of a unit-sphere point along the view direction; positive is visible.
    #[inline]
    pub fn depth(&self, p: DVec3) -> f64 {
        p.dot(self.forward)
    }

    /// True when a face normal points toward the camera.
    #[inline]
    pub fn faces_viewer(&self, normal: DVec3) -> bool {
        normal.dot(self.forward) > 0.0
    }

    /// Project a point on the unit sphere to screen pixels, ignoring depth.
    #[inline]
    pub fn project_unit(&self, p: DVec3) -> (i32, i32) {
        let (cx, cy) = self.screen_center();
        let px = cx + p.dot(self.right) * self.radius;
        let py = cy - p.dot(self.up) * self.radius;
        (px as i32, py as i32)
    }

    /// Project a unit-sphere point, or `None` on the far hemisphere.
    pub fn project(&self, p: DVec3) -> Option<(i32, i32)> {
        (self.depth(p) >= 0.0).then(|| self.project_unit(p))
    }

    fn rotate(&mut self, angle_x: f64, angle_y: f64) {
        // Around up axis (longitude)
        if angle_x.abs() > 1e-10 {
            let (sin_a, cos_a) = angle_x.sin_cos();
            let new_forward = self.forward * cos_a + self.right * sin_a;
            let new_right = self.right * cos_a - self.forward * sin_a;
            self.forward = new_forward.normalize();
            self.right = new_right.normalize();
        }
        // Around right axis (latitude)
        if angle_y.abs() > 1e-10 {
            let (sin_a, cos_a) = angle_y.sin_cos();
            let new_forward = self.forward * cos_a + self.up * sin_a;
            let new_up = self.up * cos_a - self.forward * sin_a;
            self.forward = new_forward.normalize();
            self.up = new_up.normalize();
        }
    }

    /// Rotate by a mouse drag in pixels; the surface follows the pointer.
    pub fn rotate_drag(&mut self, dx: i32, dy: i32) {
        self.rotate(-(dx as f64) / self.radius, dy as f64 / self.radius);
    }

    /// Rotate by whole degrees (keyboard navigation).
    pub fn rotate_degrees(&mut self, dlon: f64, dlat: f64) {
        self.rotate(dlon.to_radians(), dlat.to_radians());
    }

    pub fn zoom_in(&mut self) {
        self.radius = (self.radius * 1.5).min(self.width.max(1) as f64 * 20.0);
    }

    pub fn zoom_out(&mut self) {
        self.radius = (self.radius / 1.5).max(self.width.max(1) as f64 * 0.1);
    }

    pub fn set_size(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
    }
}
