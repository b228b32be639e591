//! The perspective camera the viewer renders through

use cgmath::*;

/// A right-handed, Y-up perspective camera.
///
/// The projection matrix is cached; call [`PerspectiveCamera::update_projection`]
/// after changing `fovy`, `aspect` or the clip planes.
#[derive(Debug, Clone, Copy)]
pub struct PerspectiveCamera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fovy: Rad<f32>,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
    projection: Matrix4<f32>,
}

impl PerspectiveCamera {
    pub fn new(aspect: f32) -> Self {
        let mut camera = Self {
            position: Point3::new(0.0, 0.0, 5.0),
            target: Point3::new(0.0, 0.0, 0.0),
            up: Vector3::unit_y(),
            fovy: Rad::from(Deg(60.0)),
            aspect,
            znear: 0.01,
            zfar: 1000.0,
            projection: Matrix4::identity(),
        };
        camera.update_projection();
        camera
    }

    /// Moves the camera to `position` and aims it at `target`.
    pub fn look_at(&mut self, position: Point3<f32>, target: Point3<f32>) {
        self.position = position;
        self.target = target;
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection
    }

    pub fn view_projection_matrix(&self) -> Matrix4<f32> {
        self.projection * self.view_matrix()
    }

    /// Recomputes the cached projection from the current parameters.
    pub fn update_projection(&mut self) {
        self.projection = perspective(self.fovy, self.aspect, self.znear, self.zfar);
    }

    /// Updates the aspect ratio after a viewport resize.
    pub fn resize_projection(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
        self.update_projection();
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(1.0)
    }
}
