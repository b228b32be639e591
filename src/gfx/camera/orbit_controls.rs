//! Damped orbit controls around a pivot point

use cgmath::*;

use super::perspective::PerspectiveCamera;

/// Keeps the camera pitch strictly off the poles so the view never flips.
const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 1e-3;

/// Orbits a [`PerspectiveCamera`] around a pivot with inertial damping.
///
/// Input handlers feed rotation and zoom deltas in; every frame
/// [`OrbitControls::update`] applies a damped share of what is pending and
/// repositions the camera. With damping disabled, pending input is applied
/// in full on the next update.
#[derive(Debug, Clone, Copy)]
pub struct OrbitControls {
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// The point the camera orbits and looks at.
    pub pivot: Point3<f32>,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pending_yaw: f32,
    pending_pitch: f32,
    pending_zoom: f32,
}

impl OrbitControls {
    pub fn new() -> Self {
        Self {
            enable_damping: true,
            damping_factor: 0.03,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            pivot: Point3::new(0.0, 0.0, 0.0),
            yaw: 0.0,
            pitch: 0.0,
            distance: 5.0,
            pending_yaw: 0.0,
            pending_pitch: 0.0,
            pending_zoom: 0.0,
        }
    }

    /// Queues an orbit rotation, in radians of yaw and pitch.
    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.pending_yaw += delta_yaw;
        self.pending_pitch += delta_pitch;
    }

    /// Queues a zoom step. Positive values move the camera away from the
    /// pivot; the step scales with the current distance so zooming feels
    /// uniform at every range.
    pub fn zoom(&mut self, amount: f32) {
        self.pending_zoom += amount;
    }

    /// Adopts the camera's current placement as the orbit state.
    ///
    /// Called after programmatic camera moves such as fitting a new model,
    /// so the next drag continues from where the camera actually is.
    pub fn sync(&mut self, camera: &PerspectiveCamera) {
        self.pivot = camera.target;
        let offset = camera.position - camera.target;
        let distance = offset.magnitude();
        self.distance = distance;
        if distance > 1e-6 {
            self.pitch = (offset.y / distance).clamp(-1.0, 1.0).asin();
            self.yaw = offset.x.atan2(offset.z);
        } else {
            self.pitch = 0.0;
            self.yaw = 0.0;
        }
        self.pending_yaw = 0.0;
        self.pending_pitch = 0.0;
        self.pending_zoom = 0.0;
    }

    /// Applies pending input and repositions `camera` around the pivot.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) {
        let factor = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };

        let step_yaw = self.pending_yaw * factor;
        let step_pitch = self.pending_pitch * factor;
        let step_zoom = self.pending_zoom * factor;
        self.pending_yaw -= step_yaw;
        self.pending_pitch -= step_pitch;
        self.pending_zoom -= step_zoom;

        self.yaw += step_yaw;
        self.pitch = (self.pitch + step_pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.distance = (self.distance + self.distance * step_zoom)
            .clamp(self.min_distance, self.max_distance);

        let eye = self.pivot
            + Vector3::new(
                self.distance * self.yaw.sin() * self.pitch.cos(),
                self.distance * self.pitch.sin(),
                self.distance * self.yaw.cos() * self.pitch.cos(),
            );
        camera.look_at(eye, self.pivot);
    }

    /// True while queued input has not fully settled.
    pub fn has_pending_input(&self) -> bool {
        self.pending_yaw.abs() > 1e-5
            || self.pending_pitch.abs() > 1e-5
            || self.pending_zoom.abs() > 1e-5
    }
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new()
    }
}
