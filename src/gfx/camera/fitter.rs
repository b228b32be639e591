//! Framing a freshly loaded model
//!
//! Fitting derives every camera parameter from one size measure, the length
//! of the model's bounding-box diagonal. Clip planes scale with the model so
//! tiny and huge assets are equally visible, and the orbit distance ceiling
//! keeps the user from zooming out until the model vanishes.

use cgmath::*;

use super::orbit_controls::OrbitControls;
use super::perspective::PerspectiveCamera;
use crate::gfx::scene::Aabb;

/// Size substitute for models whose bounds collapse to a point.
const FALLBACK_EXTENT: f32 = 1.0;

/// Places `camera` so that `bounds` fills the frame, and re-seeds `controls`
/// from the resulting placement.
///
/// The camera ends up offset from the bounds center by half the model size
/// on X, a fifth on Y and the full size on Z, looking back at the center.
pub fn fit_camera(bounds: &Aabb, camera: &mut PerspectiveCamera, controls: &mut OrbitControls) {
    let size = match bounds.diagonal() {
        d if d > 0.0 => d,
        _ => FALLBACK_EXTENT,
    };
    let center = if bounds.is_empty() {
        Point3::new(0.0, 0.0, 0.0)
    } else {
        bounds.center()
    };

    controls.max_distance = size * 10.0;
    camera.znear = size / 100.0;
    camera.zfar = size * 100.0;
    camera.update_projection();

    let position = center + vec3(size / 2.0, size / 5.0, size);
    camera.look_at(position, center);
    controls.sync(camera);
}
