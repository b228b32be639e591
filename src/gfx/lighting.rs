//! The built-in light rig
//!
//! Every viewer carries one ambient light plus three directional lights
//! spaced evenly on a circle above the model. The rig is rebuilt from the
//! current configuration whenever a preset or lighting attribute changes;
//! rebuilding always tears down the previous rig first so the scene never
//! accumulates stale lights.

use cgmath::Point3;

use crate::config::ViewerConfig;
use crate::gfx::scene::{Light, LightId, Scene};

/// Distance of each directional light from the vertical axis.
const RIG_RADIUS: f32 = 100.0;
/// Height of the directional lights above the ground plane.
const RIG_HEIGHT: f32 = 46.0;
/// Placement angles of the three directional lights.
const RIG_ANGLES_DEG: [f32; 3] = [0.0, 120.0, 240.0];

/// Owns the scene's built-in lights.
pub struct LightingRig {
    active: Vec<LightId>,
}

impl LightingRig {
    pub fn new() -> Self {
        Self { active: Vec::new() }
    }

    /// Replaces the rig's lights with a fresh set derived from `config`.
    ///
    /// Lights added to the scene outside the rig are left alone.
    pub fn rebuild(&mut self, scene: &mut Scene, config: &ViewerConfig) {
        for id in self.active.drain(..) {
            scene.remove_light(id);
        }

        self.active.push(scene.add_light(Light::Ambient {
            color: config.ambient_color,
            intensity: config.ambient_intensity,
        }));

        for angle_deg in RIG_ANGLES_DEG {
            let radian = angle_deg.to_radians();
            self.active.push(scene.add_light(Light::Directional {
                color: config.direct_color,
                intensity: config.direct_intensity,
                position: Point3::new(
                    RIG_RADIUS * radian.cos(),
                    RIG_HEIGHT,
                    RIG_RADIUS * radian.sin(),
                ),
            }));
        }
    }

    /// Identifiers of the lights currently owned by the rig.
    pub fn light_ids(&self) -> &[LightId] {
        &self.active
    }
}

impl Default for LightingRig {
    fn default() -> Self {
        Self::new()
    }
}
