//! The scene: the displayed object, its lights and the backdrop

use cgmath::Point3;

use crate::config::Color;
use crate::gfx::resources::TextureHandle;
use crate::gfx::scene::node::Node;

/// Identifier of a light added to the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LightId(u64);

/// A light source in the scene.
#[derive(Debug, Clone, PartialEq)]
pub enum Light {
    Ambient {
        color: Color,
        intensity: f32,
    },
    Directional {
        color: Color,
        intensity: f32,
        position: Point3<f32>,
    },
}

/// What fills the viewport behind the model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Background {
    /// A flat color.
    Color(Color),
    /// The scene environment texture, when one is set.
    Environment,
}

/// Holds everything the renderer draws each frame.
///
/// The scene displays at most one object at a time; swapping models goes
/// through [`Scene::detach_object`] so the outgoing tree can be disposed.
pub struct Scene {
    pub object: Option<Node>,
    pub background: Background,
    /// Environment texture used for reflections and, when enabled, as the
    /// backdrop.
    pub environment: Option<TextureHandle>,
    lights: Vec<(LightId, Light)>,
    next_light_id: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            object: None,
            background: Background::Color(Color::WHITE),
            environment: None,
            lights: Vec::new(),
            next_light_id: 0,
        }
    }

    /// Puts `node` in the object slot, replacing whatever was there.
    pub fn attach_object(&mut self, node: Node) {
        self.object = Some(node);
    }

    /// Removes and returns the displayed object.
    pub fn detach_object(&mut self) -> Option<Node> {
        self.object.take()
    }

    /// Adds a light and returns its identifier.
    pub fn add_light(&mut self, light: Light) -> LightId {
        let id = LightId(self.next_light_id);
        self.next_light_id += 1;
        self.lights.push((id, light));
        id
    }

    /// Removes the light with `id`.
    ///
    /// # Returns
    /// `true` if the light existed.
    pub fn remove_light(&mut self, id: LightId) -> bool {
        let before = self.lights.len();
        self.lights.retain(|(light_id, _)| *light_id != id);
        self.lights.len() != before
    }

    /// The lights currently in the scene, in insertion order.
    pub fn lights(&self) -> &[(LightId, Light)] {
        &self.lights
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_replaces_the_object_slot() {
        let mut scene = Scene::new();
        scene.attach_object(Node::new("first"));
        scene.attach_object(Node::new("second"));

        let detached = scene.detach_object().unwrap();
        assert_eq!(detached.name, "second");
        assert!(scene.object.is_none());
        assert!(scene.detach_object().is_none());
    }

    #[test]
    fn test_lights_are_removed_by_id() {
        let mut scene = Scene::new();
        let ambient = scene.add_light(Light::Ambient {
            color: Color::WHITE,
            intensity: 0.3,
        });
        let directional = scene.add_light(Light::Directional {
            color: Color::WHITE,
            intensity: 1.0,
            position: Point3::new(0.0, 10.0, 0.0),
        });

        assert_eq!(scene.lights().len(), 2);
        assert!(scene.remove_light(ambient));
        assert!(!scene.remove_light(ambient));
        assert_eq!(scene.lights().len(), 1);
        assert_eq!(scene.lights()[0].0, directional);
    }
}
