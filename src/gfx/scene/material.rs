//! Surface materials carried by loaded meshes

use crate::config::Color;
use crate::gfx::resources::TextureHandle;

/// Texture slots a material can carry besides the environment map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureChannel {
    Color,
    Normal,
    Roughness,
    Emissive,
    Occlusion,
}

impl TextureChannel {
    pub fn label(&self) -> &'static str {
        match self {
            TextureChannel::Color => "color",
            TextureChannel::Normal => "normal",
            TextureChannel::Roughness => "roughness",
            TextureChannel::Emissive => "emissive",
            TextureChannel::Occlusion => "occlusion",
        }
    }
}

/// A shaded surface description attached to a mesh.
///
/// Texture slots hold pool handles, not pixel data; the renderer resolves
/// them at draw time. `env_map` mirrors the scene environment and is owned
/// by the viewer, so model disposal must not free it.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub base_color: Color,
    pub shininess: f32,
    pub color_map: Option<TextureHandle>,
    pub normal_map: Option<TextureHandle>,
    pub roughness_map: Option<TextureHandle>,
    pub emissive_map: Option<TextureHandle>,
    pub occlusion_map: Option<TextureHandle>,
    pub env_map: Option<TextureHandle>,
    /// Set whenever material parameters change so the renderer re-uploads.
    pub needs_upload: bool,
}

impl Material {
    /// Creates a material with neutral defaults.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            base_color: Color::rgb(0.8, 0.8, 0.8),
            shininess: 30.0,
            color_map: None,
            normal_map: None,
            roughness_map: None,
            emissive_map: None,
            occlusion_map: None,
            env_map: None,
            needs_upload: true,
        }
    }

    /// Mutable access to one texture slot.
    pub fn texture_slot_mut(&mut self, channel: TextureChannel) -> &mut Option<TextureHandle> {
        match channel {
            TextureChannel::Color => &mut self.color_map,
            TextureChannel::Normal => &mut self.normal_map,
            TextureChannel::Roughness => &mut self.roughness_map,
            TextureChannel::Emissive => &mut self.emissive_map,
            TextureChannel::Occlusion => &mut self.occlusion_map,
        }
    }

    /// Texture handles owned by this material, excluding the shared
    /// environment map.
    pub fn disposable_textures(&self) -> impl Iterator<Item = TextureHandle> {
        [
            self.color_map,
            self.normal_map,
            self.roughness_map,
            self.emissive_map,
            self.occlusion_map,
        ]
        .into_iter()
        .flatten()
    }
}
