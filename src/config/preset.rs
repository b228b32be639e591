//! Built-in lighting presets
//!
//! A preset is a named bundle of lighting and background values. Applying one
//! produces a [`ConfigPatch`] that covers every lighting field, so switching
//! presets never leaves a stale value from the previous one behind. Per-model
//! overrides (`base_color`, `auto_rotate`) are deliberately outside preset
//! territory.

use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::config::color::Color;
use crate::config::options::ConfigPatch;
use crate::error::ViewerError;

/// Flat backdrop color shared by every built-in preset.
const PRESET_BACKGROUND: Color = Color::rgb(
    0x19 as f32 / 255.0,
    0x19 as f32 / 255.0,
    0x19 as f32 / 255.0,
);

/// The closed set of built-in lighting presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Neutral studio lighting, the startup default.
    Initial,
    /// Alias of [`Preset::Initial`] kept for scene-name compatibility.
    Polyground,
    /// Dim lighting for emissive or self-lit content.
    Dark,
    /// Overdriven lighting for inspecting dark materials.
    Bright,
}

impl Preset {
    /// Every preset, in declaration order.
    pub const ALL: [Preset; 4] = [
        Preset::Initial,
        Preset::Polyground,
        Preset::Dark,
        Preset::Bright,
    ];

    /// The attribute value naming this preset, capitalized as hosts write it
    /// in markup (`preset="Dark"`).
    pub fn name(&self) -> &'static str {
        match self {
            Preset::Initial => "Initial",
            Preset::Polyground => "Polyground",
            Preset::Dark => "Dark",
            Preset::Bright => "Bright",
        }
    }

    /// Looks up a preset by its exact name.
    pub fn from_name(name: &str) -> Result<Preset, ViewerError> {
        Preset::ALL
            .into_iter()
            .find(|preset| preset.name() == name)
            .ok_or_else(|| ViewerError::PresetNotFound {
                name: name.to_string(),
            })
    }

    /// The full lighting patch this preset stands for.
    ///
    /// All lighting and background fields are present; `base_color` and
    /// `auto_rotate` are never part of a preset.
    pub fn patch(&self) -> ConfigPatch {
        let (ambient_intensity, direct_intensity) = match self {
            Preset::Initial | Preset::Polyground => (0.3, 0.8 * PI),
            Preset::Dark => (0.1, 0.2 * PI),
            Preset::Bright => (1.0, 5.0),
        };
        ConfigPatch {
            background_enabled: Some(false),
            ambient_intensity: Some(ambient_intensity),
            ambient_color: Some(Color::WHITE),
            direct_intensity: Some(direct_intensity),
            direct_color: Some(Color::WHITE),
            background_color: Some(PRESET_BACKGROUND),
            base_color: None,
            auto_rotate: None,
        }
    }
}

impl FromStr for Preset {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::from_name(s)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
