//! Viewer configuration: the single source of truth for lighting, background
//! and per-model overrides
//!
//! [`ViewerConfig`] is a plain value object. It is never partially invalid:
//! mutations go through [`ViewerConfig::merge`] (shallow patch merge) or
//! [`ViewerConfig::apply`] (single-field update), both of which validate
//! ranges before touching any field.

use crate::config::color::Color;
use crate::config::preset::Preset;
use crate::error::ViewerError;

/// The active viewer configuration.
///
/// Lighting and background fields are driven by presets; `base_color` and
/// `auto_rotate` are per-viewer overrides that presets never touch.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    /// Show the environment as the backdrop instead of the flat color.
    pub background_enabled: bool,
    /// Ambient light intensity, non-negative.
    pub ambient_intensity: f32,
    pub ambient_color: Color,
    /// Directional light intensity, non-negative, shared by all rig lights.
    pub direct_intensity: f32,
    pub direct_color: Color,
    /// Flat backdrop color used when the environment backdrop is off.
    pub background_color: Color,
    /// Flat color applied to every mesh material when set.
    pub base_color: Option<Color>,
    /// Spin the displayed model around its vertical axis each frame.
    pub auto_rotate: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        let mut config = Self {
            background_enabled: false,
            ambient_intensity: 0.0,
            ambient_color: Color::WHITE,
            direct_intensity: 0.0,
            direct_color: Color::WHITE,
            background_color: Color::WHITE,
            base_color: None,
            auto_rotate: false,
        };
        // The default configuration is the Initial preset; its values are
        // range-valid by construction.
        let _ = config.merge(Preset::Initial.patch());
        config
    }
}

impl ViewerConfig {
    /// Shallow-merges `patch` over the current configuration.
    ///
    /// Fields absent from the patch are left untouched. Validation runs
    /// before any field is written, so a rejected patch changes nothing.
    pub fn merge(&mut self, patch: ConfigPatch) -> Result<(), ViewerError> {
        patch.validate()?;

        if let Some(value) = patch.background_enabled {
            self.background_enabled = value;
        }
        if let Some(value) = patch.ambient_intensity {
            self.ambient_intensity = value;
        }
        if let Some(value) = patch.ambient_color {
            self.ambient_color = value;
        }
        if let Some(value) = patch.direct_intensity {
            self.direct_intensity = value;
        }
        if let Some(value) = patch.direct_color {
            self.direct_color = value;
        }
        if let Some(value) = patch.background_color {
            self.background_color = value;
        }
        if let Some(value) = patch.base_color {
            self.base_color = Some(value);
        }
        if let Some(value) = patch.auto_rotate {
            self.auto_rotate = value;
        }
        Ok(())
    }

    /// Replaces exactly one field, leaving the rest of the configuration
    /// undisturbed.
    pub fn apply(&mut self, field: ConfigField) -> Result<(), ViewerError> {
        match field {
            ConfigField::BackgroundEnabled(value) => self.background_enabled = value,
            ConfigField::AmbientIntensity(value) => {
                validate_intensity("ambient", value)?;
                self.ambient_intensity = value;
            }
            ConfigField::AmbientColor(value) => self.ambient_color = value,
            ConfigField::DirectIntensity(value) => {
                validate_intensity("direct", value)?;
                self.direct_intensity = value;
            }
            ConfigField::DirectColor(value) => self.direct_color = value,
            ConfigField::BackgroundColor(value) => self.background_color = value,
            ConfigField::BaseColor(value) => self.base_color = value,
            ConfigField::AutoRotate(value) => self.auto_rotate = value,
        }
        Ok(())
    }
}

/// A partial configuration: every field optional, absent fields untouched by
/// [`ViewerConfig::merge`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigPatch {
    pub background_enabled: Option<bool>,
    pub ambient_intensity: Option<f32>,
    pub ambient_color: Option<Color>,
    pub direct_intensity: Option<f32>,
    pub direct_color: Option<Color>,
    pub background_color: Option<Color>,
    pub base_color: Option<Color>,
    pub auto_rotate: Option<bool>,
}

impl ConfigPatch {
    fn validate(&self) -> Result<(), ViewerError> {
        if let Some(value) = self.ambient_intensity {
            validate_intensity("ambient", value)?;
        }
        if let Some(value) = self.direct_intensity {
            validate_intensity("direct", value)?;
        }
        Ok(())
    }
}

/// A typed single-field update for [`ViewerConfig::apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigField {
    BackgroundEnabled(bool),
    AmbientIntensity(f32),
    AmbientColor(Color),
    DirectIntensity(f32),
    DirectColor(Color),
    BackgroundColor(Color),
    BaseColor(Option<Color>),
    AutoRotate(bool),
}

fn validate_intensity(which: &str, value: f32) -> Result<(), ViewerError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ViewerError::invalid_configuration(format!(
            "{which} intensity must be a non-negative number (got {value})"
        )))
    }
}
