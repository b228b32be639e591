//! Configuration types: colors, the viewer configuration and lighting presets

pub mod color;
pub mod options;
pub mod preset;

pub use color::Color;
pub use options::{ConfigField, ConfigPatch, ViewerConfig};
pub use preset::Preset;
