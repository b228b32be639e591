// src/lib.rs
//! Vitrine 3D Viewer
//!
//! An embeddable, attribute-driven 3D model viewer component built on winit.

pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod load;
pub mod render;
pub mod viewer;

// Re-export main types for convenience
pub use app::ViewerApp;
pub use config::{Color, ConfigPatch, Preset, ViewerConfig};
pub use error::ViewerError;
pub use render::{Renderer, RendererFactory};
pub use viewer::{InitialAttributes, Viewer, ViewerAttribute};
