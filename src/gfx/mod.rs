//! # Graphics Module
//!
//! This module contains the graphics-side building blocks of the viewer:
//! camera systems, the scene graph, lighting, animation playback and
//! renderer resource bookkeeping.
//!
//! ## Architecture Overview
//!
//! - **Camera System** ([`camera`]) - Perspective camera, damped orbit
//!   controls and model fitting
//! - **Scene Management** ([`scene`]) - Node hierarchy, materials, bounds
//!   and the scene container
//! - **Lighting** ([`lighting`]) - The built-in ambient plus three-point
//!   directional rig
//! - **Animation** ([`animation`]) - Fixed-repetition clip playback
//! - **Resource Management** ([`resources`]) - Handle bookkeeping for
//!   geometry and textures
//!
//! The renderer itself stays behind the [`Renderer`] trait; everything in
//! this module is plain data the viewer mutates and hands over each frame.
//!
//! [`Renderer`]: crate::render::Renderer

pub mod animation;
pub mod camera;
pub mod lighting;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use animation::{AnimationClip, AnimationPlayer};
pub use camera::{fit_camera, CameraController, OrbitControls, PerspectiveCamera};
pub use lighting::LightingRig;
pub use resources::{GeometryHandle, ResourcePool, SharedPool, TextureHandle};
pub use scene::{Aabb, Background, Light, LightId, Material, MeshData, Node, Scene, TextureChannel};
