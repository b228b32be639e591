//! # Scene Management Module
//!
//! This module provides the scene graph the viewer renders each frame: the
//! displayed model hierarchy, its materials and bounds, the lights, and the
//! backdrop.
//!
//! ## Key Components
//!
//! - [`Scene`] - The container holding the displayed object, lights and background
//! - [`Node`] - One element of the model hierarchy with a local transform
//! - [`Material`] - Surface parameters and texture slots carried by meshes
//! - [`Aabb`] - Axis-aligned bounds used for camera fitting and recentering
//!
//! ## Object Management
//!
//! The scene displays at most one model at a time. Swapping goes through
//! [`Scene::detach_object`] so the outgoing tree can be walked and its pool
//! handles released before the replacement is attached.

pub mod bounds;
pub mod material;
pub mod node;
pub mod scene;

// Re-export main types
pub use bounds::Aabb;
pub use material::{Material, TextureChannel};
pub use node::{MeshData, Node};
pub use scene::{Background, Light, LightId, Scene};
