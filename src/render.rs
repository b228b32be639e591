//! Renderer abstraction
//!
//! The viewer mutates plain scene data; drawing it is delegated to a
//! [`Renderer`] implementation injected at startup. The factory indirection
//! exists because real renderers acquire their GPU surface asynchronously
//! and need the window handle to do so.

use std::sync::Arc;

use futures::future::LocalBoxFuture;
use winit::window::Window;

use crate::gfx::camera::PerspectiveCamera;
use crate::gfx::scene::Scene;

/// Draws the scene each frame.
pub trait Renderer {
    /// Resizes the drawable surface to the new physical size.
    fn resize(&mut self, width: u32, height: u32);

    /// Adjusts for the monitor's device pixel ratio.
    fn set_pixel_ratio(&mut self, ratio: f64);

    /// Draws one frame of `scene` through `camera`.
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera);
}

/// Builds the renderer once the window exists.
///
/// Called with the window handle and the initial surface size in physical
/// pixels.
pub type RendererFactory = Box<
    dyn FnOnce(Arc<Window>, u32, u32) -> LocalBoxFuture<'static, anyhow::Result<Box<dyn Renderer>>>,
>;
