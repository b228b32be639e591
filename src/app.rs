use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use log::error;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes},
};

use crate::gfx::camera::CameraController;
use crate::gfx::resources::SharedPool;
use crate::load::LoaderSet;
use crate::render::{Renderer, RendererFactory};
use crate::viewer::{InitialAttributes, Viewer};

/// Standalone window shell around a [`Viewer`].
///
/// Embedders that own their event loop drive a [`Viewer`] directly; this
/// shell is for hosts that just want a window showing a model.
pub struct ViewerApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    window: Option<Arc<Window>>,
    renderer: Option<Box<dyn Renderer>>,
    renderer_factory: Option<RendererFactory>,
    viewer: Viewer,
    controller: CameraController,
    last_frame: Option<Instant>,
}

impl ViewerApp {
    /// Create a viewer application with default window settings.
    ///
    /// The renderer factory runs once the window exists; until then the
    /// viewer only accumulates attribute state.
    pub fn new(
        attributes: InitialAttributes,
        loaders: LoaderSet,
        pool: SharedPool,
        renderer_factory: RendererFactory,
    ) -> Result<Self> {
        let event_loop = EventLoop::new()?;

        Ok(Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                window: None,
                renderer: None,
                renderer_factory: Some(renderer_factory),
                viewer: Viewer::new(attributes, loaders, pool),
                controller: CameraController::new(0.005, 0.1),
                last_frame: None,
            },
        })
    }

    /// Register the callback fired when the viewer starts running.
    pub fn set_on_ready(&mut self, callback: impl FnOnce() + 'static) {
        self.app_state.viewer.set_on_ready(callback);
    }

    pub fn viewer(&self) -> &Viewer {
        &self.app_state.viewer
    }

    pub fn viewer_mut(&mut self) -> &mut Viewer {
        &mut self.app_state.viewer
    }

    /// Run the application (consumes self and starts the event loop).
    pub fn run(mut self) -> Result<()> {
        let _ = env_logger::try_init();

        let event_loop = self
            .event_loop
            .take()
            .context("event loop already consumed")?;
        event_loop.set_control_flow(ControlFlow::Poll);

        event_loop.run_app(&mut self.app_state)?;
        Ok(())
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(
            WindowAttributes::default()
                .with_title("vitrine")
                .with_inner_size(winit::dpi::LogicalSize::new(1200, 800)),
        ) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                error!("Failed to create window: {err}");
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        let (width, height) = window.inner_size().into();
        self.viewer.resize(width, height);

        let Some(factory) = self.renderer_factory.take() else {
            return;
        };
        match pollster::block_on(factory(window.clone(), width, height)) {
            Ok(mut renderer) => {
                renderer.set_pixel_ratio(window.scale_factor());
                self.renderer = Some(renderer);
            }
            Err(err) => {
                error!("Failed to create renderer: {err}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &winit::event_loop::ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: winit::event::WindowEvent,
    ) {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    winit::event::KeyEvent {
                        physical_key: winit::keyboard::PhysicalKey::Code(key_code),
                        ..
                    },
                ..
            } => {
                if matches!(key_code, winit::keyboard::KeyCode::Escape) {
                    event_loop.exit();
                }
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.viewer.resize(width, height);
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(width, height);
                }
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.set_pixel_ratio(scale_factor);
                }
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = match self.last_frame.replace(now) {
                    Some(previous) => now.duration_since(previous).as_secs_f32(),
                    None => 0.0,
                };

                self.viewer.advance(dt);
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.render(self.viewer.scene(), self.viewer.camera());
                }
            }
            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: winit::event::DeviceEvent,
    ) {
        let Some(window) = self.window.as_ref() else {
            return;
        };

        self.controller
            .process_events(&event, window, self.viewer.controls_mut());
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
