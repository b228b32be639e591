//! Translates raw mouse input into orbit control commands

use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, MouseScrollDelta},
    window::Window,
};

use super::orbit_controls::OrbitControls;

/// Feeds winit device events into [`OrbitControls`].
pub struct CameraController {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    is_mouse_pressed: bool,
}

impl CameraController {
    pub fn new(rotate_speed: f32, zoom_speed: f32) -> Self {
        Self {
            rotate_speed,
            zoom_speed,
            is_mouse_pressed: false,
        }
    }

    pub fn process_events(
        &mut self,
        event: &DeviceEvent,
        window: &Window,
        controls: &mut OrbitControls,
    ) {
        match event {
            DeviceEvent::Button {
                button: 0, // Left Mouse Button
                state,
            } => {
                self.is_mouse_pressed = *state == ElementState::Pressed;
            }
            DeviceEvent::MouseWheel { delta, .. } => {
                let scroll_amount = -match delta {
                    MouseScrollDelta::LineDelta(_, scroll) => scroll * 1.0,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y: scroll, .. }) => {
                        *scroll as f32
                    }
                };
                controls.zoom(scroll_amount * self.zoom_speed);
                window.request_redraw();
            }
            DeviceEvent::MouseMotion { delta } => {
                if self.is_mouse_pressed {
                    controls.rotate(
                        -delta.0 as f32 * self.rotate_speed,
                        delta.1 as f32 * self.rotate_speed,
                    );
                    window.request_redraw();
                }
            }
            _ => (),
        }
    }

    /// Returns true while the user is dragging.
    pub fn is_rotating(&self) -> bool {
        self.is_mouse_pressed
    }
}
