pub mod camera_controller;
pub mod fitter;
pub mod orbit_controls;
pub mod perspective;

// Re-export main types
pub use camera_controller::CameraController;
pub use fitter::fit_camera;
pub use orbit_controls::OrbitControls;
pub use perspective::PerspectiveCamera;
