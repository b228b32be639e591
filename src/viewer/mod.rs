//! # Viewer Module
//!
//! The attribute-driven core of the crate. A [`Viewer`] owns the scene, the
//! camera with its orbit controls, the lighting rig and the model lifecycle,
//! and reconfigures all of them in response to three declarative attributes:
//!
//! - `model` - source path of the model to display
//! - `preset` - name of a lighting preset
//! - `base_color` - flat color override for every mesh material
//!
//! ## Construction vs. change
//!
//! Attributes present at construction are applied once during
//! [`Viewer::new`]; hosts that re-deliver those values as change
//! notifications are absorbed by the echo window (see [`attributes`]).
//! Subsequent changes reconfigure the running viewer: a preset rebuilds
//! lights and background, a model source starts an asynchronous load that
//! replaces the displayed model on completion, and a base color repaints
//! the displayed model's materials.
//!
//! ## Error policy
//!
//! Attribute handling never panics and never propagates errors to the host:
//! unknown presets fall back to `Initial`, malformed colors and unsupported
//! model sources are logged and ignored, and the viewer stays interactive
//! after every failure.

pub mod attributes;
pub mod lifecycle;

// Re-export main types
pub use attributes::{InitialAttributes, ViewerAttribute};
pub use lifecycle::{DisplayedModel, LifecyclePhase, ModelLifecycle};

use std::rc::Rc;

use cgmath::Rad;
use log::{debug, error, warn};

use crate::config::{Color, ConfigField, Preset, ViewerConfig};
use crate::gfx::camera::{OrbitControls, PerspectiveCamera};
use crate::gfx::lighting::LightingRig;
use crate::gfx::resources::{SharedPool, TextureHandle};
use crate::gfx::scene::{Background, Scene, TextureChannel};
use crate::load::LoaderSet;

use attributes::{AttributeEchoes, ReactorPhase};

/// Radians the displayed model spins per frame while auto-rotate is on.
const AUTO_ROTATE_STEP: f32 = 0.005;

/// The embeddable model viewer.
pub struct Viewer {
    config: ViewerConfig,
    scene: Scene,
    camera: PerspectiveCamera,
    controls: OrbitControls,
    rig: LightingRig,
    lifecycle: ModelLifecycle,
    pool: SharedPool,
    phase: ReactorPhase,
    initial_model: Option<String>,
    on_ready: Option<Box<dyn FnOnce()>>,
    started: bool,
}

impl Viewer {
    /// Builds a viewer from its construction-time attributes.
    ///
    /// The loader set and resource pool are injected by the embedding scope
    /// so tests can substitute fakes and multiple viewers never share hidden
    /// global state. An initial model load, if a `model` attribute is
    /// present, is deferred to the first frame tick so the render loop
    /// starts independent of the load outcome.
    pub fn new(attributes: InitialAttributes, loaders: LoaderSet, pool: SharedPool) -> Self {
        let mut config = ViewerConfig::default();
        if let Some(name) = attributes.preset.as_deref() {
            // Preset patches carry only range-valid values.
            let _ = config.merge(Self::resolve_preset(name).patch());
        }
        if let Some(text) = attributes.base_color.as_deref() {
            match text.parse::<Color>() {
                Ok(color) => config.base_color = Some(color),
                Err(err) => warn!("Ignoring initial base color `{text}`: {err}"),
            }
        }

        let echoes = AttributeEchoes::arm(&attributes);
        let phase = if echoes.any_armed() {
            ReactorPhase::Initializing(echoes)
        } else {
            ReactorPhase::Steady
        };

        let mut scene = Scene::new();
        let mut rig = LightingRig::new();
        rig.rebuild(&mut scene, &config);
        scene.background = Background::Color(config.background_color);

        Self {
            lifecycle: ModelLifecycle::new(loaders, Rc::clone(&pool)),
            config,
            scene,
            camera: PerspectiveCamera::new(1.0),
            controls: OrbitControls::new(),
            rig,
            pool,
            phase,
            initial_model: attributes.model,
            on_ready: None,
            started: false,
        }
    }

    /// Registers the callback fired once when the viewer starts running.
    ///
    /// Must be set before the first frame tick; later registrations are
    /// never invoked.
    pub fn set_on_ready(&mut self, callback: impl FnOnce() + 'static) {
        self.on_ready = Some(Box::new(callback));
    }

    /// Reacts to one attribute change notification from the host.
    ///
    /// During the construction echo window, one notification per
    /// construction-time attribute is absorbed; everything after that is
    /// treated as a real change, even a value identical to the one set at
    /// construction.
    pub fn attribute_changed(&mut self, attribute: ViewerAttribute, value: Option<&str>) {
        if let ReactorPhase::Initializing(echoes) = &mut self.phase {
            if echoes.consume(attribute) {
                let drained = !echoes.any_armed();
                if drained {
                    self.phase = ReactorPhase::Steady;
                }
                debug!("Absorbed construction echo for `{}`", attribute.name());
                return;
            }
        }

        match attribute {
            ViewerAttribute::Model => {
                if let Err(err) = self.lifecycle.load(value.unwrap_or_default()) {
                    error!("Model attribute rejected: {err}");
                }
            }
            ViewerAttribute::Preset => self.apply_preset_attribute(value),
            ViewerAttribute::BaseColor => self.apply_base_color_attribute(value),
        }
    }

    /// Like [`Viewer::attribute_changed`], keyed by attribute name.
    /// Unobserved names are ignored.
    pub fn attribute_changed_by_name(&mut self, name: &str, value: Option<&str>) {
        match ViewerAttribute::from_name(name) {
            Some(attribute) => self.attribute_changed(attribute, value),
            None => debug!("Ignoring unobserved attribute `{name}`"),
        }
    }

    /// Advances the viewer by one frame tick.
    ///
    /// Order per tick: finish an in-flight load if its future is ready,
    /// apply auto-rotation, settle the orbit controls, then advance the
    /// animation player by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        if !self.started {
            self.started = true;
            if let Some(callback) = self.on_ready.take() {
                callback();
            }
            if let Some(source) = self.initial_model.take() {
                if let Err(err) = self.lifecycle.load(&source) {
                    error!("Initial model rejected: {err}");
                }
            }
        }

        self.lifecycle.poll_pending(
            &mut self.scene,
            &mut self.camera,
            &mut self.controls,
            self.config.base_color,
        );

        if self.config.auto_rotate {
            if let Some(object) = self.scene.object.as_mut() {
                object.rotate_y(Rad(AUTO_ROTATE_STEP));
            }
        }

        self.controls.update(&mut self.camera);
        self.lifecycle.advance_animation(dt);
    }

    /// Handles a viewport resize, in physical pixels.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize_projection(width, height);
    }

    /// Detaches and disposes the displayed model, cancelling any pending
    /// load.
    pub fn clear_model(&mut self) {
        self.lifecycle.clear(&mut self.scene);
    }

    /// Installs `texture` as the scene environment, releasing the previous
    /// one, and re-evaluates the backdrop.
    pub fn set_environment(&mut self, texture: Option<TextureHandle>) {
        let previous = std::mem::replace(&mut self.scene.environment, texture);
        if let Some(old) = previous {
            if Some(old) != texture {
                self.pool.borrow_mut().free_texture(old);
            }
        }
        self.rebuild_background();
    }

    /// Assigns `texture` to one slot of every material of the displayed
    /// model, releasing the handles it replaces.
    ///
    /// Without a displayed model this is a no-op and ownership of `texture`
    /// stays with the caller.
    pub fn set_material_texture(&mut self, channel: TextureChannel, texture: TextureHandle) {
        let Some(object) = self.scene.object.as_mut() else {
            warn!(
                "No model displayed; ignoring `{}` texture assignment",
                channel.label()
            );
            return;
        };

        let mut replaced = Vec::new();
        object.visit_materials_mut(&mut |material| {
            let slot = material.texture_slot_mut(channel);
            if let Some(previous) = slot.replace(texture) {
                if previous != texture && !replaced.contains(&previous) {
                    replaced.push(previous);
                }
            }
            material.needs_upload = true;
        });

        let mut pool = self.pool.borrow_mut();
        for handle in replaced {
            pool.free_texture(handle);
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut OrbitControls {
        &mut self.controls
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn lifecycle(&self) -> &ModelLifecycle {
        &self.lifecycle
    }

    pub fn pool(&self) -> &SharedPool {
        &self.pool
    }

    fn apply_preset_attribute(&mut self, value: Option<&str>) {
        let preset = match value {
            Some(name) => Self::resolve_preset(name),
            None => {
                debug!(
                    "Preset attribute removed; reverting to `{}`",
                    Preset::Initial.name()
                );
                Preset::Initial
            }
        };
        self.apply_preset(preset);
    }

    fn apply_preset(&mut self, preset: Preset) {
        // Preset patches carry only range-valid values.
        let _ = self.config.merge(preset.patch());
        self.rig.rebuild(&mut self.scene, &self.config);
        self.rebuild_background();
    }

    fn resolve_preset(name: &str) -> Preset {
        match Preset::from_name(name) {
            Ok(preset) => preset,
            Err(err) => {
                warn!("{err}; falling back to `{}`", Preset::Initial.name());
                Preset::Initial
            }
        }
    }

    fn apply_base_color_attribute(&mut self, value: Option<&str>) {
        let parsed = match value {
            Some(text) => match text.parse::<Color>() {
                Ok(color) => Some(color),
                Err(err) => {
                    warn!("Ignoring base color `{text}`: {err}");
                    return;
                }
            },
            None => None,
        };
        // Base color carries no range validation.
        let _ = self.config.apply(ConfigField::BaseColor(parsed));
        self.lifecycle
            .apply_base_color(&mut self.scene, self.config.base_color);
    }

    fn rebuild_background(&mut self) {
        self.scene.background =
            if self.config.background_enabled && self.scene.environment.is_some() {
                Background::Environment
            } else {
                Background::Color(self.config.background_color)
            };
    }
}

impl Drop for Viewer {
    fn drop(&mut self) {
        self.lifecycle.clear(&mut self.scene);
        if let Some(environment) = self.scene.environment.take() {
            self.pool.borrow_mut().free_texture(environment);
        }
    }
}
