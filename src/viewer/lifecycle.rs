//! Model lifecycle: loading, replacement and disposal
//!
//! [`ModelLifecycle`] owns the one model slot of the viewer. Loads are
//! asynchronous; the in-flight future is polled from the frame tick so the
//! render loop and orbit input keep running while a model decodes. Starting
//! a new load while one is pending cancels the pending one: the most
//! recently requested source always wins.
//!
//! Replacement is dispose-then-attach. The outgoing model is detached and
//! every geometry and texture handle it owns (environment maps excepted) is
//! returned to the pool before the incoming model enters the scene, which
//! bounds peak resource usage to one model's worth.

use std::task::{Context, Poll};

use cgmath::EuclideanSpace;
use futures::future::LocalBoxFuture;
use futures::task::noop_waker_ref;
use futures::FutureExt;
use log::{debug, error, info};

use crate::config::Color;
use crate::error::ViewerError;
use crate::gfx::animation::AnimationPlayer;
use crate::gfx::camera::{fit_camera, OrbitControls, PerspectiveCamera};
use crate::gfx::resources::{ResourcePool, SharedPool};
use crate::gfx::scene::{Node, Scene};
use crate::load::{LoadedAsset, LoaderSet, ModelFormat};

/// Surface color applied when the base-color override is set without a
/// usable value.
const DEFAULT_BASE_COLOR: Color = Color::rgb(
    0x69 as f32 / 255.0,
    0x69 as f32 / 255.0,
    0x69 as f32 / 255.0,
);

/// Shininess forced onto every material alongside the base-color override.
const OVERRIDE_SHININESS: f32 = 100.0;

/// Externally observable state of the model slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    /// Nothing displayed and nothing in flight.
    Empty,
    /// A model is displayed and no load is pending.
    Loaded,
    /// A load is in flight; any displayed model stays up until it completes.
    Replacing,
}

/// Metadata about the model currently in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayedModel {
    pub source: String,
    pub format: ModelFormat,
}

struct PendingLoad {
    source: String,
    format: ModelFormat,
    future: LocalBoxFuture<'static, anyhow::Result<LoadedAsset>>,
}

/// State machine owning the viewer's single model slot.
pub struct ModelLifecycle {
    loaders: LoaderSet,
    pool: SharedPool,
    displayed: Option<DisplayedModel>,
    pending: Option<PendingLoad>,
    player: Option<AnimationPlayer>,
}

impl ModelLifecycle {
    pub fn new(loaders: LoaderSet, pool: SharedPool) -> Self {
        Self {
            loaders,
            pool,
            displayed: None,
            pending: None,
            player: None,
        }
    }

    /// The current phase, derived from what is displayed and in flight.
    pub fn phase(&self) -> LifecyclePhase {
        if self.pending.is_some() {
            LifecyclePhase::Replacing
        } else if self.displayed.is_some() {
            LifecyclePhase::Loaded
        } else {
            LifecyclePhase::Empty
        }
    }

    pub fn displayed(&self) -> Option<&DisplayedModel> {
        self.displayed.as_ref()
    }

    pub fn player(&self) -> Option<&AnimationPlayer> {
        self.player.as_ref()
    }

    /// Starts loading `source`, cancelling any load already in flight.
    ///
    /// An empty source is a no-op. An unrecognized extension fails with
    /// [`ViewerError::UnsupportedFormat`] before any state changes, so the
    /// displayed model and any pending load both survive rejection.
    pub fn load(&mut self, source: &str) -> Result<(), ViewerError> {
        if source.is_empty() {
            return Ok(());
        }
        let format = ModelFormat::from_source(source)?;

        if let Some(previous) = self.pending.take() {
            info!(
                "Cancelling in-flight load of `{}` in favor of `{}`",
                previous.source, source
            );
        }

        info!("Loading model `{source}`");
        let future = self.loaders.for_format(format).load(source);
        self.pending = Some(PendingLoad {
            source: source.to_string(),
            format,
            future,
        });
        Ok(())
    }

    /// Polls the in-flight load, if any, and completes it when ready.
    ///
    /// `base_color` is the current override from the configuration; it is
    /// reapplied to the incoming model so replacements keep the override.
    pub fn poll_pending(
        &mut self,
        scene: &mut Scene,
        camera: &mut PerspectiveCamera,
        controls: &mut OrbitControls,
        base_color: Option<Color>,
    ) {
        let Some(mut pending) = self.pending.take() else {
            return;
        };
        let mut cx = Context::from_waker(noop_waker_ref());
        match pending.future.poll_unpin(&mut cx) {
            Poll::Pending => self.pending = Some(pending),
            Poll::Ready(Ok(asset)) => {
                self.complete(
                    pending.source,
                    pending.format,
                    asset,
                    scene,
                    camera,
                    controls,
                    base_color,
                );
            }
            Poll::Ready(Err(cause)) => {
                let failure = ViewerError::load_failed(cause);
                error!("Failed to load `{}`: {failure}", pending.source);
            }
        }
    }

    /// Detaches and disposes the displayed model.
    ///
    /// Also cancels any pending load, since an explicit clear means the
    /// caller no longer wants a model at all.
    pub fn clear(&mut self, scene: &mut Scene) {
        if self.phase() == LifecyclePhase::Empty {
            debug!("Clear requested with no model displayed");
            return;
        }
        if let Some(pending) = self.pending.take() {
            info!("Cancelled pending load of `{}`", pending.source);
        }
        self.dispose_displayed(scene);
    }

    /// Recolors every material of the displayed model.
    ///
    /// For the secondary format the color texture is detached first, since
    /// a texture and a flat color multiply into a near-black appearance.
    /// No-op when nothing is displayed.
    pub fn apply_base_color(&self, scene: &mut Scene, color: Option<Color>) {
        let Some(object) = scene.object.as_mut() else {
            return;
        };
        let detach_color_map = self
            .displayed
            .as_ref()
            .is_some_and(|model| model.format == ModelFormat::Fbx);
        let resolved = color.unwrap_or(DEFAULT_BASE_COLOR);
        let pool = &self.pool;

        object.visit_materials_mut(&mut |material| {
            if detach_color_map {
                if let Some(handle) = material.color_map.take() {
                    pool.borrow_mut().free_texture(handle);
                }
            }
            material.base_color = resolved;
            material.shininess = OVERRIDE_SHININESS;
            material.needs_upload = true;
        });
    }

    /// Advances the animation player, if one is active.
    pub fn advance_animation(&mut self, dt: f32) {
        if let Some(player) = self.player.as_mut() {
            player.advance(dt);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn complete(
        &mut self,
        source: String,
        format: ModelFormat,
        asset: LoadedAsset,
        scene: &mut Scene,
        camera: &mut PerspectiveCamera,
        controls: &mut OrbitControls,
        base_color: Option<Color>,
    ) {
        self.dispose_displayed(scene);

        let mut root = asset.root;
        let center = root.bounds().center().to_vec();
        root.translate(-center);

        let fitted = root.bounds();
        scene.attach_object(root);
        fit_camera(&fitted, camera, controls);

        self.displayed = Some(DisplayedModel {
            source: source.clone(),
            format,
        });
        if base_color.is_some() {
            self.apply_base_color(scene, base_color);
        }

        if asset.clips.len() > 1 {
            debug!(
                "Ignoring {} additional animation clips in `{source}`",
                asset.clips.len() - 1
            );
        }
        self.player = asset.clips.first().cloned().map(AnimationPlayer::new);

        info!("Model `{source}` loaded");
    }

    fn dispose_displayed(&mut self, scene: &mut Scene) {
        self.player = None;
        self.displayed = None;
        if let Some(object) = scene.detach_object() {
            let mut pool = self.pool.borrow_mut();
            Self::release_tree(&mut pool, object);
        }
    }

    fn release_tree(pool: &mut ResourcePool, node: Node) {
        if let Some(mesh) = node.mesh {
            pool.free_geometry(mesh.geometry);
            for material in mesh.materials {
                for handle in material.disposable_textures() {
                    pool.free_texture(handle);
                }
            }
        }
        for child in node.children {
            Self::release_tree(pool, child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::animation::AnimationClip;
    use crate::gfx::scene::{Aabb, Material, MeshData};
    use crate::load::ModelLoader;
    use cgmath::Point3;
    use futures::FutureExt;
    use std::rc::Rc;

    /// Completes immediately with a one-mesh model named after the source.
    struct StubLoader {
        pool: SharedPool,
        bounds: Aabb,
        clips: Vec<AnimationClip>,
    }

    impl StubLoader {
        fn unit(pool: &SharedPool) -> Self {
            Self {
                pool: Rc::clone(pool),
                bounds: Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0)),
                clips: Vec::new(),
            }
        }

        fn with_bounds(pool: &SharedPool, bounds: Aabb) -> Self {
            Self {
                pool: Rc::clone(pool),
                bounds,
                clips: Vec::new(),
            }
        }

        fn with_clips(pool: &SharedPool, clips: Vec<AnimationClip>) -> Self {
            Self {
                pool: Rc::clone(pool),
                bounds: Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0)),
                clips,
            }
        }
    }

    impl ModelLoader for StubLoader {
        fn load(&self, source: &str) -> LocalBoxFuture<'static, anyhow::Result<LoadedAsset>> {
            let pool = Rc::clone(&self.pool);
            let bounds = self.bounds;
            let clips = self.clips.clone();
            let source = source.to_string();
            async move {
                let (geometry, texture) = {
                    let mut pool = pool.borrow_mut();
                    (pool.alloc_geometry(), pool.alloc_texture())
                };
                let mut mesh = MeshData::new(geometry, bounds);
                let mut material = Material::new("surface");
                material.color_map = Some(texture);
                mesh.materials.push(material);

                let mut root = Node::new(&source);
                root.mesh = Some(mesh);
                Ok(LoadedAsset {
                    root,
                    clips,
                })
            }
            .boxed_local()
        }
    }

    /// Like [`StubLoader::unit`] but the root node starts translated.
    struct TranslatedLoader {
        pool: SharedPool,
        offset: cgmath::Vector3<f32>,
    }

    impl ModelLoader for TranslatedLoader {
        fn load(&self, source: &str) -> LocalBoxFuture<'static, anyhow::Result<LoadedAsset>> {
            let pool = Rc::clone(&self.pool);
            let offset = self.offset;
            let source = source.to_string();
            async move {
                let geometry = pool.borrow_mut().alloc_geometry();
                let mut root = Node::new(&source);
                root.mesh = Some(MeshData::new(
                    geometry,
                    Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0)),
                ));
                root.translate(offset);
                Ok(LoadedAsset {
                    root,
                    clips: Vec::new(),
                })
            }
            .boxed_local()
        }
    }

    /// Always fails after one poll.
    struct FailingLoader;

    impl ModelLoader for FailingLoader {
        fn load(&self, _source: &str) -> LocalBoxFuture<'static, anyhow::Result<LoadedAsset>> {
            async { Err(anyhow::anyhow!("decode failed")) }.boxed_local()
        }
    }

    /// Never completes.
    struct StalledLoader;

    impl ModelLoader for StalledLoader {
        fn load(&self, _source: &str) -> LocalBoxFuture<'static, anyhow::Result<LoadedAsset>> {
            futures::future::pending().boxed_local()
        }
    }

    struct Rig {
        lifecycle: ModelLifecycle,
        pool: SharedPool,
        scene: Scene,
        camera: PerspectiveCamera,
        controls: OrbitControls,
    }

    impl Rig {
        fn new(make_loaders: impl FnOnce(&SharedPool) -> LoaderSet) -> Self {
            let pool = ResourcePool::shared();
            let loaders = make_loaders(&pool);
            Self {
                lifecycle: ModelLifecycle::new(loaders, Rc::clone(&pool)),
                pool,
                scene: Scene::new(),
                camera: PerspectiveCamera::new(1.0),
                controls: OrbitControls::new(),
            }
        }

        fn stubbed() -> Self {
            Self::new(|pool| {
                LoaderSet::new(
                    Box::new(StubLoader::unit(pool)),
                    Box::new(StubLoader::unit(pool)),
                )
            })
        }

        fn poll(&mut self, base_color: Option<Color>) {
            self.lifecycle.poll_pending(
                &mut self.scene,
                &mut self.camera,
                &mut self.controls,
                base_color,
            );
        }
    }

    #[test]
    fn test_load_then_poll_reaches_loaded() {
        let mut rig = Rig::stubbed();
        assert_eq!(rig.lifecycle.phase(), LifecyclePhase::Empty);

        rig.lifecycle.load("ship.glb").unwrap();
        assert_eq!(rig.lifecycle.phase(), LifecyclePhase::Replacing);

        rig.poll(None);
        assert_eq!(rig.lifecycle.phase(), LifecyclePhase::Loaded);
        assert_eq!(rig.lifecycle.displayed().unwrap().source, "ship.glb");
        assert_eq!(rig.lifecycle.displayed().unwrap().format, ModelFormat::Glb);
        assert!(rig.scene.object.is_some());
    }

    #[test]
    fn test_replacement_releases_the_previous_model() {
        let mut rig = Rig::stubbed();
        rig.lifecycle.load("first.glb").unwrap();
        rig.poll(None);
        assert_eq!(rig.pool.borrow().live_geometries(), 1);
        assert_eq!(rig.pool.borrow().live_textures(), 1);

        rig.lifecycle.load("second.glb").unwrap();
        rig.poll(None);

        assert_eq!(rig.lifecycle.displayed().unwrap().source, "second.glb");
        assert_eq!(rig.scene.object.as_ref().unwrap().name, "second.glb");
        // Exactly one model's worth of resources remains.
        assert_eq!(rig.pool.borrow().live_geometries(), 1);
        assert_eq!(rig.pool.borrow().live_textures(), 1);
    }

    #[test]
    fn test_unsupported_extension_is_rejected_before_mutation() {
        let mut rig = Rig::stubbed();
        rig.lifecycle.load("ship.glb").unwrap();
        rig.poll(None);

        let err = rig.lifecycle.load("ship.obj").unwrap_err();
        assert!(matches!(err, ViewerError::UnsupportedFormat { .. }));
        assert_eq!(rig.lifecycle.phase(), LifecyclePhase::Loaded);
        assert_eq!(rig.lifecycle.displayed().unwrap().source, "ship.glb");
        assert_eq!(rig.pool.borrow().live_geometries(), 1);
    }

    #[test]
    fn test_empty_source_is_a_no_op() {
        let mut rig = Rig::stubbed();
        rig.lifecycle.load("").unwrap();
        assert_eq!(rig.lifecycle.phase(), LifecyclePhase::Empty);
    }

    #[test]
    fn test_loader_failure_preserves_the_previous_model() {
        let mut rig = Rig::new(|pool| {
            LoaderSet::new(Box::new(StubLoader::unit(pool)), Box::new(FailingLoader))
        });
        rig.lifecycle.load("keep.glb").unwrap();
        rig.poll(None);

        rig.lifecycle.load("broken.fbx").unwrap();
        rig.poll(None);

        assert_eq!(rig.lifecycle.phase(), LifecyclePhase::Loaded);
        assert_eq!(rig.lifecycle.displayed().unwrap().source, "keep.glb");
        assert_eq!(rig.scene.object.as_ref().unwrap().name, "keep.glb");
        assert_eq!(rig.pool.borrow().live_geometries(), 1);
    }

    #[test]
    fn test_new_load_cancels_the_pending_one() {
        let mut rig = Rig::new(|pool| {
            LoaderSet::new(Box::new(StubLoader::unit(pool)), Box::new(StalledLoader))
        });

        rig.lifecycle.load("slow.fbx").unwrap();
        rig.poll(None);
        assert_eq!(rig.lifecycle.phase(), LifecyclePhase::Replacing);

        rig.lifecycle.load("fast.glb").unwrap();
        rig.poll(None);

        assert_eq!(rig.lifecycle.phase(), LifecyclePhase::Loaded);
        assert_eq!(rig.lifecycle.displayed().unwrap().source, "fast.glb");
    }

    #[test]
    fn test_clear_releases_everything() {
        let mut rig = Rig::stubbed();
        rig.lifecycle.load("ship.glb").unwrap();
        rig.poll(None);

        rig.lifecycle.clear(&mut rig.scene);
        assert_eq!(rig.lifecycle.phase(), LifecyclePhase::Empty);
        assert!(rig.scene.object.is_none());
        assert_eq!(rig.pool.borrow().live_geometries(), 0);
        assert_eq!(rig.pool.borrow().live_textures(), 0);

        // Clearing again is a quiet no-op.
        rig.lifecycle.clear(&mut rig.scene);
        assert_eq!(rig.lifecycle.phase(), LifecyclePhase::Empty);
    }

    #[test]
    fn test_clear_cancels_a_pending_load() {
        let mut rig = Rig::new(|pool| {
            LoaderSet::new(Box::new(StubLoader::unit(pool)), Box::new(StalledLoader))
        });
        rig.lifecycle.load("slow.fbx").unwrap();
        rig.lifecycle.clear(&mut rig.scene);

        assert_eq!(rig.lifecycle.phase(), LifecyclePhase::Empty);
        rig.poll(None);
        assert_eq!(rig.lifecycle.phase(), LifecyclePhase::Empty);
    }

    #[test]
    fn test_completion_recenters_and_fits_the_camera() {
        let off_center = Aabb::new(Point3::new(9.0, 9.0, 9.0), Point3::new(11.0, 11.0, 11.0));
        let mut rig = Rig::new(|pool| {
            LoaderSet::new(
                Box::new(StubLoader::with_bounds(pool, off_center)),
                Box::new(StubLoader::unit(pool)),
            )
        });

        rig.lifecycle.load("far.glb").unwrap();
        rig.poll(None);

        let object = rig.scene.object.as_ref().unwrap();
        let center = object.bounds().center();
        assert!(center.x.abs() < 1e-4);
        assert!(center.y.abs() < 1e-4);
        assert!(center.z.abs() < 1e-4);

        let size = object.bounds().diagonal();
        assert!((rig.controls.max_distance - size * 10.0).abs() < 1e-3);
        assert!((rig.camera.znear - size / 100.0).abs() < 1e-5);
        assert_eq!(rig.camera.target, Point3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_completion_recenters_a_pre_translated_root() {
        let mut rig = Rig::new(|pool| {
            LoaderSet::new(
                Box::new(TranslatedLoader {
                    pool: Rc::clone(pool),
                    offset: cgmath::vec3(5.0, -3.0, 2.0),
                }),
                Box::new(StubLoader::unit(pool)),
            )
        });

        rig.lifecycle.load("shifted.glb").unwrap();
        rig.poll(None);

        let center = rig.scene.object.as_ref().unwrap().bounds().center();
        assert!(center.x.abs() < 1e-4);
        assert!(center.y.abs() < 1e-4);
        assert!(center.z.abs() < 1e-4);
    }

    #[test]
    fn test_base_color_override_is_applied_on_completion() {
        let mut rig = Rig::stubbed();
        rig.lifecycle.load("ship.glb").unwrap();
        rig.poll(Some(Color::from_u8(255, 0, 0)));

        let mut seen = 0;
        let object = rig.scene.object.as_mut().unwrap();
        object.visit_materials_mut(&mut |material| {
            assert_eq!(material.base_color, Color::from_u8(255, 0, 0));
            assert_eq!(material.shininess, OVERRIDE_SHININESS);
            assert!(material.needs_upload);
            seen += 1;
        });
        assert_eq!(seen, 1);
    }

    #[test]
    fn test_base_color_detaches_color_maps_for_fbx() {
        let mut rig = Rig::stubbed();
        rig.lifecycle.load("rig.fbx").unwrap();
        rig.poll(None);
        assert_eq!(rig.pool.borrow().live_textures(), 1);

        rig.lifecycle
            .apply_base_color(&mut rig.scene, Some(Color::from_u8(0, 255, 0)));

        let object = rig.scene.object.as_mut().unwrap();
        object.visit_materials_mut(&mut |material| {
            assert_eq!(material.color_map, None);
        });
        assert_eq!(rig.pool.borrow().live_textures(), 0);
    }

    #[test]
    fn test_base_color_keeps_color_maps_for_glb() {
        let mut rig = Rig::stubbed();
        rig.lifecycle.load("ship.glb").unwrap();
        rig.poll(None);

        rig.lifecycle
            .apply_base_color(&mut rig.scene, Some(Color::from_u8(0, 255, 0)));

        let object = rig.scene.object.as_mut().unwrap();
        object.visit_materials_mut(&mut |material| {
            assert!(material.color_map.is_some());
        });
        assert_eq!(rig.pool.borrow().live_textures(), 1);
    }

    #[test]
    fn test_missing_base_color_falls_back_to_the_default_gray() {
        let mut rig = Rig::stubbed();
        rig.lifecycle.load("ship.glb").unwrap();
        rig.poll(None);

        rig.lifecycle.apply_base_color(&mut rig.scene, None);

        let object = rig.scene.object.as_mut().unwrap();
        object.visit_materials_mut(&mut |material| {
            assert_eq!(material.base_color, Color::from_u8(0x69, 0x69, 0x69));
        });
    }

    #[test]
    fn test_apply_base_color_without_a_model_is_a_no_op() {
        let mut rig = Rig::stubbed();
        rig.lifecycle
            .apply_base_color(&mut rig.scene, Some(Color::WHITE));
        assert!(rig.scene.object.is_none());
    }

    #[test]
    fn test_only_the_first_clip_is_played() {
        let clips = vec![
            AnimationClip::new("intro", 1.0),
            AnimationClip::new("loop", 4.0),
        ];
        let mut rig = Rig::new(|pool| {
            LoaderSet::new(
                Box::new(StubLoader::with_clips(pool, clips)),
                Box::new(StubLoader::unit(pool)),
            )
        });

        rig.lifecycle.load("animated.glb").unwrap();
        rig.poll(None);

        let player = rig.lifecycle.player().unwrap();
        assert_eq!(player.clip().name, "intro");
        assert!(player.is_playing());

        rig.lifecycle.advance_animation(2.0);
        assert!(!rig.lifecycle.player().unwrap().is_playing());
    }

    #[test]
    fn test_clipless_model_has_no_player() {
        let mut rig = Rig::stubbed();
        rig.lifecycle.load("static.glb").unwrap();
        rig.poll(None);
        assert!(rig.lifecycle.player().is_none());
    }
}
