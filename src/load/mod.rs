//! # Model Loading Module
//!
//! Decoding is kept behind the [`ModelLoader`] trait so the viewer core
//! never depends on a specific file format library. A [`LoaderSet`] bundles
//! one loader per supported format; the viewer picks the right one from the
//! source path's extension and polls the returned future until the decoded
//! asset is ready.

use futures::future::LocalBoxFuture;

use crate::error::ViewerError;
use crate::gfx::animation::AnimationClip;
use crate::gfx::scene::Node;

/// Model file formats the viewer accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelFormat {
    Glb,
    Fbx,
}

impl ModelFormat {
    /// Determines the format from a source path's extension.
    ///
    /// Matching is ASCII case-insensitive, so `Model.GLB` loads like
    /// `model.glb`.
    pub fn from_source(source: &str) -> Result<ModelFormat, ViewerError> {
        let extension = source.rsplit('.').next().unwrap_or_default();
        if extension.eq_ignore_ascii_case("glb") {
            Ok(ModelFormat::Glb)
        } else if extension.eq_ignore_ascii_case("fbx") {
            Ok(ModelFormat::Fbx)
        } else {
            Err(ViewerError::UnsupportedFormat {
                extension: extension.to_string(),
            })
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ModelFormat::Glb => "glb",
            ModelFormat::Fbx => "fbx",
        }
    }
}

/// A decoded model: the node hierarchy plus any animation clips.
pub struct LoadedAsset {
    pub root: Node,
    pub clips: Vec<AnimationClip>,
}

/// Decodes one model format into scene data.
///
/// Loaders allocate geometry and texture handles from the shared pool while
/// decoding; ownership of those handles transfers to the viewer with the
/// returned asset.
pub trait ModelLoader {
    fn load(&self, source: &str) -> LocalBoxFuture<'static, anyhow::Result<LoadedAsset>>;
}

/// One loader per supported format, injected when the viewer is built.
pub struct LoaderSet {
    glb: Box<dyn ModelLoader>,
    fbx: Box<dyn ModelLoader>,
}

impl LoaderSet {
    pub fn new(glb: Box<dyn ModelLoader>, fbx: Box<dyn ModelLoader>) -> Self {
        Self { glb, fbx }
    }

    pub fn for_format(&self, format: ModelFormat) -> &dyn ModelLoader {
        match format {
            ModelFormat::Glb => self.glb.as_ref(),
            ModelFormat::Fbx => self.fbx.as_ref(),
        }
    }
}
