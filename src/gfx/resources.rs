//! Renderer resource bookkeeping
//!
//! The viewer owns scene data, while geometry buffers and decoded textures
//! live behind opaque handles allocated from a [`ResourcePool`]. Loaders
//! allocate handles while decoding; teardown walks the outgoing model and
//! returns every handle to the pool, so leaks show up as a non-zero live
//! count rather than as silent renderer growth.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use log::warn;

/// Handle to an uploaded geometry buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryHandle(u64);

/// Handle to a decoded texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(u64);

/// Pool shared between the viewer, its loaders and the model lifecycle.
pub type SharedPool = Rc<RefCell<ResourcePool>>;

/// Tracks which geometry and texture handles are currently live.
#[derive(Debug, Default)]
pub struct ResourcePool {
    next_id: u64,
    geometries: HashSet<u64>,
    textures: HashSet<u64>,
}

impl ResourcePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty pool behind the shared handle the viewer passes
    /// around.
    pub fn shared() -> SharedPool {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Allocates a handle for a freshly uploaded geometry buffer.
    pub fn alloc_geometry(&mut self) -> GeometryHandle {
        GeometryHandle(self.alloc(Kind::Geometry))
    }

    /// Allocates a handle for a freshly decoded texture.
    pub fn alloc_texture(&mut self) -> TextureHandle {
        TextureHandle(self.alloc(Kind::Texture))
    }

    /// Releases a geometry handle.
    ///
    /// # Returns
    /// `true` if the handle was live, `false` if it had already been freed.
    pub fn free_geometry(&mut self, handle: GeometryHandle) -> bool {
        let released = self.geometries.remove(&handle.0);
        if !released {
            warn!("Geometry handle {} freed twice", handle.0);
        }
        released
    }

    /// Releases a texture handle.
    ///
    /// # Returns
    /// `true` if the handle was live, `false` if it had already been freed.
    pub fn free_texture(&mut self, handle: TextureHandle) -> bool {
        let released = self.textures.remove(&handle.0);
        if !released {
            warn!("Texture handle {} freed twice", handle.0);
        }
        released
    }

    /// Number of geometry handles not yet freed.
    pub fn live_geometries(&self) -> usize {
        self.geometries.len()
    }

    /// Number of texture handles not yet freed.
    pub fn live_textures(&self) -> usize {
        self.textures.len()
    }

    fn alloc(&mut self, kind: Kind) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        match kind {
            Kind::Geometry => self.geometries.insert(id),
            Kind::Texture => self.textures.insert(id),
        };
        id
    }
}

enum Kind {
    Geometry,
    Texture,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_and_free_round_trip() {
        let mut pool = ResourcePool::new();
        let geometry = pool.alloc_geometry();
        let texture = pool.alloc_texture();
        assert_eq!(pool.live_geometries(), 1);
        assert_eq!(pool.live_textures(), 1);

        assert!(pool.free_geometry(geometry));
        assert!(pool.free_texture(texture));
        assert_eq!(pool.live_geometries(), 0);
        assert_eq!(pool.live_textures(), 0);
    }

    #[test]
    fn test_double_free_is_reported() {
        let mut pool = ResourcePool::new();
        let geometry = pool.alloc_geometry();
        assert!(pool.free_geometry(geometry));
        assert!(!pool.free_geometry(geometry));
    }

    #[test]
    fn test_handles_are_unique() {
        let mut pool = ResourcePool::new();
        let a = pool.alloc_texture();
        let b = pool.alloc_texture();
        assert_ne!(a, b);
    }

    #[test]
    fn test_kinds_are_tracked_separately() {
        let mut pool = ResourcePool::new();
        pool.alloc_geometry();
        pool.alloc_geometry();
        pool.alloc_texture();
        assert_eq!(pool.live_geometries(), 2);
        assert_eq!(pool.live_textures(), 1);
    }
}
