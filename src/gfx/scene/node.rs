//! The model node hierarchy
//!
//! Loaders produce a tree of [`Node`]s mirroring the source file's object
//! hierarchy. Each node carries a local transform and optionally a mesh;
//! world-space placement is the product of the transforms along the path
//! from the root.

use cgmath::{Matrix4, Rad, SquareMatrix, Vector3, Vector4};

use crate::gfx::resources::GeometryHandle;
use crate::gfx::scene::bounds::Aabb;
use crate::gfx::scene::material::Material;

/// Geometry attached to a node.
#[derive(Debug, Clone)]
pub struct MeshData {
    pub geometry: GeometryHandle,
    /// Bounds of the raw geometry in the node's local space.
    pub bounds: Aabb,
    pub materials: Vec<Material>,
}

impl MeshData {
    pub fn new(geometry: GeometryHandle, bounds: Aabb) -> Self {
        Self {
            geometry,
            bounds,
            materials: Vec::new(),
        }
    }
}

/// One element of the model hierarchy.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    /// Local transform relative to the parent node.
    pub transform: Matrix4<f32>,
    pub mesh: Option<MeshData>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            transform: Matrix4::identity(),
            mesh: None,
            children: Vec::new(),
        }
    }

    /// The node's position in its parent's space.
    pub fn translation(&self) -> Vector3<f32> {
        self.transform.w.truncate()
    }

    /// Moves the node to `translation` without touching rotation or scale.
    pub fn set_translation(&mut self, translation: Vector3<f32>) {
        self.transform.w = translation.extend(1.0);
    }

    /// Offsets the node by `delta` in its parent's space.
    pub fn translate(&mut self, delta: Vector3<f32>) {
        self.set_translation(self.translation() + delta);
    }

    /// Spins the node around the vertical axis through its own anchor point.
    pub fn rotate_y(&mut self, angle: Rad<f32>) {
        let anchor = self.transform.w;
        self.transform.w = Vector4::new(0.0, 0.0, 0.0, 1.0);
        self.transform = Matrix4::from_angle_y(angle) * self.transform;
        self.transform.w = anchor;
    }

    /// World-space bounds of this node and everything below it.
    ///
    /// A tree without any mesh yields a degenerate box at the origin, so
    /// callers always get a finite center to aim at.
    pub fn bounds(&self) -> Aabb {
        let mut out = Aabb::empty();
        self.collect_bounds(Matrix4::identity(), &mut out);
        if out.is_empty() {
            Aabb::zero()
        } else {
            out
        }
    }

    fn collect_bounds(&self, parent: Matrix4<f32>, out: &mut Aabb) {
        let world = parent * self.transform;
        if let Some(mesh) = &self.mesh {
            out.union(&mesh.bounds.transformed(&world));
        }
        for child in &self.children {
            child.collect_bounds(world, out);
        }
    }

    /// Calls `visit` on every material in the tree, depth first.
    pub fn visit_materials_mut(&mut self, visit: &mut dyn FnMut(&mut Material)) {
        if let Some(mesh) = &mut self.mesh {
            for material in &mut mesh.materials {
                visit(material);
            }
        }
        for child in &mut self.children {
            child.visit_materials_mut(visit);
        }
    }
}
