//! Axis-aligned bounding boxes for camera fitting and recentering

use cgmath::{InnerSpace, Matrix4, Point3, Transform, Vector3};

/// An axis-aligned bounding box in world space.
///
/// The empty box is the identity for [`Aabb::include`]: its minimum sits at
/// positive infinity and its maximum at negative infinity, so the first
/// included point defines the box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

impl Aabb {
    /// The box containing no points.
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY),
            max: Point3::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
        }
    }

    /// A degenerate box collapsed onto the origin.
    pub fn zero() -> Self {
        Self {
            min: Point3::new(0.0, 0.0, 0.0),
            max: Point3::new(0.0, 0.0, 0.0),
        }
    }

    pub fn new(min: Point3<f32>, max: Point3<f32>) -> Self {
        Self { min, max }
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Grows the box to contain `point`.
    pub fn include(&mut self, point: Point3<f32>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    /// Grows the box to contain every point of `other`.
    pub fn union(&mut self, other: &Aabb) {
        if other.is_empty() {
            return;
        }
        self.include(other.min);
        self.include(other.max);
    }

    /// The box containing all eight corners after applying `transform`.
    pub fn transformed(&self, transform: &Matrix4<f32>) -> Aabb {
        if self.is_empty() {
            return *self;
        }
        let mut out = Aabb::empty();
        for corner in self.corners() {
            out.include(transform.transform_point(corner));
        }
        out
    }

    pub fn center(&self) -> Point3<f32> {
        self.min + (self.max - self.min) * 0.5
    }

    /// Edge lengths along each axis.
    pub fn extents(&self) -> Vector3<f32> {
        self.max - self.min
    }

    /// Length of the main diagonal, the size measure used for camera fitting.
    pub fn diagonal(&self) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        self.extents().magnitude()
    }

    fn corners(&self) -> [Point3<f32>; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Point3::new(lo.x, lo.y, lo.z),
            Point3::new(hi.x, lo.y, lo.z),
            Point3::new(lo.x, hi.y, lo.z),
            Point3::new(hi.x, hi.y, lo.z),
            Point3::new(lo.x, lo.y, hi.z),
            Point3::new(hi.x, lo.y, hi.z),
            Point3::new(lo.x, hi.y, hi.z),
            Point3::new(hi.x, hi.y, hi.z),
        ]
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{vec3, Matrix4};

    #[test]
    fn test_first_include_defines_the_box() {
        let mut aabb = Aabb::empty();
        assert!(aabb.is_empty());

        aabb.include(Point3::new(1.0, 2.0, 3.0));
        assert!(!aabb.is_empty());
        assert_eq!(aabb.min, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(aabb.max, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_center_and_extents() {
        let aabb = Aabb::new(Point3::new(-1.0, -2.0, -3.0), Point3::new(1.0, 2.0, 3.0));
        assert_eq!(aabb.center(), Point3::new(0.0, 0.0, 0.0));
        assert_eq!(aabb.extents(), vec3(2.0, 4.0, 6.0));
    }

    #[test]
    fn test_diagonal_of_unit_cube() {
        let aabb = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        assert!((aabb.diagonal() - 3.0_f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_transformed_by_translation() {
        let aabb = Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
        let moved = aabb.transformed(&Matrix4::from_translation(vec3(10.0, 0.0, 0.0)));
        assert_eq!(moved.center(), Point3::new(10.0, 0.0, 0.0));
        assert_eq!(moved.extents(), vec3(2.0, 2.0, 2.0));
    }

    #[test]
    fn test_transformed_empty_stays_empty() {
        let aabb = Aabb::empty();
        let moved = aabb.transformed(&Matrix4::from_translation(vec3(5.0, 5.0, 5.0)));
        assert!(moved.is_empty());
        assert_eq!(moved.diagonal(), 0.0);
    }

    #[test]
    fn test_union_ignores_empty_boxes() {
        let mut aabb = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        let before = aabb;
        aabb.union(&Aabb::empty());
        assert_eq!(aabb, before);
    }
}
