use cgmath::Point3;

/// An axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: Point3<f32>,
    /// Maximum corner
    pub max: Point3<f32>,
}

impl Aabb {
    /// Creates a box from its two corners.
    pub fn new(min: Point3<f32>, max: Point3<f32>) -> Self {
        Aabb { min, max }
    }

    /// The unit cube of the voxel at integer coordinates `(x, y, z)`.
    pub fn voxel(x: i32, y: i32, z: i32) -> Self {
        Aabb::new(
            Point3::new(x as f32, y as f32, z as f32),
            Point3::new(x as f32 + 1.0, y as f32 + 1.0, z as f32 + 1.0),
        )
    }

    /// Strict overlap on all three axes; boxes that only share a face do not intersect.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    /// Half-open range of voxel coordinates this box can touch: `floor(min)..ceil(max)`.
    pub fn voxel_range(&self) -> (Point3<i32>, Point3<i32>) {
        (
            Point3::new(
                self.min.x.floor() as i32,
                self.min.y.floor() as i32,
                self.min.z.floor() as i32,
            ),
            Point3::new(
                self.max.x.ceil() as i32,
                self.max.y.ceil() as i32,
                self.max.z.ceil() as i32,
            ),
        )
    }
}
