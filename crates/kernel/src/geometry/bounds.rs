use serde::{Deserialize, Serialize};

use super::point::{Point2d, Point3d};

/// Axis-aligned bounding box in the sketch plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Box2d {
    pub min: Point2d,
    pub max: Point2d,
}

impl Box2d {
    pub fn new(min: Point2d, max: Point2d) -> Self {
        Self { min, max }
    }

    /// Tight box around `points`, or `None` if there are none.
    pub fn from_points(points: &[Point2d]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bb = Self::new(*first, *first);
        for p in rest {
            bb.expand_to_include(p);
        }
        Some(bb)
    }

    pub fn expand_to_include(&mut self, p: &Point2d) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Lift into 3D with a flat extent at height `z`.
    pub fn to_box3d(&self, z: f64) -> Box3d {
        Box3d::new(
            Point3d::new(self.min.x, self.min.y, z),
            Point3d::new(self.max.x, self.max.y, z),
        )
    }
}

/// Axis-aligned bounding box in wing space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Box3d {
    pub min: Point3d,
    pub max: Point3d,
}

impl Box3d {
    pub fn new(min: Point3d, max: Point3d) -> Self {
        Self { min, max }
    }

    pub fn from_points(points: &[Point3d]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bb = Self::new(*first, *first);
        for p in rest {
            bb.expand_to_include(p);
        }
        Some(bb)
    }

    pub fn expand_to_include(&mut self, p: &Point3d) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    /// Grow to the union of `self` and `other`.
    pub fn insert(&mut self, other: &Box3d) {
        self.expand_to_include(&other.min);
        self.expand_to_include(&other.max);
    }

    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
    }

    /// `(min_x, min_y, min_z, max_x, max_y, max_z)`.
    pub fn to_array(&self) -> [f64; 6] {
        [
            self.min.x, self.min.y, self.min.z, self.max.x, self.max.y, self.max.z,
        ]
    }
}

/// Union of an optional running box with another box.
pub fn insert_box(acc: &mut Option<Box3d>, other: Box3d) {
    match acc {
        Some(bb) => bb.insert(&other),
        None => *acc = Some(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box2d_from_points() {
        let bb = Box2d::from_points(&[
            Point2d::new(0.0, 1.0),
            Point2d::new(-2.0, 3.0),
            Point2d::new(4.0, -1.0),
        ])
        .unwrap();
        assert_eq!(bb.min, Point2d::new(-2.0, -1.0));
        assert_eq!(bb.max, Point2d::new(4.0, 3.0));
        assert!((bb.width() - 6.0).abs() < 1e-12);
        assert!((bb.height() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_box2d_empty_is_none() {
        assert!(Box2d::from_points(&[]).is_none());
    }

    #[test]
    fn test_box3d_insert_keeps_min_le_max() {
        let mut a = Box3d::new(Point3d::new(0.0, 0.0, 0.0), Point3d::new(1.0, 1.0, 0.0));
        let b = Box3d::new(Point3d::new(-3.0, 0.5, 0.0), Point3d::new(0.5, 4.0, 0.0));
        a.insert(&b);
        assert!(a.is_valid());
        assert_eq!(a.to_array(), [-3.0, 0.0, 0.0, 1.0, 4.0, 0.0]);
    }

    #[test]
    fn test_insert_box_into_unset() {
        let mut acc = None;
        insert_box(&mut acc, Box3d::new(Point3d::ORIGIN, Point3d::new(1.0, 2.0, 0.0)));
        insert_box(&mut acc, Box3d::new(Point3d::new(5.0, 5.0, 0.0), Point3d::new(6.0, 6.0, 0.0)));
        let bb = acc.unwrap();
        assert_eq!(bb.to_array(), [0.0, 0.0, 0.0, 6.0, 6.0, 0.0]);
    }
}
