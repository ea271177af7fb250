pub mod bounds;
pub mod curve;
pub mod frame;
pub mod intersection;
pub mod point;
pub mod vector;
