//! 2D geometry primitives shared by the rule checks.

pub mod bbox;
pub mod poly;

pub use bbox::{BoundingBox, Size};
